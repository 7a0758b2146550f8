//! Console progress sink and status output

use crate::cli::args::VerbosityLevel;
use crate::core::progress::{format_bytes, DownloadEvent, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Console implementation of [`ProgressSink`].
///
/// Prints one status line per terminal state and keeps an indicatif
/// spinner per in-flight item while bytes are moving.
pub struct ConsoleSink {
    verbosity: VerbosityLevel,
    show_progress: bool,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ConsoleSink {
    /// Create a console sink
    pub fn new(verbosity: VerbosityLevel, show_progress: bool) -> Self {
        Self {
            verbosity,
            show_progress: show_progress && verbosity != VerbosityLevel::Quiet,
            bars: Mutex::new(HashMap::new()),
        }
    }

    /// Sink that prints nothing but errors
    pub fn quiet() -> Self {
        Self::new(VerbosityLevel::Quiet, false)
    }

    fn println(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{}", message);
        }
    }

    fn start_bar(&self, title: &str) {
        if !self.show_progress {
            return;
        }
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(format!("Downloading {}", title));
        bar.enable_steady_tick(Duration::from_millis(120));
        self.bars.lock().unwrap().insert(title.to_string(), bar);
    }

    fn finish_bar(&self, title: &str) {
        if let Some(bar) = self.bars.lock().unwrap().remove(title) {
            bar.finish_and_clear();
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn notify(&self, event: &DownloadEvent) {
        match event {
            DownloadEvent::Started { title } => {
                self.println(&format!("📥 {}", title));
                self.start_bar(title);
            }
            DownloadEvent::InProgress { title, bytes_so_far } => {
                if let Some(bar) = self.bars.lock().unwrap().get(title) {
                    bar.set_message(format!("Downloading {} ({})", title, format_bytes(*bytes_so_far)));
                }
            }
            DownloadEvent::Completed { title, bytes_written } => {
                self.finish_bar(title);
                self.println(&format!("✅ {} ({})", title, format_bytes(*bytes_written)));
            }
            DownloadEvent::Failed { title, kind, message } => {
                self.finish_bar(title);
                eprintln!("❌ {}: {} ({})", title, kind, message);
            }
            DownloadEvent::Skipped { title, reason } => {
                self.println(&format!("⏭️  {}: {}", title, reason));
            }
            DownloadEvent::CollectionStarted { title, total } => {
                self.println(&format!("📋 {} ({} items)", title, total));
            }
            DownloadEvent::CollectionCompleted {
                title,
                succeeded,
                failed,
            } => {
                self.println(&format!(
                    "🏁 {}: {} downloaded, {} failed or skipped",
                    title, succeeded, failed
                ));
            }
        }
    }
}
