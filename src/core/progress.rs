//! Progress reporting for downloads
//!
//! Components report status transitions through [`ProgressSink`]; whatever
//! presentation layer is attached (console, UI, log) implements it.

use crate::core::outcome::FailureKind;

/// A status transition reported while processing items and collections
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    /// An item transfer is about to begin
    Started { title: String },
    /// Bytes are flowing for an item; granularity is implementation-defined
    InProgress { title: String, bytes_so_far: u64 },
    /// An item transfer finished completely
    Completed { title: String, bytes_written: u64 },
    /// An item terminated with a failure
    Failed {
        title: String,
        kind: FailureKind,
        message: String,
    },
    /// An item was skipped without a transfer attempt
    Skipped { title: String, reason: SkipReason },
    /// A collection run began; `total` members were enumerated
    CollectionStarted { title: String, total: usize },
    /// A collection run finished; every member has a recorded outcome
    CollectionCompleted {
        title: String,
        succeeded: usize,
        failed: usize,
    },
}

/// Why an item was skipped without a transfer attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The catalog offers no stream with the requested label
    NoMatchingResolution,
    /// A resolution choice was required and the caller declined
    Unanswered,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoMatchingResolution => write!(f, "no matching resolution"),
            SkipReason::Unanswered => write!(f, "no resolution chosen"),
        }
    }
}

/// Presentation-agnostic status-reporting interface
pub trait ProgressSink: Send + Sync {
    /// Report one status transition
    fn notify(&self, event: &DownloadEvent);
}

/// Sink that discards all events
pub struct NullSink;

impl ProgressSink for NullSink {
    fn notify(&self, _event: &DownloadEvent) {}
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}
