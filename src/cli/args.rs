//! Command line argument parsing

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// vgrab - download videos and playlists from a stream-resolver service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video or playlist URL, or a raw identifier
    pub target: String,

    /// Destination root directory
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub output: PathBuf,

    /// Fixed resolution label for the whole run (e.g. '720p').
    /// Without it, a choice is asked per item.
    #[arg(short, long, value_name = "LABEL")]
    pub resolution: Option<String>,

    /// Treat the target as a playlist
    #[arg(long)]
    pub playlist: bool,

    /// Max playlist members to process (0 means all)
    #[arg(long, default_value = "0")]
    pub limit: usize,

    /// Concurrent transfers; only honored together with --resolution
    #[arg(long, default_value = "1")]
    pub concurrency: usize,

    /// Base URL of the stream-resolver service (defaults to the target's origin)
    #[arg(long, value_name = "URL")]
    pub service: Option<String>,

    /// HTTP timeout (e.g. 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Disable progress output
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Limit as an Option (0 means unlimited)
    pub fn limit_option(&self) -> Option<usize> {
        if self.limit > 0 {
            Some(self.limit)
        } else {
            None
        }
    }

    /// Base URL of the resolver service: an explicit --service, or the
    /// origin of a URL-shaped target
    pub fn service_base(&self) -> Option<String> {
        if let Some(service) = &self.service {
            return Some(service.trim_end_matches('/').to_string());
        }
        let parsed = Url::parse(&self.target).ok()?;
        let host = parsed.host_str()?;
        match parsed.port() {
            Some(port) => Some(format!("{}://{}:{}", parsed.scheme(), host, port)),
            None => Some(format!("{}://{}", parsed.scheme(), host)),
        }
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        let args = Args {
            quiet: false,
            verbose: false,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Normal);

        let args = Args {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);

        let args = Args {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);
    }

    #[test]
    fn test_limit_option() {
        let args = Args::default();
        assert_eq!(args.limit_option(), None);

        let args = Args {
            limit: 5,
            ..Default::default()
        };
        assert_eq!(args.limit_option(), Some(5));
    }

    #[test]
    fn test_service_base_from_explicit_flag() {
        let args = Args {
            service: Some("https://api.example.com/v1/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            args.service_base(),
            Some("https://api.example.com/v1".to_string())
        );
    }

    #[test]
    fn test_service_base_from_target_origin() {
        let args = Args {
            target: "https://videos.example.com:8443/watch?v=abc".to_string(),
            ..Default::default()
        };
        assert_eq!(
            args.service_base(),
            Some("https://videos.example.com:8443".to_string())
        );
    }

    #[test]
    fn test_service_base_missing_for_raw_id() {
        let args = Args {
            target: "raw-id".to_string(),
            ..Default::default()
        };
        assert_eq!(args.service_base(), None);
    }

    #[test]
    fn test_timeout_duration() {
        let args = Args {
            timeout: humantime::Duration::from(Duration::from_secs(60)),
            ..Default::default()
        };
        assert_eq!(args.timeout_duration(), Duration::from_secs(60));
    }
}

// Implement Default for Args to make tests work
impl Default for Args {
    fn default() -> Self {
        Self {
            target: String::new(),
            output: PathBuf::from("."),
            resolution: None,
            playlist: false,
            limit: 0,
            concurrency: 1,
            service: None,
            timeout: humantime::Duration::from(Duration::from_secs(30)),
            no_progress: false,
            verbose: false,
            quiet: false,
        }
    }
}
