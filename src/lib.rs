//! # vgrab - video and playlist download orchestration
//!
//! Download orchestration engine for a remote video-hosting service.
//!
//! ## Features
//!
//! - Single-item and ordered-collection (playlist) downloads
//! - Resolution selection with interactive or fixed choice
//! - Per-item outcomes that survive partial collection failures
//! - Presentation-agnostic progress reporting
//! - Optional concurrent transfers once a resolution is fixed
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use vgrab::cli::output::ConsoleSink;
//! use vgrab::cli::prompt::DeclinePrompt;
//! use vgrab::resolver::manifest::ManifestResolver;
//! use vgrab::{Orchestrator, OrchestratorOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = Arc::new(ManifestResolver::new("https://example.com/api"));
//!     let orchestrator = Orchestrator::new(
//!         resolver,
//!         Arc::new(DeclinePrompt),
//!         Arc::new(ConsoleSink::quiet()),
//!         OrchestratorOptions {
//!             requested_resolution: Some("720p".to_string()),
//!             ..Default::default()
//!         },
//!     );
//!
//!     let outcome = orchestrator
//!         .download_item("item-id", &PathBuf::from("./downloads"))
//!         .await;
//!     println!("Outcome: {:?}", outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod resolver;
pub mod utils;

// Re-export main types
pub use crate::core::{
    CollectionResult, DownloadEvent, DownloadOutcome, DownloadRequest, FailureKind, Orchestrator,
    OrchestratorOptions, ProgressSink, ResolutionPrompt, SelectionDecision, SkipReason,
    SourceHandle, StreamDescriptor, Target, TargetKind,
};
pub use error::VgrabError;

/// Result type alias for vgrab operations
pub type Result<T> = std::result::Result<T, VgrabError>;
