//! Per-item and per-collection result records

use std::path::PathBuf;

/// Classification of a terminal per-item failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Could not enumerate streams for the item (network/remote/not-found)
    ResolutionFetch,
    /// I/O or remote error during byte transfer
    Transfer,
    /// The run was cancelled before or during the transfer
    Cancelled,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::ResolutionFetch => write!(f, "resolution fetch failed"),
            FailureKind::Transfer => write!(f, "transfer failed"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Terminal result of one item download. Exactly one is produced per item.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// The item was downloaded completely
    Success {
        title: String,
        resolution: String,
        bytes_written: u64,
    },
    /// A resolution was requested but the catalog offers no such label
    NoMatchingResolution,
    /// The caller was asked to choose a resolution and declined
    ResolutionRequiredButUnanswered,
    /// The download terminated with an error
    Failed { kind: FailureKind, message: String },
}

impl DownloadOutcome {
    /// Check if the outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success { .. })
    }
}

/// Aggregate, order-preserving record of per-item outcomes for a
/// collection run. The item sequence always covers every enumerated
/// member, regardless of per-item failures.
#[derive(Debug, Clone)]
pub struct CollectionResult {
    /// Collection title as reported by the resolver
    pub title: String,
    /// Directory all member files were written under
    pub destination: PathBuf,
    /// (item identifier, outcome) pairs in enumeration order
    pub items: Vec<(String, DownloadOutcome)>,
}

impl CollectionResult {
    /// Number of members that downloaded successfully
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|(_, o)| o.is_success()).count()
    }

    /// Number of members with a non-success outcome
    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }
}
