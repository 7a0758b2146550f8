//! Error types for vgrab

use thiserror::Error;

/// Main error type for vgrab operations
#[derive(Debug, Error)]
pub enum VgrabError {
    #[error("Failed to enumerate streams for item: {0}")]
    ResolutionFetch(String),

    #[error("Failed to enumerate collection members: {0}")]
    Enumeration(String),

    #[error("Transfer failed: {0}")]
    Transfer(#[from] reqwest::Error),

    #[error("Transfer failed with status {0}")]
    TransferStatus(reqwest::StatusCode),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Malformed manifest: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VgrabError {
    /// Check if the error aborts a whole collection run rather than one item
    pub fn is_fatal_to_collection(&self) -> bool {
        matches!(self, VgrabError::Enumeration(_))
    }
}
