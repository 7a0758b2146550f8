//! Stream descriptors and download requests

use std::path::PathBuf;

/// Opaque reference to a negotiated stream. Consumed by the item
/// downloader when the transfer starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHandle(String);

impl SourceHandle {
    /// Wrap a negotiated stream URL
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The underlying stream URL
    pub fn url(&self) -> &str {
        &self.0
    }
}

/// One available encoding of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    /// Canonical resolution label (e.g. "720p")
    pub resolution: String,
    /// Container MIME type
    pub mime_type: String,
    /// Opaque reference to the negotiated stream
    pub source: SourceHandle,
}

impl StreamDescriptor {
    /// Create a new stream descriptor
    pub fn new(
        resolution: impl Into<String>,
        mime_type: impl Into<String>,
        source: SourceHandle,
    ) -> Self {
        Self {
            resolution: resolution.into(),
            mime_type: mime_type.into(),
            source,
        }
    }

    /// File extension implied by the container type
    pub fn extension(&self) -> &'static str {
        crate::utils::mime::ext_from_mime(&self.mime_type)
    }
}

/// Parameters for downloading one item. Constructed once per item.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Identifier of the target item
    pub item_id: String,
    /// Destination directory for the written file
    pub dest_dir: PathBuf,
    /// Optional fixed resolution label for the whole run
    pub requested_resolution: Option<String>,
}

impl DownloadRequest {
    /// Create a new download request
    pub fn new(item_id: impl Into<String>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            item_id: item_id.into(),
            dest_dir: dest_dir.into(),
            requested_resolution: None,
        }
    }

    /// Set a fixed requested resolution
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.requested_resolution = Some(resolution.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_extension() {
        let descriptor = StreamDescriptor::new(
            "720p",
            "video/mp4",
            SourceHandle::new("https://cdn.example.com/v/1"),
        );
        assert_eq!(descriptor.extension(), "mp4");
    }

    #[test]
    fn test_request_builder() {
        let request = DownloadRequest::new("abc", "/tmp/out").with_resolution("480p");
        assert_eq!(request.item_id, "abc");
        assert_eq!(request.dest_dir, PathBuf::from("/tmp/out"));
        assert_eq!(request.requested_resolution, Some("480p".to_string()));
    }
}
