//! Item downloader
//!
//! Drives the byte transfer of one resolved stream to a destination path,
//! reporting status transitions through the progress sink and surfacing
//! terminal failure as a [`DownloadOutcome`].

use crate::core::outcome::{DownloadOutcome, FailureKind};
use crate::core::progress::{DownloadEvent, ProgressSink};
use crate::core::stream::{DownloadRequest, StreamDescriptor};
use crate::error::VgrabError;
use crate::utils::filename::to_safe_filename;
use futures_util::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Drives the download of one resolved stream to a destination path.
///
/// Failed transfers may leave a partial file on disk; cleanup is a caller
/// concern. Callers wanting transactional writes wrap the destination with
/// a temp-file-then-rename step.
#[derive(Clone)]
pub struct ItemDownloader {
    client: reqwest::Client,
}

impl ItemDownloader {
    /// Create a downloader with the default HTTP timeout
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a downloader with a custom HTTP timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Download one resolved stream.
    ///
    /// Emits `Started` then zero or more `InProgress` events, and exactly
    /// one terminal `Completed` or `Failed` event. The destination
    /// directory is created if absent. No automatic retry; retry policy
    /// belongs to the caller.
    pub async fn run(
        &self,
        request: &DownloadRequest,
        title: &str,
        descriptor: &StreamDescriptor,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> DownloadOutcome {
        sink.notify(&DownloadEvent::Started {
            title: title.to_string(),
        });

        match self.transfer(request, title, descriptor, sink, cancel).await {
            Ok(bytes_written) => {
                info!("Downloaded {}: {} bytes", request.item_id, bytes_written);
                sink.notify(&DownloadEvent::Completed {
                    title: title.to_string(),
                    bytes_written,
                });
                DownloadOutcome::Success {
                    title: title.to_string(),
                    resolution: descriptor.resolution.clone(),
                    bytes_written,
                }
            }
            Err(e) => {
                let kind = match e {
                    VgrabError::Cancelled => FailureKind::Cancelled,
                    _ => FailureKind::Transfer,
                };
                let message = e.to_string();
                warn!("Download of {} failed: {}", request.item_id, message);
                sink.notify(&DownloadEvent::Failed {
                    title: title.to_string(),
                    kind,
                    message: message.clone(),
                });
                DownloadOutcome::Failed { kind, message }
            }
        }
    }

    async fn transfer(
        &self,
        request: &DownloadRequest,
        title: &str,
        descriptor: &StreamDescriptor,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<u64, VgrabError> {
        // Idempotent: no error if the directory already exists
        tokio::fs::create_dir_all(&request.dest_dir).await?;

        let output_path = self.output_path(request, title, descriptor);
        debug!("Writing {} to {:?}", request.item_id, output_path);

        if cancel.is_cancelled() {
            return Err(VgrabError::Cancelled);
        }

        let response = self.client.get(descriptor.source.url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VgrabError::TransferStatus(status));
        }

        let mut file = File::create(&output_path).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        loop {
            let chunk = tokio::select! {
                _ = cancel.cancelled() => return Err(VgrabError::Cancelled),
                next = stream.next() => match next {
                    Some(chunk) => chunk?,
                    None => break,
                },
            };

            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            sink.notify(&DownloadEvent::InProgress {
                title: title.to_string(),
                bytes_so_far: downloaded,
            });
        }

        file.flush().await?;
        Ok(downloaded)
    }

    fn output_path(
        &self,
        request: &DownloadRequest,
        title: &str,
        descriptor: &StreamDescriptor,
    ) -> PathBuf {
        let filename = to_safe_filename(title, descriptor.extension());
        request.dest_dir.join(filename)
    }
}

impl Default for ItemDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::progress::NullSink;
    use crate::core::stream::SourceHandle;
    use std::sync::Mutex;

    struct RecordingSink {
        events: Mutex<Vec<DownloadEvent>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProgressSink for RecordingSink {
        fn notify(&self, event: &DownloadEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn descriptor_for(url: &str) -> StreamDescriptor {
        StreamDescriptor::new("720p", "video/mp4", SourceHandle::new(url))
    }

    #[tokio::test]
    async fn test_successful_download_writes_file_and_reports() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/stream")
            .with_status(200)
            .with_body("0123456789")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let request = DownloadRequest::new("abc", dir.path());
        let sink = RecordingSink::new();
        let downloader = ItemDownloader::new();

        let outcome = downloader
            .run(
                &request,
                "My Video",
                &descriptor_for(&format!("{}/stream", server.url())),
                &sink,
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(
            outcome,
            DownloadOutcome::Success {
                title: "My Video".to_string(),
                resolution: "720p".to_string(),
                bytes_written: 10,
            }
        );

        let written = std::fs::read(dir.path().join("My Video.mp4")).unwrap();
        assert_eq!(written, b"0123456789");

        let events = sink.events.lock().unwrap();
        assert!(matches!(events.first(), Some(DownloadEvent::Started { .. })));
        assert!(matches!(
            events.last(),
            Some(DownloadEvent::Completed { bytes_written: 10, .. })
        ));
    }

    #[tokio::test]
    async fn test_destination_directory_is_created() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/stream")
            .with_status(200)
            .with_body("x")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let request = DownloadRequest::new("abc", &nested);
        let downloader = ItemDownloader::new();

        let outcome = downloader
            .run(
                &request,
                "v",
                &descriptor_for(&format!("{}/stream", server.url())),
                &NullSink,
                &CancellationToken::new(),
            )
            .await;

        assert!(outcome.is_success());
        assert!(nested.join("v.mp4").exists());
    }

    #[tokio::test]
    async fn test_existing_directory_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/stream")
            .with_status(200)
            .with_body("x")
            .expect(2)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let request = DownloadRequest::new("abc", dir.path());
        let downloader = ItemDownloader::new();
        let descriptor = descriptor_for(&format!("{}/stream", server.url()));

        for _ in 0..2 {
            let outcome = downloader
                .run(&request, "v", &descriptor, &NullSink, &CancellationToken::new())
                .await;
            assert!(outcome.is_success());
        }
    }

    #[tokio::test]
    async fn test_http_error_status_is_transfer_failure() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/stream")
            .with_status(503)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let request = DownloadRequest::new("abc", dir.path());
        let sink = RecordingSink::new();
        let downloader = ItemDownloader::new();

        let outcome = downloader
            .run(
                &request,
                "v",
                &descriptor_for(&format!("{}/stream", server.url())),
                &sink,
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            outcome,
            DownloadOutcome::Failed {
                kind: FailureKind::Transfer,
                ..
            }
        ));

        // Exactly one terminal event
        let events = sink.events.lock().unwrap();
        let terminals = events
            .iter()
            .filter(|e| {
                matches!(e, DownloadEvent::Completed { .. } | DownloadEvent::Failed { .. })
            })
            .count();
        assert_eq!(terminals, 1);
    }

    #[tokio::test]
    async fn test_cancelled_token_yields_cancelled_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let request = DownloadRequest::new("abc", dir.path());
        let downloader = ItemDownloader::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = downloader
            .run(
                &request,
                "v",
                &descriptor_for("http://127.0.0.1:9/unreachable"),
                &NullSink,
                &cancel,
            )
            .await;

        assert!(matches!(
            outcome,
            DownloadOutcome::Failed {
                kind: FailureKind::Cancelled,
                ..
            }
        ));
    }
}
