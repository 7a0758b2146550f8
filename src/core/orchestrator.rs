//! Collection and single-item orchestration
//!
//! Enumerates collection members, prepares the per-collection destination
//! namespace, and drives one download per member, aggregating per-item
//! outcomes into a [`CollectionResult`] without letting one item's failure
//! abort the rest.

use crate::core::outcome::{CollectionResult, DownloadOutcome, FailureKind};
use crate::core::progress::{DownloadEvent, ProgressSink, SkipReason};
use crate::core::selector::{select, SelectionDecision};
use crate::core::stream::DownloadRequest;
use crate::download::ItemDownloader;
use crate::error::VgrabError;
use crate::resolver::{StreamCatalog, StreamResolver};
use crate::utils::filename::sanitize_component;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// External capability that asks the caller to pick among available
/// resolutions. Returns `None` when the caller declines to choose.
#[async_trait]
pub trait ResolutionPrompt: Send + Sync {
    /// Ask for a resolution choice for one item
    async fn ask(&self, item_title: &str, available: &[String]) -> Option<String>;
}

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Fixed resolution label applied to every item of the run. When
    /// absent, the prompt collaborator is asked once per item; an ad-hoc
    /// answer is never carried over to later items.
    pub requested_resolution: Option<String>,
    /// Concurrent transfers; honored only when a fixed resolution removes
    /// any need for prompting
    pub concurrency: usize,
    /// Maximum collection members to process
    pub limit: Option<usize>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            requested_resolution: None,
            concurrency: 1,
            limit: None,
        }
    }
}

/// Drives downloads for single items and ordered collections.
///
/// A destination directory is assumed to be exclusively owned by one run;
/// concurrent runs against the same destination are a caller error and are
/// not guarded against.
pub struct Orchestrator {
    resolver: Arc<dyn StreamResolver>,
    catalog: StreamCatalog,
    downloader: ItemDownloader,
    prompt: Arc<dyn ResolutionPrompt>,
    sink: Arc<dyn ProgressSink>,
    options: OrchestratorOptions,
    cancel: CancellationToken,
}

impl Orchestrator {
    /// Create an orchestrator over a resolver and the caller-supplied
    /// prompt and sink collaborators
    pub fn new(
        resolver: Arc<dyn StreamResolver>,
        prompt: Arc<dyn ResolutionPrompt>,
        sink: Arc<dyn ProgressSink>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            catalog: StreamCatalog::new(resolver.clone()),
            resolver,
            downloader: ItemDownloader::new(),
            prompt,
            sink,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the item downloader (e.g. to adjust its HTTP timeout)
    pub fn with_downloader(mut self, downloader: ItemDownloader) -> Self {
        self.downloader = downloader;
        self
    }

    /// Token for cancelling the run cooperatively; checked at each member
    /// iteration and observed mid-transfer
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Download a single item into `dest_dir`.
    ///
    /// All failures are captured in the returned outcome; exactly one
    /// terminal status message is emitted through the sink.
    pub async fn download_item(&self, item_id: &str, dest_dir: &Path) -> DownloadOutcome {
        self.process_member(item_id, dest_dir).await
    }

    /// Download every member of a collection.
    ///
    /// Enumeration failure is fatal to the whole call; once members are
    /// known, the result sequence covers every one of them in enumeration
    /// order, whatever the per-item outcomes.
    pub async fn run_collection(
        &self,
        collection_id: &str,
        destination_root: &Path,
    ) -> Result<CollectionResult, VgrabError> {
        let listing = self
            .resolver
            .enumerate_collection(collection_id)
            .await
            .map_err(|e| match e {
                already @ VgrabError::Enumeration(_) => already,
                other => VgrabError::Enumeration(other.to_string()),
            })?;

        let mut item_ids = listing.item_ids;
        if let Some(limit) = self.options.limit {
            item_ids.truncate(limit);
        }

        info!(
            "Collection '{}': {} members to process",
            listing.title,
            item_ids.len()
        );

        // Prepare the collection namespace once, before any member
        let destination = self.collection_destination(destination_root, &listing.title);
        tokio::fs::create_dir_all(&destination).await?;

        self.sink.notify(&DownloadEvent::CollectionStarted {
            title: listing.title.clone(),
            total: item_ids.len(),
        });

        let fixed_resolution = self
            .options
            .requested_resolution
            .as_deref()
            .map_or(false, |r| !r.is_empty());

        let items = if fixed_resolution && self.options.concurrency > 1 {
            // Transfers may run concurrently once resolution is fixed;
            // `buffered` keeps the result sequence in enumeration order.
            stream::iter(item_ids)
                .map(|id| {
                    let destination = destination.clone();
                    async move {
                        let outcome = self.process_member(&id, &destination).await;
                        (id, outcome)
                    }
                })
                .buffered(self.options.concurrency)
                .collect::<Vec<_>>()
                .await
        } else {
            // Sequential baseline: the prompt is a single shared channel,
            // so members are resolved and downloaded one at a time.
            let mut items = Vec::with_capacity(item_ids.len());
            for id in item_ids {
                let outcome = self.process_member(&id, &destination).await;
                items.push((id, outcome));
            }
            items
        };

        let result = CollectionResult {
            title: listing.title,
            destination,
            items,
        };

        self.sink.notify(&DownloadEvent::CollectionCompleted {
            title: result.title.clone(),
            succeeded: result.succeeded(),
            failed: result.failed(),
        });

        Ok(result)
    }

    /// Resolve, select and download one member. Every path through here
    /// emits exactly one terminal sink event and returns one outcome.
    async fn process_member(&self, item_id: &str, dest_dir: &Path) -> DownloadOutcome {
        if self.cancel.is_cancelled() {
            let message = "run cancelled before item started".to_string();
            self.sink.notify(&DownloadEvent::Failed {
                title: item_id.to_string(),
                kind: FailureKind::Cancelled,
                message: message.clone(),
            });
            return DownloadOutcome::Failed {
                kind: FailureKind::Cancelled,
                message,
            };
        }

        let item = match self.catalog.fetch(item_id).await {
            Ok(item) => item,
            Err(e) => {
                let message = e.to_string();
                warn!("Could not resolve streams for {}: {}", item_id, message);
                self.sink.notify(&DownloadEvent::Failed {
                    title: item_id.to_string(),
                    kind: FailureKind::ResolutionFetch,
                    message: message.clone(),
                });
                return DownloadOutcome::Failed {
                    kind: FailureKind::ResolutionFetch,
                    message,
                };
            }
        };

        let requested = self.options.requested_resolution.as_deref();
        match select(&item.streams, requested) {
            SelectionDecision::Matched(descriptor) => {
                let request = DownloadRequest::new(item_id, dest_dir)
                    .with_resolution(&descriptor.resolution);
                self.downloader
                    .run(&request, &item.title, descriptor, self.sink.as_ref(), &self.cancel)
                    .await
            }
            SelectionDecision::NoMatch => self.skip(&item.title, SkipReason::NoMatchingResolution),
            SelectionDecision::RequiresInput(available) => {
                if available.is_empty() {
                    // No stream obtainable for this item
                    return self.skip(&item.title, SkipReason::NoMatchingResolution);
                }

                debug!("Asking for a resolution for '{}'", item.title);
                match self.prompt.ask(&item.title, &available).await {
                    Some(choice) => match select(&item.streams, Some(choice.as_str())) {
                        SelectionDecision::Matched(descriptor) => {
                            let request = DownloadRequest::new(item_id, dest_dir)
                                .with_resolution(&descriptor.resolution);
                            self.downloader
                                .run(
                                    &request,
                                    &item.title,
                                    descriptor,
                                    self.sink.as_ref(),
                                    &self.cancel,
                                )
                                .await
                        }
                        _ => self.skip(&item.title, SkipReason::NoMatchingResolution),
                    },
                    None => self.skip(&item.title, SkipReason::Unanswered),
                }
            }
        }
    }

    fn skip(&self, title: &str, reason: SkipReason) -> DownloadOutcome {
        self.sink.notify(&DownloadEvent::Skipped {
            title: title.to_string(),
            reason,
        });
        match reason {
            SkipReason::NoMatchingResolution => DownloadOutcome::NoMatchingResolution,
            SkipReason::Unanswered => DownloadOutcome::ResolutionRequiredButUnanswered,
        }
    }

    fn collection_destination(&self, destination_root: &Path, title: &str) -> PathBuf {
        let component = sanitize_component(title);
        if component.is_empty() {
            destination_root.join("collection")
        } else {
            destination_root.join(component)
        }
    }
}
