//! Catalog adapter over the external stream resolver

use crate::error::VgrabError;
use crate::resolver::{ItemStreams, StreamResolver};
use std::sync::Arc;
use tracing::debug;

/// Wraps the stream-resolver capability and normalizes its failures into
/// the distinct resolution-fetch error kind.
#[derive(Clone)]
pub struct StreamCatalog {
    resolver: Arc<dyn StreamResolver>,
}

impl StreamCatalog {
    /// Create a catalog over a resolver
    pub fn new(resolver: Arc<dyn StreamResolver>) -> Self {
        Self { resolver }
    }

    /// Fetch the set of available encodings for one item.
    ///
    /// Fails with [`VgrabError::ResolutionFetch`] when the remote
    /// capability cannot enumerate streams; never silently returns an
    /// empty set for a genuine fetch failure.
    pub async fn fetch(&self, item_id: &str) -> Result<ItemStreams, VgrabError> {
        let item = self
            .resolver
            .resolve_item(item_id)
            .await
            .map_err(|e| match e {
                already @ VgrabError::ResolutionFetch(_) => already,
                other => VgrabError::ResolutionFetch(other.to_string()),
            })?;

        debug!(
            "Catalog for {}: {} streams ({})",
            item_id,
            item.streams.len(),
            item.title
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stream::{SourceHandle, StreamDescriptor};
    use async_trait::async_trait;

    struct StaticResolver {
        fail: bool,
    }

    #[async_trait]
    impl StreamResolver for StaticResolver {
        async fn resolve_item(&self, item_id: &str) -> Result<ItemStreams, VgrabError> {
            if self.fail {
                return Err(VgrabError::Manifest("corrupt".to_string()));
            }
            Ok(ItemStreams {
                title: format!("title-{}", item_id),
                streams: vec![StreamDescriptor::new(
                    "720p",
                    "video/mp4",
                    SourceHandle::new("https://cdn.example.com/x"),
                )],
            })
        }

        async fn enumerate_collection(
            &self,
            _collection_id: &str,
        ) -> Result<crate::resolver::CollectionListing, VgrabError> {
            unimplemented!("not used in catalog tests")
        }
    }

    #[tokio::test]
    async fn test_fetch_passes_through_streams() {
        let catalog = StreamCatalog::new(Arc::new(StaticResolver { fail: false }));
        let item = catalog.fetch("abc").await.unwrap();
        assert_eq!(item.title, "title-abc");
        assert_eq!(item.streams.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_resolution_fetch_error() {
        let catalog = StreamCatalog::new(Arc::new(StaticResolver { fail: true }));
        let err = catalog.fetch("abc").await.unwrap_err();
        assert!(matches!(err, VgrabError::ResolutionFetch(_)));
    }
}
