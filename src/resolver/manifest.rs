//! JSON-manifest resolver
//!
//! A concrete [`StreamResolver`] for services that publish item and
//! collection metadata as JSON documents:
//!
//! - item:       `GET <base>/items/<id>`       -> `{title, streams:[{resolution, mime_type, url}]}`
//! - collection: `GET <base>/collections/<id>` -> `{title, items:[ids]}`

use crate::core::stream::{SourceHandle, StreamDescriptor};
use crate::error::VgrabError;
use crate::resolver::{CollectionListing, ItemStreams, StreamResolver};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ItemManifest {
    title: String,
    #[serde(default)]
    streams: Vec<StreamManifest>,
}

#[derive(Debug, Deserialize)]
struct StreamManifest {
    resolution: String,
    mime_type: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct CollectionManifest {
    title: String,
    #[serde(default)]
    items: Vec<String>,
}

/// Resolver backed by JSON manifests served over HTTP
pub struct ManifestResolver {
    base_url: String,
    client: reqwest::Client,
}

impl ManifestResolver {
    /// Create a resolver rooted at a service base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a resolver with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, VgrabError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Fetching manifest: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VgrabError::ResolutionFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VgrabError::ResolutionFetch(format!(
                "manifest request to {} returned {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| VgrabError::ResolutionFetch(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| VgrabError::Manifest(e.to_string()))
    }
}

#[async_trait]
impl StreamResolver for ManifestResolver {
    async fn resolve_item(&self, item_id: &str) -> Result<ItemStreams, VgrabError> {
        let manifest: ItemManifest = self.fetch_json(&format!("items/{}", item_id)).await?;

        let streams = manifest
            .streams
            .into_iter()
            .map(|s| StreamDescriptor::new(s.resolution, s.mime_type, SourceHandle::new(s.url)))
            .collect();

        Ok(ItemStreams {
            title: manifest.title,
            streams,
        })
    }

    async fn enumerate_collection(
        &self,
        collection_id: &str,
    ) -> Result<CollectionListing, VgrabError> {
        let manifest: CollectionManifest = self
            .fetch_json(&format!("collections/{}", collection_id))
            .await
            .map_err(|e| VgrabError::Enumeration(e.to_string()))?;

        Ok(CollectionListing {
            title: manifest.title,
            item_ids: manifest.items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_item_parses_manifest() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/items/abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "title": "Test Video",
                    "streams": [
                        {"resolution": "144p", "mime_type": "video/mp4", "url": "https://cdn/v144"},
                        {"resolution": "720p", "mime_type": "video/mp4", "url": "https://cdn/v720"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let resolver = ManifestResolver::new(server.url());
        let item = resolver.resolve_item("abc").await.unwrap();

        assert_eq!(item.title, "Test Video");
        assert_eq!(item.streams.len(), 2);
        assert_eq!(item.streams[0].resolution, "144p");
        assert_eq!(item.streams[1].source.url(), "https://cdn/v720");
    }

    #[tokio::test]
    async fn test_resolve_item_no_streams() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/items/bare")
            .with_status(200)
            .with_body(r#"{"title": "No Streams"}"#)
            .create_async()
            .await;

        let resolver = ManifestResolver::new(server.url());
        let item = resolver.resolve_item("bare").await.unwrap();
        assert!(item.streams.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_item_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/items/missing")
            .with_status(404)
            .create_async()
            .await;

        let resolver = ManifestResolver::new(server.url());
        let err = resolver.resolve_item("missing").await.unwrap_err();
        assert!(matches!(err, VgrabError::ResolutionFetch(_)));
    }

    #[tokio::test]
    async fn test_resolve_item_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/items/bad")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let resolver = ManifestResolver::new(server.url());
        let err = resolver.resolve_item("bad").await.unwrap_err();
        assert!(matches!(err, VgrabError::Manifest(_)));
    }

    #[tokio::test]
    async fn test_enumerate_collection() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/collections/PL1")
            .with_status(200)
            .with_body(r#"{"title": "My List", "items": ["a", "b", "c"]}"#)
            .create_async()
            .await;

        let resolver = ManifestResolver::new(server.url());
        let listing = resolver.enumerate_collection("PL1").await.unwrap();
        assert_eq!(listing.title, "My List");
        assert_eq!(listing.item_ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_enumerate_collection_failure_is_enumeration_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/collections/PLx")
            .with_status(500)
            .create_async()
            .await;

        let resolver = ManifestResolver::new(server.url());
        let err = resolver.enumerate_collection("PLx").await.unwrap_err();
        assert!(matches!(err, VgrabError::Enumeration(_)));
    }
}
