//! Stream-resolver collaborator interface
//!
//! The remote service's negotiation protocol is out of scope for the core;
//! it only requires the shapes below. Concrete resolvers implement
//! [`StreamResolver`]; the core talks to them through [`StreamCatalog`].

pub mod catalog;
pub mod manifest;

pub use catalog::StreamCatalog;

use crate::core::stream::StreamDescriptor;
use crate::error::VgrabError;
use async_trait::async_trait;

/// Streams available for one item, as negotiated by the remote service
#[derive(Debug, Clone)]
pub struct ItemStreams {
    /// Item title
    pub title: String,
    /// Available encodings, in the order offered by the source
    pub streams: Vec<StreamDescriptor>,
}

/// Members of one collection, in enumeration order
#[derive(Debug, Clone)]
pub struct CollectionListing {
    /// Collection title
    pub title: String,
    /// Ordered member item identifiers
    pub item_ids: Vec<String>,
}

/// External capability that negotiates streams with the remote service
#[async_trait]
pub trait StreamResolver: Send + Sync {
    /// Enumerate the available encodings for one item.
    ///
    /// A fetch failure must surface as an error; an empty stream list is
    /// reserved for items that legitimately have no streams.
    async fn resolve_item(&self, item_id: &str) -> Result<ItemStreams, VgrabError>;

    /// List the ordered members of a collection together with its title
    async fn enumerate_collection(
        &self,
        collection_id: &str,
    ) -> Result<CollectionListing, VgrabError>;
}
