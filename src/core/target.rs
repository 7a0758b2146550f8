//! Target classification for user-supplied references

use crate::utils::url::{extract_identifier, is_collection_url};

/// Whether a target refers to one item or an ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A single video item
    Single,
    /// An ordered collection (playlist) of items
    Collection,
}

/// A user-specified reference to a single item or a collection.
/// Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Target {
    raw: String,
    id: String,
    kind: TargetKind,
}

impl Target {
    /// Parse a target from a URL or raw identifier. `force_collection`
    /// overrides URL-shape classification (the `--playlist` flag).
    pub fn parse(raw: &str, force_collection: bool) -> Self {
        let kind = if force_collection || is_collection_url(raw) {
            TargetKind::Collection
        } else {
            TargetKind::Single
        };

        Self {
            raw: raw.to_string(),
            id: extract_identifier(raw),
            kind,
        }
    }

    /// Original reference as supplied by the caller
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Extracted item or collection identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Target discriminant
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Check if the target is a collection
    pub fn is_collection(&self) -> bool {
        self.kind == TargetKind::Collection
    }
}
