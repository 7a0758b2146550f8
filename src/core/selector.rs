//! Resolution selection logic
//!
//! Pure decision logic: given the catalog of available encodings and an
//! optional requested resolution, either pick the matching stream, report
//! that caller input is required, or report that no match exists.

use crate::core::stream::StreamDescriptor;

/// Result of a resolution selection attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionDecision<'a> {
    /// A descriptor matching the requested resolution
    Matched(&'a StreamDescriptor),
    /// A resolution was requested but no descriptor carries that label
    NoMatch,
    /// No resolution was requested; the caller must choose among these
    /// labels (catalog order, duplicates preserved)
    RequiresInput(Vec<String>),
}

/// Select a stream from the catalog.
///
/// With a non-empty `requested` label, returns the first descriptor whose
/// resolution equals it exactly (case-sensitive). Without one, returns the
/// ordered list of offered labels so the caller can ask for a choice. An
/// empty catalog yields `RequiresInput(vec![])`, which callers must treat
/// as no stream being obtainable.
pub fn select<'a>(
    catalog: &'a [StreamDescriptor],
    requested: Option<&str>,
) -> SelectionDecision<'a> {
    match requested {
        Some(label) if !label.is_empty() => catalog
            .iter()
            .find(|d| d.resolution == label)
            .map(SelectionDecision::Matched)
            .unwrap_or(SelectionDecision::NoMatch),
        _ => SelectionDecision::RequiresInput(
            catalog.iter().map(|d| d.resolution.clone()).collect(),
        ),
    }
}
