//! Batch scoring of several candidates against one reference set.
//!
//! - `source`: where a text comes from (inline or file) and how it resolves
//! - `sink`: the injected recorder receiving one `RunRecord` per batch
//! - `scorer`: the all-or-nothing `BatchScorer`

/// Text sources and resolved texts.
pub mod source;

/// Run records and the `ResultSink` capability.
pub mod sink;

/// Batch orchestration with all-or-nothing semantics.
pub mod scorer;
