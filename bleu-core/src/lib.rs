//! Sentence-level BLEU scoring library.
//!
//! This crate provides the BLEU (Bilingual Evaluation Understudy) metric used to
//! compare machine translations against human references, including:
//! - Treebank-style word tokenization
//! - N-gram extraction and clipped precision for n = 1..=4
//! - Brevity penalty against the closest reference length
//! - Batch scoring with all-or-nothing semantics and run recording
//!
//! Scoring is pure and reentrant. Loading texts and recording runs happen at
//! the edges and always surface their failures to the caller.

/// Core BLEU computation.
///
/// Tokenization, n-gram counting, precision, brevity penalty and the
/// final aggregated `ScoreResult`.
pub mod bleu;

/// Batch orchestration.
///
/// Resolves text sources, scores every candidate against the reference
/// set and reports exactly one `RunRecord` to a `ResultSink` per batch.
pub mod batch;

/// Error types shared by the scorer and the batch layer.
pub mod error;

/// I/O utilities (text loading, file names, upload paths).
pub mod io;

pub use batch::scorer::{BatchOutcome, BatchReport, BatchScorer, CandidateScore};
pub use batch::sink::{JournalSink, LogSink, MemorySink, ResultSink, RunRecord, RunStatus};
pub use batch::source::{SourceRole, Text, TextSource};
pub use bleu::result::ScoreResult;
pub use bleu::score;
pub use error::{BleuError, Result, SinkError};
