use std::io;

use thiserror::Error;

/// Errors raised while loading texts or computing a BLEU score.
#[derive(Debug, Error)]
pub enum BleuError {
	/// A text source could not be read or is not valid UTF-8.
	#[error("failed to load text from {source_id}: {source}")]
	InputLoad {
		source_id: String,
		#[source]
		source: io::Error,
	},

	/// The candidate produced no tokens, so the length ratio is undefined.
	#[error("empty candidate cannot be scored")]
	EmptyCandidate,

	/// Scoring needs at least one reference.
	#[error("no reference texts supplied")]
	NoReferences,

	/// Scoring a single candidate of a batch failed.
	#[error("scoring failed for {candidate}: {source}")]
	Scoring {
		candidate: String,
		#[source]
		source: Box<BleuError>,
	},
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, BleuError>;

/// Errors raised by a `ResultSink` while recording a run.
///
/// Kept apart from `BleuError`: a failed record never changes the
/// outcome of the scoring it describes.
#[derive(Debug, Error)]
pub enum SinkError {
	#[error("journal I/O failed: {0}")]
	Io(#[from] io::Error),

	#[error("journal encoding failed: {0}")]
	Encoding(#[from] postcard::Error),
}
