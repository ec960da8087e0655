//! BLEU computation for a single candidate.
//!
//! The pipeline is:
//! - `tokenizer`: text → `TokenSequence`
//! - `ngram`: token windows and their `NGramCounts`
//! - `precision`: clipped n-gram precision and geometric mean
//! - `brevity`: closest reference length and brevity penalty
//! - `result`: the aggregated `ScoreResult`

use crate::error::{BleuError, Result};

use self::brevity::{brevity_penalty, closest_reference_length};
use self::precision::{geometric_mean, precisions};
use self::result::ScoreResult;
use self::tokenizer::TokenSequence;

/// Treebank-style word tokenizer.
pub mod tokenizer;

/// N-gram extraction and counting.
pub mod ngram;

/// Modified (clipped) n-gram precision.
pub mod precision;

/// Brevity penalty against the closest reference.
pub mod brevity;

/// Immutable score record and its human-readable summary.
pub mod result;

/// Scores one candidate text against a set of reference texts.
///
/// All references are used jointly: n-gram counts are clipped to the
/// maximum count found in any single reference, and the brevity penalty
/// uses the reference length closest to the candidate length.
///
/// # Errors
/// - `NoReferences` if `references` is empty
/// - `EmptyCandidate` if the candidate has no tokens
pub fn score<S: AsRef<str>>(candidate: &str, references: &[S]) -> Result<ScoreResult> {
	let candidate = TokenSequence::new(candidate);
	let references: Vec<TokenSequence> = references
		.iter()
		.map(|reference| TokenSequence::new(reference.as_ref()))
		.collect();
	score_tokens(&candidate, &references)
}

/// Scores an already tokenized candidate against tokenized references.
///
/// See [`score`] for the semantics and errors.
pub fn score_tokens(candidate: &TokenSequence, references: &[TokenSequence]) -> Result<ScoreResult> {
	let reference_lengths: Vec<usize> = references.iter().map(TokenSequence::len).collect();
	let closest = closest_reference_length(candidate.len(), &reference_lengths)
		.ok_or(BleuError::NoReferences)?;
	let penalty = brevity_penalty(candidate.len(), closest)?;

	let matches = precisions(candidate, references);
	let values = matches.map(|m| m.precision());
	let mean = geometric_mean(&values);

	Ok(ScoreResult::new(
		penalty * mean,
		values,
		penalty,
		closest as f64 / candidate.len() as f64,
		candidate.len(),
		closest,
	))
}
