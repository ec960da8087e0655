use std::fmt;

use serde::{Deserialize, Serialize};

use super::precision::MAX_ORDER;

/// The outcome of scoring one candidate against a reference set.
///
/// Values are stored unscaled; the `Display` implementation renders the
/// conventional summary with precisions and score as percentages:
///
/// `BLEU = 100.00, 100.0/100.0/100.0/100.0 (BP = 1.000, ratio = 1.000, hyp_len = 6, ref_len = 6)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
	bleu: f64,
	precisions: [f64; MAX_ORDER],
	brevity_penalty: f64,
	length_ratio: f64,
	candidate_length: usize,
	reference_length: usize,
}

impl ScoreResult {
	pub(crate) fn new(
		bleu: f64,
		precisions: [f64; MAX_ORDER],
		brevity_penalty: f64,
		length_ratio: f64,
		candidate_length: usize,
		reference_length: usize,
	) -> Self {
		Self { bleu, precisions, brevity_penalty, length_ratio, candidate_length, reference_length }
	}

	/// Final score in [0, 1].
	pub fn bleu(&self) -> f64 {
		self.bleu
	}

	/// Modified precision for n = 1..=4, each in [0, 1].
	pub fn precisions(&self) -> [f64; MAX_ORDER] {
		self.precisions
	}

	pub fn brevity_penalty(&self) -> f64 {
		self.brevity_penalty
	}

	/// Closest reference length divided by candidate length.
	pub fn length_ratio(&self) -> f64 {
		self.length_ratio
	}

	pub fn candidate_length(&self) -> usize {
		self.candidate_length
	}

	/// Length of the reference closest to the candidate.
	pub fn reference_length(&self) -> usize {
		self.reference_length
	}
}

impl fmt::Display for ScoreResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let [p1, p2, p3, p4] = self.precisions.map(|p| p * 100.0);
		write!(
			f,
			"BLEU = {:.2}, {p1:.1}/{p2:.1}/{p3:.1}/{p4:.1} (BP = {:.3}, ratio = {:.3}, hyp_len = {}, ref_len = {})",
			self.bleu * 100.0,
			self.brevity_penalty,
			self.length_ratio,
			self.candidate_length,
			self.reference_length
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn summary_uses_percentages_and_fixed_decimals() {
		let result = ScoreResult::new(0.123456, [0.75, 0.5, 0.3333, 0.25], 0.846481, 1.1666, 6, 7);
		assert_eq!(
			result.to_string(),
			"BLEU = 12.35, 75.0/50.0/33.3/25.0 (BP = 0.846, ratio = 1.167, hyp_len = 6, ref_len = 7)"
		);
	}
}
