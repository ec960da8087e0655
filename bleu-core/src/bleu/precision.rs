use super::ngram::NGramCounts;
use super::tokenizer::TokenSequence;

/// Highest n-gram order used by BLEU.
pub const MAX_ORDER: usize = 4;

/// Clipped match statistics for one n-gram order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NGramMatch {
	/// Candidate occurrences credited after clipping.
	pub matched: usize,
	/// All candidate n-gram occurrences.
	pub total: usize,
}

impl NGramMatch {
	/// `matched / total`, or 0.0 when the candidate has no n-gram of this order.
	pub fn precision(&self) -> f64 {
		if self.total == 0 {
			return 0.0;
		}
		self.matched as f64 / self.total as f64
	}
}

/// Computes the modified n-gram precision of order `n`.
///
/// Every candidate n-gram is credited at most as many times as it occurs
/// in the single reference where it is most frequent.
pub fn modified_precision(candidate: &TokenSequence, references: &[TokenSequence], n: usize) -> NGramMatch {
	let candidate_counts = candidate.counts(n);

	let mut reference_max = NGramCounts::new(n);
	for reference in references {
		reference_max.merge_max(&reference.counts(n));
	}

	NGramMatch {
		matched: candidate_counts.clipped_matches(&reference_max),
		total: candidate_counts.total(),
	}
}

/// Match statistics for every order from 1 to `MAX_ORDER`.
pub fn precisions(candidate: &TokenSequence, references: &[TokenSequence]) -> [NGramMatch; MAX_ORDER] {
	std::array::from_fn(|i| modified_precision(candidate, references, i + 1))
}

/// Geometric mean of `values`.
///
/// Returns 0.0 if `values` is empty or any value is exactly 0.0,
/// which keeps `ln(0)` out of the computation.
pub fn geometric_mean(values: &[f64]) -> f64 {
	if values.is_empty() || values.iter().any(|&v| v == 0.0) {
		return 0.0;
	}

	let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
	(log_sum / values.len() as f64).exp()
}
