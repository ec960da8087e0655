use std::collections::HashMap;

/// An ordered window of `n` consecutive tokens, borrowed from its sequence.
pub type NGram<'a> = &'a [String];

/// Returns the ordered n-grams of `tokens` (sliding window of size `n`, stride 1).
///
/// Returns an empty vector if `n` is 0 or larger than the number of tokens.
pub fn extract(tokens: &[String], n: usize) -> Vec<NGram<'_>> {
	if n == 0 || tokens.len() < n {
		// Sequence too short, no n-grams to compute
		return Vec::new();
	}
	tokens.windows(n).collect()
}

/// Occurrence counts of the n-grams of a single order.
///
/// # Responsibilities
/// - Count n-gram occurrences of one token sequence
/// - Combine several sequences by keeping the maximum count per n-gram
/// - Clip candidate counts against reference counts
///
/// # Invariants
/// - Every key has exactly `n` tokens
/// - Every stored count is >= 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NGramCounts<'a> {
	/// The order of the counted n-grams
	n: usize,

	/// Mapping from an n-gram to its number of occurrences
	counts: HashMap<NGram<'a>, usize>,
}

impl<'a> NGramCounts<'a> {
	/// Creates an empty count table of order `n`.
	pub fn new(n: usize) -> Self {
		Self { n, counts: HashMap::new() }
	}

	/// Counts every n-gram of order `n` in `tokens`.
	pub fn from_tokens(tokens: &'a [String], n: usize) -> Self {
		let mut counts = Self::new(n);
		for ngram in extract(tokens, n) {
			counts.add(ngram);
		}
		counts
	}

	/// Records one occurrence of `ngram`.
	pub fn add(&mut self, ngram: NGram<'a>) {
		debug_assert_eq!(ngram.len(), self.n);
		*self.counts.entry(ngram).or_insert(0) += 1;
	}

	/// Number of occurrences of `ngram`, 0 if never seen.
	pub fn get(&self, ngram: &[String]) -> usize {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Total number of occurrences (n-grams counted with multiplicity).
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Merges another count table into this one, keeping the maximum count.
	///
	/// Used to build the per n-gram maximum over several references.
	pub fn merge_max(&mut self, other: &Self) {
		debug_assert_eq!(self.n, other.n);
		for (ngram, count) in &other.counts {
			let existing = self.counts.entry(*ngram).or_insert(0);
			*existing = (*existing).max(*count);
		}
	}

	/// Number of occurrences credited against `reference`.
	///
	/// Each n-gram is credited `min(own count, reference count)` times.
	pub fn clipped_matches(&self, reference: &NGramCounts<'_>) -> usize {
		self.counts
			.iter()
			.map(|(ngram, count)| (*count).min(reference.get(ngram)))
			.sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn extract_slides_a_window() {
		let tokens = words("a b c d");
		let bigrams = extract(&tokens, 2);
		assert_eq!(bigrams.len(), 3);
		assert_eq!(bigrams[0], ["a", "b"]);
		assert_eq!(bigrams[2], ["c", "d"]);
	}

	#[test]
	fn extract_short_sequences_are_empty() {
		let tokens = words("a b c");
		assert!(extract(&tokens, 4).is_empty());
		assert!(extract(&tokens, 0).is_empty());
		assert_eq!(extract(&tokens, 3).len(), 1);
	}

	#[test]
	fn counts_keep_multiplicity() {
		let tokens = words("the cat and the hat");
		let counts = NGramCounts::from_tokens(&tokens, 1);
		assert_eq!(counts.get(&words("the")), 2);
		assert_eq!(counts.get(&words("dog")), 0);
		assert_eq!(counts.total(), 5);
	}

	#[test]
	fn merge_max_keeps_the_largest_count() {
		let first = words("the the cat");
		let second = words("the dog dog");
		let mut merged = NGramCounts::from_tokens(&first, 1);
		merged.merge_max(&NGramCounts::from_tokens(&second, 1));
		assert_eq!(merged.get(&words("the")), 2);
		assert_eq!(merged.get(&words("cat")), 1);
		assert_eq!(merged.get(&words("dog")), 2);
	}

	#[test]
	fn clipping_caps_at_reference_count() {
		let candidate = words("the the the the");
		let reference = words("the cat the");
		let candidate_counts = NGramCounts::from_tokens(&candidate, 1);
		let reference_counts = NGramCounts::from_tokens(&reference, 1);
		assert_eq!(candidate_counts.clipped_matches(&reference_counts), 2);
	}
}
