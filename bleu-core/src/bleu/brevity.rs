use crate::error::{BleuError, Result};

/// Picks the reference length closest to `candidate_len`.
///
/// Ties are broken in favour of the shorter reference.
/// Returns `None` if there is no reference.
pub fn closest_reference_length(candidate_len: usize, reference_lens: &[usize]) -> Option<usize> {
	reference_lens
		.iter()
		.copied()
		.min_by_key(|&reference_len| (reference_len.abs_diff(candidate_len), reference_len))
}

/// Brevity penalty for a candidate of `candidate_len` tokens.
///
/// - `exp(1 - r / c)` when the candidate is shorter than the reference
/// - 1.0 otherwise
///
/// # Errors
/// Returns `EmptyCandidate` if `candidate_len` is 0.
pub fn brevity_penalty(candidate_len: usize, reference_len: usize) -> Result<f64> {
	if candidate_len == 0 {
		return Err(BleuError::EmptyCandidate);
	}
	if candidate_len < reference_len {
		Ok((1.0 - reference_len as f64 / candidate_len as f64).exp())
	} else {
		Ok(1.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	#[test]
	fn closest_prefers_the_shorter_on_ties() {
		assert_eq!(closest_reference_length(5, &[6, 4]), Some(4));
		assert_eq!(closest_reference_length(5, &[4, 6]), Some(4));
		assert_eq!(closest_reference_length(5, &[9, 7, 2]), Some(7));
		assert_eq!(closest_reference_length(5, &[]), None);
	}

	#[test]
	fn shorter_candidate_is_penalized() {
		let penalty = brevity_penalty(3, 6).unwrap();
		assert_abs_diff_eq!(penalty, (-1.0_f64).exp(), epsilon = 1e-12);
	}

	#[test]
	fn equal_or_longer_candidate_is_not_penalized() {
		assert_eq!(brevity_penalty(6, 6).unwrap(), 1.0);
		assert_eq!(brevity_penalty(8, 6).unwrap(), 1.0);
	}

	#[test]
	fn empty_candidate_fails() {
		assert!(matches!(brevity_penalty(0, 6), Err(BleuError::EmptyCandidate)));
		assert!(matches!(brevity_penalty(0, 0), Err(BleuError::EmptyCandidate)));
	}
}
