use std::sync::LazyLock;

use regex::Regex;

use super::ngram::NGramCounts;

/// A word followed by an English clitic (`'s`, `'re`, `'ve`, `'ll`, `'d`, `'m`, `n't`).
// Literal pattern, compiling it cannot fail
static CLITIC: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^(.+?)(['’](?:s|re|ve|ll|d|m)|n['’]t)$").unwrap());

/// A clitic standing on its own, which must not lose its apostrophe.
static BARE_CLITIC: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^['’](?:s|re|ve|ll|d|m)$").unwrap());

/// Punctuation and symbol characters; combining marks stay with their letter.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{P}\p{S}]$").unwrap());

const ELLIPSIS: &str = "...";

/// An ordered sequence of word and punctuation tokens.
///
/// Produced once per text and discarded after scoring. Order and
/// duplicates are preserved; no case or accent normalization is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSequence {
	tokens: Vec<String>,
}

impl TokenSequence {
	/// Tokenizes `text`.
	pub fn new(text: &str) -> Self {
		Self { tokens: tokenize(text) }
	}

	/// Number of tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Occurrence counts of every n-gram of order `n`.
	pub fn counts(&self, n: usize) -> NGramCounts<'_> {
		NGramCounts::from_tokens(&self.tokens, n)
	}
}

/// Splits a text into word and punctuation tokens.
///
/// - Whitespace separates chunks
/// - Leading and trailing punctuation of a chunk become separate tokens,
///   `...` staying together
/// - Clitics are split from their word: `don't` → `do`, `n't`
/// - Punctuation inside a word (`e-mail`, `3.14`) is kept
pub fn tokenize(text: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	for chunk in text.split_whitespace() {
		split_chunk(chunk, &mut tokens);
	}
	tokens
}

fn is_punctuation(c: char) -> bool {
	PUNCTUATION.is_match(c.encode_utf8(&mut [0; 4]))
}

fn split_chunk(chunk: &str, tokens: &mut Vec<String>) {
	let mut rest = chunk;

	// Trailing punctuation, collected from the end
	let mut trailing = Vec::new();
	while let Some(last) = rest.chars().next_back().filter(|c| is_punctuation(*c)) {
		let len = if rest.ends_with(ELLIPSIS) { ELLIPSIS.len() } else { last.len_utf8() };
		let split = rest.len() - len;
		trailing.push(&rest[split..]);
		rest = &rest[..split];
	}

	// Leading punctuation, unless what remains is a clitic on its own
	while !BARE_CLITIC.is_match(rest) {
		let Some(first) = rest.chars().next().filter(|c| is_punctuation(*c)) else {
			break;
		};
		let len = if rest.starts_with(ELLIPSIS) { ELLIPSIS.len() } else { first.len_utf8() };
		tokens.push(rest[..len].to_owned());
		rest = &rest[len..];
	}

	if !rest.is_empty() {
		match CLITIC.captures(rest) {
			Some(caps) => {
				tokens.push(caps[1].to_owned());
				tokens.push(caps[2].to_owned());
			}
			None => tokens.push(rest.to_owned()),
		}
	}

	tokens.extend(trailing.into_iter().rev().map(str::to_owned));
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<String> {
		tokenize(text)
	}

	#[test]
	fn splits_on_whitespace() {
		assert_eq!(tokens("the cat\tsat\non  the mat"), ["the", "cat", "sat", "on", "the", "mat"]);
	}

	#[test]
	fn separates_punctuation() {
		assert_eq!(tokens("Hello, world!"), ["Hello", ",", "world", "!"]);
		assert_eq!(tokens("(see above)"), ["(", "see", "above", ")"]);
		assert_eq!(tokens("\"Stop?!\""), ["\"", "Stop", "?", "!", "\""]);
	}

	#[test]
	fn splits_clitics() {
		assert_eq!(tokens("word's,"), ["word", "'s", ","]);
		assert_eq!(tokens("don't"), ["do", "n't"]);
		assert_eq!(tokens("We'll see"), ["We", "'ll", "see"]);
		assert_eq!(tokens("It’s"), ["It", "’s"]);
		assert_eq!(tokens("'s"), ["'s"]);
		assert_eq!(tokens("'s."), ["'s", "."]);
		assert_eq!(tokens("(’s)"), ["(", "’s", ")"]);
	}

	#[test]
	fn keeps_inner_punctuation() {
		assert_eq!(tokens("e-mail 3.14 is pi."), ["e-mail", "3.14", "is", "pi", "."]);
	}

	#[test]
	fn keeps_ellipsis_together() {
		assert_eq!(tokens("Wait... what?"), ["Wait", "...", "what", "?"]);
		assert_eq!(tokens("...and"), ["...", "and"]);
	}

	#[test]
	fn preserves_case_and_duplicates() {
		assert_eq!(tokens("The the THE"), ["The", "the", "THE"]);
	}

	#[test]
	fn handles_non_ascii_words() {
		assert_eq!(tokens("Пациент здоров."), ["Пациент", "здоров", "."]);
	}

	#[test]
	fn combining_marks_stay_attached() {
		assert_eq!(tokens("cafe\u{301} ouvert"), ["cafe\u{301}", "ouvert"]);
		assert_eq!(tokens("«cafe\u{301}»"), ["«", "cafe\u{301}", "»"]);
	}

	#[test]
	fn blank_text_has_no_tokens() {
		assert!(tokens("").is_empty());
		assert!(TokenSequence::new(" \n\t ").is_empty());
	}

	#[test]
	fn is_deterministic() {
		let text = "Isn't it the patient's (second) visit...?";
		assert_eq!(tokens(text), tokens(text));
		assert_eq!(tokens(text), ["Is", "n't", "it", "the", "patient", "'s", "(", "second", ")", "visit", "...", "?"]);
	}
}
