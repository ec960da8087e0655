use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{BleuError, Result};
use crate::io::{looks_like_path, read_text, source_name};

/// Role of a text inside a batch, used to label inline texts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceRole {
	Reference,
	Candidate,
}

impl SourceRole {
	fn label(self) -> &'static str {
		match self {
			Self::Reference => "Reference",
			Self::Candidate => "Translation",
		}
	}
}

/// Where a text comes from.
///
/// The scorer only ever sees resolved strings; the source decides how the
/// string is obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextSource {
	/// Text given directly.
	Inline(String),
	/// UTF-8 file, read and trimmed on resolution.
	File(PathBuf),
}

impl TextSource {
	pub fn inline(text: impl Into<String>) -> Self {
		Self::Inline(text.into())
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self::File(path.into())
	}

	/// Treats `value` as a file path if such a file exists, inline text otherwise.
	///
	/// A value that reads like a path but names no file is still scored as
	/// text; a warning is logged since it is most likely a mistyped path.
	pub fn detect(value: &str) -> Self {
		if Path::new(value).is_file() {
			return Self::file(value);
		}
		if looks_like_path(value) {
			warn!("'{value}' looks like a path but no such file exists, scoring it as inline text");
		}
		Self::inline(value)
	}

	/// Identifier used in reports and run records.
	///
	/// - files: base name (`data/hyp_1.txt` → `hyp_1.txt`)
	/// - inline texts: positional label (`Translation 2`, `Reference 1`)
	pub fn identifier(&self, role: SourceRole, position: usize) -> String {
		match self {
			Self::File(path) => source_name(path).unwrap_or_else(|_| path.display().to_string()),
			Self::Inline(_) => format!("{} {}", role.label(), position + 1),
		}
	}

	/// Loads the text.
	///
	/// # Errors
	/// Returns `InputLoad` if the file cannot be read or is not UTF-8.
	pub fn resolve(&self, id: impl Into<String>) -> Result<Text> {
		let id = id.into();
		let content = match self {
			Self::Inline(text) => text.clone(),
			Self::File(path) => read_text(path).map_err(|source| BleuError::InputLoad {
				source_id: id.clone(),
				source,
			})?,
		};
		Ok(Text { id, content })
	}
}

/// A resolved text and its identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
	id: String,
	content: String,
}

impl Text {
	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn content(&self) -> &str {
		&self.content
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn identifiers_use_base_name_or_position() {
		let file = TextSource::file("data/hyp_1.txt");
		assert_eq!(file.identifier(SourceRole::Candidate, 0), "hyp_1.txt");
		let inline = TextSource::inline("the cat");
		assert_eq!(inline.identifier(SourceRole::Candidate, 1), "Translation 2");
		assert_eq!(inline.identifier(SourceRole::Reference, 0), "Reference 1");
	}

	#[test]
	fn detect_distinguishes_files_from_text() {
		let file = tempfile::NamedTempFile::new().unwrap();
		let path = file.path().to_str().unwrap();
		assert_eq!(TextSource::detect(path), TextSource::file(path));
		assert_eq!(TextSource::detect("the cat sat"), TextSource::inline("the cat sat"));
	}

	#[test]
	fn missing_path_falls_back_to_inline_text() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("hyp_2.txt");
		let value = missing.to_str().unwrap();
		assert_eq!(TextSource::detect(value), TextSource::inline(value));
	}

	#[test]
	fn resolve_reads_and_trims_files() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "  the cat sat  ").unwrap();
		let text = TextSource::file(file.path()).resolve("ref.txt").unwrap();
		assert_eq!(text.id(), "ref.txt");
		assert_eq!(text.content(), "the cat sat");
	}

	#[test]
	fn resolve_keeps_inline_text_untouched() {
		let text = TextSource::inline(" the cat ").resolve("Translation 1").unwrap();
		assert_eq!(text.content(), " the cat ");
	}

	#[test]
	fn resolve_reports_missing_files() {
		let dir = tempfile::tempdir().unwrap();
		let err = TextSource::file(dir.path().join("missing.txt")).resolve("missing.txt").unwrap_err();
		match err {
			BleuError::InputLoad { source_id, .. } => assert_eq!(source_id, "missing.txt"),
			other => panic!("unexpected error: {other}"),
		}
	}
}
