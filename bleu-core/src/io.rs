use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::env;

/// File extensions accepted for uploaded texts.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["txt", "doc"];

/// Reads a UTF-8 text file and strips surrounding whitespace.
///
/// - Reads the entire file into memory
/// - Fails with `InvalidData` if the content is not UTF-8
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents.trim().to_owned())
}

/// Extracts the base file name, extension included.
///
/// Examples:
/// - `"./data/hyp_1.txt"` → `"hyp_1.txt"`
/// - `"hyp_1.txt"` → `"hyp_1.txt"`
pub fn source_name<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let name = input_path
		.as_ref()
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(name.to_string_lossy().to_string())
}

/// Reduces a client supplied file name to a safe, flat name.
///
/// - Path separators become word breaks, so no directory can be addressed
/// - Whitespace runs are joined with `_`
/// - Only ASCII alphanumerics, `_`, `.` and `-` are kept
/// - Leading and trailing `.`/`_` are removed
///
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
	let flattened = filename.replace(['/', '\\'], " ");
	let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
	let kept: String = joined
		.chars()
		.filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
		.collect();
	let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

	if trimmed.is_empty() {
		None
	} else {
		Some(trimmed.to_owned())
	}
}

/// Lowercased extension of `filename` if it is one of `ALLOWED_EXTENSIONS`.
pub fn allowed_extension(filename: &str) -> Option<String> {
	Path::new(filename)
		.extension()
		.map(|ext| ext.to_string_lossy().to_ascii_lowercase())
		.filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Returns `true` if the file name ends with one of `ALLOWED_EXTENSIONS`.
///
/// The comparison ignores ASCII case.
pub fn has_allowed_extension(filename: &str) -> bool {
	allowed_extension(filename).is_some()
}

/// Whether `value` reads like a file path rather than a sentence:
/// a single word containing a path separator or ending with an allowed extension.
pub fn looks_like_path(value: &str) -> bool {
	!value.is_empty()
		&& !value.contains(char::is_whitespace)
		&& (value.contains(['/', '\\']) || has_allowed_extension(value))
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}
