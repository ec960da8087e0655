use std::path::PathBuf;

use bleu_core::io::normalize_folder;
use bleu_core::{JournalSink, LogSink, ResultSink};
use clap::Parser;

/// Server settings, read from the command line or `BLEU_*` environment variables.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "bleu-server", version, about = "HTTP front end for BLEU scoring")]
pub struct ServerConfig {
	/// Address to bind
	#[arg(long, env = "BLEU_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to bind
	#[arg(long, env = "BLEU_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Folder receiving uploaded texts while they are scored
	#[arg(long, env = "BLEU_UPLOAD_DIR", default_value = "./temp")]
	pub upload_dir: String,

	/// Journal file for run records; runs are only logged when absent
	#[arg(long, env = "BLEU_JOURNAL")]
	pub journal: Option<PathBuf>,
}

impl ServerConfig {
	/// Upload folder, `"."` resolving to the working directory.
	pub fn upload_folder(&self) -> PathBuf {
		normalize_folder(&self.upload_dir)
	}

	/// Result sink selected by the configuration.
	pub fn sink(&self) -> Box<dyn ResultSink + Send> {
		match &self.journal {
			Some(path) => Box::new(JournalSink::new(path)),
			None => Box::new(LogSink),
		}
	}
}
