use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder, ResponseError};
use clap::Parser;
use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use bleu_core::io::{allowed_extension, has_allowed_extension, sanitize_filename, ALLOWED_EXTENSIONS};
use bleu_core::{BatchReport, BatchScorer, BleuError, ResultSink, TextSource};

use crate::config::ServerConfig;

mod config;

/// Longest candidate identifier shown in a report line.
const MAX_KEY_LEN: usize = 30;

/// Upper bound for a JSON request body.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// One text of a `/v1/score` request: inline text or an uploaded file.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum TextInput {
	Upload { filename: String, content: String },
	Inline { text: String },
}

/// Body of the `/v1/score` endpoint
#[derive(Deserialize, Debug)]
struct ScoreRequest {
	#[serde(default)]
	references: Vec<TextInput>,
	#[serde(default)]
	candidates: Vec<TextInput>,
}

struct SharedData {
	sink: Mutex<Box<dyn ResultSink + Send>>,
	upload_dir: PathBuf,
}

/// Reasons an uploaded file cannot be staged.
#[derive(Debug, Error)]
enum UploadError {
	#[error("Unsupported file type: {0} (allowed: {allowed})", allowed = ALLOWED_EXTENSIONS.join(", "))]
	UnsupportedType(String),

	#[error("Duplicate file name: {0}")]
	Duplicate(String),

	#[error("Failed to store {name}: {source}")]
	Store {
		name: String,
		#[source]
		source: std::io::Error,
	},
}

impl ResponseError for UploadError {
	fn status_code(&self) -> StatusCode {
		match self {
			Self::UnsupportedType(_) | Self::Duplicate(_) => StatusCode::BAD_REQUEST,
			Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

/// Uploaded files of a single request.
///
/// Each request writes into its own folder, removed with everything in it
/// when the value is dropped, whatever the outcome of the request.
struct StagedUploads {
	folder: PathBuf,
	names: Vec<String>,
}

impl StagedUploads {
	fn new(upload_dir: &Path) -> std::io::Result<Self> {
		let id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
		let folder = upload_dir.join(format!("request-{}-{id}", std::process::id()));
		fs::create_dir_all(&folder)?;
		Ok(Self { folder, names: Vec::new() })
	}

	/// Converts request inputs to text sources, writing uploads to disk.
	///
	/// Blank inline texts and uploads without a file name are skipped. The
	/// extension is checked on the name sent by the client; a name that loses
	/// its stem when sanitized is replaced by `upload-<n>.<ext>`.
	fn stage(&mut self, inputs: &[TextInput]) -> Result<Vec<TextSource>, UploadError> {
		let mut sources = Vec::new();
		for input in inputs {
			match input {
				TextInput::Inline { text } if text.trim().is_empty() => (),
				TextInput::Inline { text } => sources.push(TextSource::inline(text.as_str())),
				TextInput::Upload { filename, .. } if filename.is_empty() => (),
				TextInput::Upload { filename, content } => {
					let ext = allowed_extension(filename)
						.ok_or_else(|| UploadError::UnsupportedType(filename.clone()))?;
					let name = sanitize_filename(filename)
						.filter(|name| has_allowed_extension(name))
						.unwrap_or_else(|| format!("upload-{}.{ext}", self.names.len() + 1));
					if self.names.contains(&name) {
						return Err(UploadError::Duplicate(name));
					}
					let path = self.folder.join(&name);
					if let Err(source) = fs::write(&path, content) {
						return Err(UploadError::Store { name, source });
					}
					self.names.push(name);
					sources.push(TextSource::file(path));
				}
			}
		}
		Ok(sources)
	}
}

impl Drop for StagedUploads {
	fn drop(&mut self) {
		if let Err(e) = fs::remove_dir_all(&self.folder) {
			warn!("Failed to remove uploads in {}: {e}", self.folder.display());
		}
	}
}

/// Shortens long identifiers to `MAX_KEY_LEN` characters followed by `...`.
fn format_key(key: &str) -> String {
	if key.chars().count() > MAX_KEY_LEN {
		let short: String = key.chars().take(MAX_KEY_LEN).collect();
		format!("{short}...")
	} else {
		key.to_owned()
	}
}

/// One `id: summary` line per candidate.
fn format_report(report: &BatchReport) -> String {
	report
		.summaries()
		.map(|(id, summary)| format!("{}: {summary}", format_key(id)))
		.collect::<Vec<_>>()
		.join("\n")
}

/// HTTP POST endpoint `/v1/score`
///
/// Scores every candidate against all references and returns a plain-text
/// report. Uploaded files only live for the duration of the request.
#[post("/v1/score")]
async fn post_score(data: web::Data<SharedData>, request: web::Json<ScoreRequest>) -> impl Responder {
	let mut uploads = match StagedUploads::new(&data.upload_dir) {
		Ok(u) => u,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Upload folder unavailable: {e}")),
	};

	let references = match uploads.stage(&request.references) {
		Ok(r) => r,
		Err(e) => return e.error_response(),
	};
	let candidates = match uploads.stage(&request.candidates) {
		Ok(c) => c,
		Err(e) => return e.error_response(),
	};
	if references.is_empty() {
		return HttpResponse::BadRequest().body("At least one reference text is required");
	}
	if candidates.is_empty() {
		return HttpResponse::BadRequest().body("At least one candidate text is required");
	}

	let mut sink = match data.sink.lock() {
		Ok(s) => s,
		Err(_) => return HttpResponse::InternalServerError().body("Sink lock failed"),
	};
	let outcome = BatchScorer::new(references).score(&candidates, &mut **sink);
	drop(sink);

	let recorded = if outcome.sink_error.is_some() { "false" } else { "true" };
	match outcome.scores {
		Ok(report) => HttpResponse::Ok()
			.insert_header(("X-Run-Recorded", recorded))
			.body(format_report(&report)),
		Err(e @ BleuError::InputLoad { .. }) => HttpResponse::BadRequest()
			.insert_header(("X-Run-Recorded", recorded))
			.body(e.to_string()),
		Err(e) => HttpResponse::UnprocessableEntity()
			.insert_header(("X-Run-Recorded", recorded))
			.body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/info`
///
/// Describes the report returned by `/v1/score`.
#[get("/v1/info")]
async fn get_info() -> impl Responder {
	HttpResponse::Ok().body(
		"Each line reads `<candidate>: BLEU = <score>, <p1>/<p2>/<p3>/<p4> \
		 (BP = <brevity penalty>, ratio = <ref_len / hyp_len>, hyp_len = <tokens>, ref_len = <tokens>)`.\n\
		 Score and n-gram precisions are percentages. Precisions use 1- to 4-grams clipped \
		 against all references; the brevity penalty uses the reference length closest to the candidate.",
	)
}

/// Main entry point for the server.
///
/// Reads the configuration, prepares the upload folder and the run sink,
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::parse();
	let upload_dir = config.upload_folder();
	fs::create_dir_all(&upload_dir)?;

	let shared_data = web::Data::new(SharedData {
		sink: Mutex::new(config.sink()),
		upload_dir,
	});

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(Logger::default())
			.app_data(shared_data.clone())
			.app_data(web::JsonConfig::default().limit(MAX_BODY_BYTES))
			.service(post_score)
			.service(get_info)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
