use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::SinkError;

/// Outcome level of a recorded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
	Info,
	Error,
}

/// Record of one batch computation, successful or not.
///
/// Exactly one record is produced per batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
	pub status: RunStatus,
	pub started_at: DateTime<Utc>,
	pub finished_at: DateTime<Utc>,
	/// Identifiers of the reference texts, in input order.
	pub reference_sources: Vec<String>,
	/// Identifiers of the candidate texts, in input order.
	pub candidate_sources: Vec<String>,
	/// Formatted report, or a short failure notice.
	pub results: String,
	/// Failure reason, `None` on success.
	pub error_details: Option<String>,
}

impl RunRecord {
	/// Record of a successful batch.
	pub fn success(
		started_at: DateTime<Utc>,
		finished_at: DateTime<Utc>,
		reference_sources: Vec<String>,
		candidate_sources: Vec<String>,
		results: String,
	) -> Self {
		Self {
			status: RunStatus::Info,
			started_at,
			finished_at,
			reference_sources,
			candidate_sources,
			results,
			error_details: None,
		}
	}

	/// Record of a failed batch.
	pub fn failure(
		started_at: DateTime<Utc>,
		finished_at: DateTime<Utc>,
		reference_sources: Vec<String>,
		candidate_sources: Vec<String>,
		error_details: String,
	) -> Self {
		Self {
			status: RunStatus::Error,
			started_at,
			finished_at,
			reference_sources,
			candidate_sources,
			results: "BLEU computation failed".to_owned(),
			error_details: Some(error_details),
		}
	}

	/// Wall-clock time spent on the batch.
	pub fn duration(&self) -> TimeDelta {
		self.finished_at - self.started_at
	}
}

/// Capability to record a completed or failed computation.
///
/// Injected into the batch scorer, which calls `record` exactly once per batch.
pub trait ResultSink {
	/// Stores `record`.
	///
	/// # Errors
	/// Returns a `SinkError` if the record could not be stored. The scoring
	/// outcome it describes is not affected.
	fn record(&mut self, record: &RunRecord) -> Result<(), SinkError>;
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
	fn record(&mut self, record: &RunRecord) -> Result<(), SinkError> {
		(**self).record(record)
	}
}

/// Writes run records through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl ResultSink for LogSink {
	fn record(&mut self, record: &RunRecord) -> Result<(), SinkError> {
		let seconds = record.duration().num_milliseconds() as f64 / 1000.0;
		match (&record.status, &record.error_details) {
			(RunStatus::Error, Some(details)) => error!(
				"BLEU run failed after {seconds:.3}s, references [{}], candidates [{}]: {details}",
				record.reference_sources.join(","),
				record.candidate_sources.join(",")
			),
			_ => info!(
				"BLEU run finished in {seconds:.3}s, references [{}], candidates [{}]: {}",
				record.reference_sources.join(","),
				record.candidate_sources.join(","),
				record.results
			),
		}
		Ok(())
	}
}

/// Keeps run records in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
	records: Vec<RunRecord>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records received so far, oldest first.
	pub fn records(&self) -> &[RunRecord] {
		&self.records
	}
}

impl ResultSink for MemorySink {
	fn record(&mut self, record: &RunRecord) -> Result<(), SinkError> {
		self.records.push(record.clone());
		Ok(())
	}
}

/// Appends run records to a journal file.
///
/// Each record is a `postcard` message framed with COBS, so the file is a
/// sequence of zero-terminated frames that can be appended to without
/// rewriting.
#[derive(Clone, Debug)]
pub struct JournalSink {
	path: PathBuf,
}

impl JournalSink {
	/// Creates a sink writing to `path`. The file is created on first record.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Reads every record stored in the journal at `path`, oldest first.
	///
	/// # Errors
	/// Fails if the file cannot be read or a frame cannot be decoded.
	pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<RunRecord>, SinkError> {
		let mut bytes = match fs::read(path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
			Err(e) => return Err(e.into()),
		};

		let mut records = Vec::new();
		for frame in bytes.split_inclusive_mut(|b| *b == 0) {
			if frame == [0] {
				continue;
			}
			records.push(postcard::from_bytes_cobs(frame)?);
		}
		Ok(records)
	}
}

impl ResultSink for JournalSink {
	fn record(&mut self, record: &RunRecord) -> Result<(), SinkError> {
		let frame = postcard::to_stdvec_cobs(record)?;
		let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
		file.write_all(&frame)?;
		file.flush()?;
		Ok(())
	}
}
