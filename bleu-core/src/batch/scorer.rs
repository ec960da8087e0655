use std::fmt;
use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use log::{debug, error, info, warn};

use crate::bleu::result::ScoreResult;
use crate::bleu::score_tokens;
use crate::bleu::tokenizer::TokenSequence;
use crate::error::{BleuError, Result, SinkError};
use super::sink::{ResultSink, RunRecord};
use super::source::{SourceRole, Text, TextSource};

/// Score of one candidate inside a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateScore {
	/// File base name or positional label of the candidate.
	pub id: String,
	pub score: ScoreResult,
}

/// Scores of a whole batch, in candidate input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
	entries: Vec<CandidateScore>,
}

impl BatchReport {
	/// Returns the score of the first candidate named `id`.
	pub fn get(&self, id: &str) -> Option<&ScoreResult> {
		self.entries.iter().find(|entry| entry.id == id).map(|entry| &entry.score)
	}

	pub fn iter(&self) -> impl Iterator<Item = &CandidateScore> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// `(id, formatted summary)` pairs in input order.
	pub fn summaries(&self) -> impl Iterator<Item = (&str, String)> {
		self.entries.iter().map(|entry| (entry.id.as_str(), entry.score.to_string()))
	}
}

impl fmt::Display for BatchReport {
	/// One `id: summary` line per candidate.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, (id, summary)) in self.summaries().enumerate() {
			if i > 0 {
				writeln!(f)?;
			}
			write!(f, "{id}: {summary}")?;
		}
		Ok(())
	}
}

/// Result of a batch run.
///
/// Scoring and recording fail independently: `scores` holds either the full
/// report or the reason the batch was abandoned, `sink_error` tells whether
/// the run record could be stored.
#[derive(Debug)]
#[must_use]
pub struct BatchOutcome {
	pub scores: Result<BatchReport>,
	pub sink_error: Option<SinkError>,
}

impl BatchOutcome {
	/// Drops the recording status and returns the scoring result.
	pub fn into_scores(self) -> Result<BatchReport> {
		self.scores
	}
}

/// Scores candidate texts against a fixed reference set.
///
/// # Behavior
/// - Resolves every reference and candidate before scoring
/// - Scores each candidate against all references jointly
/// - Abandons the batch on the first failure (no partial report)
/// - Calls the sink exactly once, after success or failure
///
/// Candidates may be scored on worker threads with `parallel(true)`;
/// results and failure reporting keep input order.
#[derive(Clone, Debug)]
pub struct BatchScorer {
	references: Vec<TextSource>,
	parallel: bool,
}

impl BatchScorer {
	pub fn new(references: Vec<TextSource>) -> Self {
		Self { references, parallel: false }
	}

	/// Enables or disables multithreaded scoring.
	pub fn parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}

	/// Scores every candidate and reports the run to `sink`.
	pub fn score(&self, candidates: &[TextSource], sink: &mut dyn ResultSink) -> BatchOutcome {
		let started_at = Utc::now();
		let reference_ids = identifiers(&self.references, SourceRole::Reference);
		let candidate_ids = identifiers(candidates, SourceRole::Candidate);

		let scores = self.run(candidates, &reference_ids, &candidate_ids);
		let finished_at = Utc::now();

		let record = match &scores {
			Ok(report) => {
				info!("Scored {} candidate(s) against {} reference(s)", report.len(), reference_ids.len());
				RunRecord::success(started_at, finished_at, reference_ids, candidate_ids, report.to_string())
			}
			Err(e) => {
				error!("BLEU batch abandoned: {e}");
				RunRecord::failure(started_at, finished_at, reference_ids, candidate_ids, e.to_string())
			}
		};

		let sink_error = sink.record(&record).err();
		if let Some(e) = &sink_error {
			warn!("Failed to record BLEU run: {e}");
		}

		BatchOutcome { scores, sink_error }
	}

	fn run(&self, candidates: &[TextSource], reference_ids: &[String], candidate_ids: &[String]) -> Result<BatchReport> {
		if self.references.is_empty() {
			return Err(BleuError::NoReferences);
		}

		let references = resolve_all(&self.references, reference_ids)?;
		let candidates = resolve_all(candidates, candidate_ids)?;

		let reference_tokens: Vec<TokenSequence> = references
			.iter()
			.map(|reference| TokenSequence::new(reference.content()))
			.collect();

		let entries = if self.parallel {
			score_parallel(&candidates, &reference_tokens)?
		} else {
			candidates
				.iter()
				.map(|candidate| score_candidate(candidate, &reference_tokens))
				.collect::<Result<Vec<_>>>()?
		};

		Ok(BatchReport { entries })
	}
}

fn identifiers(sources: &[TextSource], role: SourceRole) -> Vec<String> {
	sources
		.iter()
		.enumerate()
		.map(|(i, source)| source.identifier(role, i))
		.collect()
}

fn resolve_all(sources: &[TextSource], ids: &[String]) -> Result<Vec<Text>> {
	sources.iter().zip(ids).map(|(source, id)| source.resolve(id.as_str())).collect()
}

fn score_candidate(candidate: &Text, references: &[TokenSequence]) -> Result<CandidateScore> {
	let tokens = TokenSequence::new(candidate.content());
	let score = score_tokens(&tokens, references).map_err(|source| BleuError::Scoring {
		candidate: candidate.id().to_owned(),
		source: Box::new(source),
	})?;
	debug!("{}: {}", candidate.id(), score);
	Ok(CandidateScore { id: candidate.id().to_owned(), score })
}

/// Splits candidates into one chunk per CPU and scores the chunks on scoped threads.
///
/// Chunks are reassembled by index, so the first failure in input order wins.
fn score_parallel(candidates: &[Text], references: &[TokenSequence]) -> Result<Vec<CandidateScore>> {
	if candidates.is_empty() {
		return Ok(Vec::new());
	}
	let chunk_size = candidates.len().div_ceil(num_cpus::get().max(1));

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for (index, chunk) in candidates.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			scope.spawn(move || {
				let scored: Vec<Result<CandidateScore>> = chunk
					.iter()
					.map(|candidate| score_candidate(candidate, references))
					.collect();
				// The receiver outlives the scope
				let _ = tx.send((index, scored));
			});
		}
	});
	drop(tx);

	let mut chunks: Vec<(usize, Vec<Result<CandidateScore>>)> = rx.iter().collect();
	chunks.sort_by_key(|(index, _)| *index);
	chunks.into_iter().flat_map(|(_, scored)| scored).collect()
}
