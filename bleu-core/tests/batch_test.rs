//! Integration tests for file-based batch scoring

use std::fs;
use std::path::PathBuf;

use bleu_core::{BatchScorer, BleuError, JournalSink, MemorySink, RunStatus, TextSource};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
	let path = dir.path().join(name);
	fs::write(&path, content).expect("write fixture");
	path
}

#[test]
fn test_files_are_identified_by_base_name() {
	let dir = TempDir::new().unwrap();
	let reference = write(&dir, "ref_1_medicine.txt", "The patient was given a dose of the drug.\n");
	let hyp_a = write(&dir, "hyp_1_1.txt", "\n The patient was given a dose of the drug. \n");
	let hyp_b = write(&dir, "hyp_1_2.txt", "A dose of the drug was given to the patient.");

	let scorer = BatchScorer::new(vec![TextSource::file(&reference)]);
	let mut sink = MemorySink::new();
	let report = scorer
		.score(&[TextSource::file(&hyp_a), TextSource::file(&hyp_b)], &mut sink)
		.into_scores()
		.expect("batch should succeed");

	assert_eq!(report.len(), 2);
	let exact = report.get("hyp_1_1.txt").unwrap();
	assert_eq!(exact.bleu(), 1.0);
	assert_eq!(exact.candidate_length(), 10);
	assert!(report.get("hyp_1_2.txt").unwrap().bleu() < 1.0);

	let record = &sink.records()[0];
	assert_eq!(record.reference_sources, ["ref_1_medicine.txt"]);
	assert_eq!(record.candidate_sources, ["hyp_1_1.txt", "hyp_1_2.txt"]);
}

#[test]
fn test_unreadable_second_candidate_fails_the_whole_batch() {
	let dir = TempDir::new().unwrap();
	let reference = write(&dir, "ref.txt", "the cat sat on the mat");
	let first = write(&dir, "hyp_1.txt", "the cat sat on the mat");
	let third = write(&dir, "hyp_3.txt", "a cat sat on the mat");

	let candidates = [
		TextSource::file(&first),
		TextSource::file(dir.path().join("hyp_2.txt")),
		TextSource::file(&third),
	];
	let journal = dir.path().join("runs.journal");
	let mut sink = JournalSink::new(&journal);

	let outcome = BatchScorer::new(vec![TextSource::file(&reference)]).score(&candidates, &mut sink);
	assert!(outcome.sink_error.is_none());
	match outcome.scores {
		Err(BleuError::InputLoad { source_id, .. }) => assert_eq!(source_id, "hyp_2.txt"),
		other => panic!("expected an input load failure, got {other:?}"),
	}

	let records = JournalSink::read_all(&journal).unwrap();
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].status, RunStatus::Error);
	assert!(records[0].error_details.as_deref().unwrap().contains("hyp_2.txt"));
	assert_eq!(records[0].candidate_sources, ["hyp_1.txt", "hyp_2.txt", "hyp_3.txt"]);
}

#[test]
fn test_non_utf8_reference_is_an_input_error() {
	let dir = TempDir::new().unwrap();
	let reference = dir.path().join("ref.txt");
	fs::write(&reference, [0xc3, 0x28, 0xa0, 0xa1]).unwrap();

	let outcome = BatchScorer::new(vec![TextSource::file(&reference)])
		.score(&[TextSource::inline("the cat")], &mut MemorySink::new());
	assert!(matches!(outcome.scores, Err(BleuError::InputLoad { .. })));
}

#[test]
fn test_mixed_inline_and_file_sources() {
	let dir = TempDir::new().unwrap();
	let reference = write(&dir, "ref.txt", "the cat sat on the mat");

	let report = BatchScorer::new(vec![TextSource::file(&reference), TextSource::inline("the cat is on the mat")])
		.score(&[TextSource::inline("the cat is on the mat")], &mut MemorySink::new())
		.into_scores()
		.unwrap();
	assert_eq!(report.get("Translation 1").unwrap().bleu(), 1.0);
}

#[test]
fn test_journal_accumulates_runs() {
	let dir = TempDir::new().unwrap();
	let journal = dir.path().join("runs.journal");
	let mut sink = JournalSink::new(&journal);
	let scorer = BatchScorer::new(vec![TextSource::inline("the cat sat on the mat")]);

	let _ = scorer.score(&[TextSource::inline("the cat sat on the mat")], &mut sink);
	let _ = scorer.score(&[TextSource::inline("")], &mut sink);
	let _ = scorer.score(&[TextSource::inline("the cat sat on a mat")], &mut sink);

	let statuses: Vec<RunStatus> = JournalSink::read_all(&journal)
		.unwrap()
		.iter()
		.map(|record| record.status)
		.collect();
	assert_eq!(statuses, [RunStatus::Info, RunStatus::Error, RunStatus::Info]);
}
