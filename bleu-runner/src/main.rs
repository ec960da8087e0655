use std::path::PathBuf;

use bleu_core::{BatchScorer, JournalSink, LogSink, ResultSink, TextSource};
use clap::Parser;

/// Scores machine translations against reference translations.
///
/// Every value is read as a file if such a file exists, otherwise it is
/// scored as inline text (with a warning when it looks like a path).
#[derive(Parser, Debug)]
#[command(name = "bleu-runner", version)]
struct Args {
    /// Reference translation (file or text), repeatable
    #[arg(short, long = "reference", required = true)]
    references: Vec<String>,

    /// Candidate translation (file or text), repeatable
    #[arg(short, long = "candidate", required = true)]
    candidates: Vec<String>,

    /// Append the run record to this journal instead of only logging it
    #[arg(long, env = "BLEU_JOURNAL")]
    journal: Option<PathBuf>,

    /// Score candidates on all CPU cores
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // The journal keeps a durable record, the log sink only reports
    let mut sink: Box<dyn ResultSink> = match &args.journal {
        Some(path) => Box::new(JournalSink::new(path)),
        None => Box::new(LogSink),
    };

    let references: Vec<TextSource> = args.references.iter().map(|r| TextSource::detect(r)).collect();
    let candidates: Vec<TextSource> = args.candidates.iter().map(|c| TextSource::detect(c)).collect();

    let outcome = BatchScorer::new(references)
        .parallel(args.parallel)
        .score(&candidates, sink.as_mut());

    // Fails the whole run, no partial report is printed
    let report = outcome.into_scores()?;
    for (id, summary) in report.summaries() {
        println!("Statistics for '{id}': {summary}");
    }

    Ok(())
}
