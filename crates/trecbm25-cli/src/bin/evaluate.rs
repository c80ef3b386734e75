//! Evaluates a TREC run file against a qrels file and appends per-topic
//! and mean AP / P@10 / NDCG@10 / NDCG@1000 to a derived metrics file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use trecbm25_cli::ui::{ColorMode, MessageType, Style};
use trecbm25_cli::validate::require_absolute;
use trecbm25_core::{evaluate, EngineError, EvaluationReport};

/// Scores a run file against relevance judgments.
#[derive(Parser, Debug)]
#[command(name = "evaluate", author, version, about)]
struct Cli {
    /// Absolute path to the qrels (relevance judgment) file.
    qrels_file_path: PathBuf,

    /// Absolute path to the TREC run file to evaluate.
    run_file_path: PathBuf,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output mode: always, never, or auto.
    #[arg(long, global = true, default_value = "auto")]
    color: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    trecbm25_cli::init_tracing(cli.verbose);
    let style = Style::new(ColorMode::from_str(&cli.color).unwrap_or(ColorMode::Auto));

    match run(&cli) {
        Ok((report, output_path)) => {
            print!("{}", report.render());
            println!(
                "{}",
                style.message(MessageType::Ok, "evaluation complete")
            );
            println!("{}", style.message_detail("metrics file", &output_path.display().to_string()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", style.error_with_hint(&e.to_string(), None));
            ExitCode::FAILURE
        }
    }
}

/// Derives the metrics filename from the run file's basename, matching the
/// original evaluator: `run1.txt` → `run1_results.txt`, written (appended)
/// in the current working directory.
fn metrics_output_path(run_file_path: &Path) -> PathBuf {
    let stem = run_file_path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .unwrap_or("run");
    PathBuf::from(format!("{stem}_results.txt"))
}

fn run(cli: &Cli) -> Result<(EvaluationReport, PathBuf), EngineError> {
    require_absolute(&cli.qrels_file_path)?;
    require_absolute(&cli.run_file_path)?;

    let report = evaluate(&cli.qrels_file_path, &cli.run_file_path)?;

    let output_path = metrics_output_path(&cli.run_file_path);
    let mut file = OpenOptions::new().create(true).append(true).open(&output_path)?;
    file.write_all(report.render().as_bytes())?;

    Ok((report, output_path))
}
