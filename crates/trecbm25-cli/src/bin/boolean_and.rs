//! Runs the boolean-AND retriever over a set of topic queries and writes a
//! TREC-format run file.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use trecbm25_cli::ui::{ColorMode, MessageType, Style};
use trecbm25_cli::validate::{require_absent, require_absolute, require_boolean_index_artifacts};
use trecbm25_core::{run_boolean_and, Bm25Index, EngineError, Tokenizer};

/// Intersects posting lists for a fixed set of topic queries.
#[derive(Parser, Debug)]
#[command(name = "boolean-and", author, version, about)]
struct Cli {
    /// Absolute path to the index directory produced by `index`.
    index_directory_path: PathBuf,

    /// Absolute path to a JSON object of `{topicId: "query text"}` entries.
    query_file_path: PathBuf,

    /// Absolute path for the run file; must not already exist.
    output_file_path: PathBuf,

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
        Ok(count) => {
            println!(
                "{}",
                style.message(MessageType::Ok, &format!("wrote {count} run lines"))
            );
            println!(
                "{}",
                style.message_detail("output", &cli.output_file_path.display().to_string())
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", style.error_with_hint(&e.to_string(), None));
            ExitCode::FAILURE
        }
    }
}

fn load_topics(path: &PathBuf) -> Result<BTreeMap<u32, String>, EngineError> {
    let raw = fs::read_to_string(path)?;
    let topics: BTreeMap<u32, String> = serde_json::from_str(&raw)?;
    Ok(topics)
}

fn run(cli: &Cli) -> Result<usize, EngineError> {
    require_absolute(&cli.index_directory_path)?;
    require_absolute(&cli.query_file_path)?;
    require_absolute(&cli.output_file_path)?;
    require_absent(&cli.output_file_path)?;
    require_boolean_index_artifacts(&cli.index_directory_path)?;

    let topics = load_topics(&cli.query_file_path)?;
    let index = Bm25Index::load(&cli.index_directory_path)?;
    let tokenizer = Tokenizer::new();

    let results = run_boolean_and(&topics, &index, &tokenizer);
    let body: String = results.iter().map(|r| format!("{}\n", r.to_line())).collect();
    fs::write(&cli.output_file_path, body)?;

    Ok(results.len())
}
