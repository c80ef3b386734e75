//! Builds a fresh BM25 index from a gzip-compressed SGML corpus.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use trecbm25_cli::ui::{ColorMode, MessageType, Style};
use trecbm25_cli::validate::{parse_porter_stem, require_absent, require_absolute};
use trecbm25_core::build_index_from_gzip_path;

/// Builds an inverted index from a gzip-compressed newswire corpus.
#[derive(Parser, Debug)]
#[command(name = "index", author, version, about)]
struct Cli {
    /// Absolute path to the gzip-compressed source corpus.
    source_file: PathBuf,

    /// Absolute path to the destination index directory; must not exist.
    destination_directory: PathBuf,

    /// Whether to apply Porter stemming during ingest (`true`/`false`).
    porter_stem: String,

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
                style.message(MessageType::Ok, &format!("indexed {count} documents"))
            );
            println!(
                "{}",
                style.message_detail("destination", &cli.destination_directory.display().to_string())
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", style.error_with_hint(&e.to_string(), None));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<usize, trecbm25_core::EngineError> {
    require_absolute(&cli.source_file)?;
    require_absolute(&cli.destination_directory)?;
    require_absent(&cli.destination_directory)?;
    let porter_stem = parse_porter_stem(&cli.porter_stem)?;

    let report = build_index_from_gzip_path(&cli.source_file, &cli.destination_directory, porter_stem)?;
    Ok(report.document_count)
}
