//! Interactive BM25 search over a loaded index.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use trecbm25_cli::ui::{ColorMode, MessageType, Style};
use trecbm25_cli::validate::{require_absolute, require_index_artifacts};
use trecbm25_core::{build_snippet, Bm25Index, DocumentStore, EngineError, Tokenizer};

/// Runs free-text BM25 queries against an index, interactively.
#[derive(Parser, Debug)]
#[command(name = "search", author, version, about)]
struct Cli {
    /// Absolute path to the index directory produced by `index`.
    index_directory_path: PathBuf,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output mode: always, never, or auto.
    #[arg(long, global = true, default_value = "auto")]
    color: String,
}

const WRONGFUL_SELECTION_MSG: &str = "Please enter a valid rank, 'n', or 'q'.";

fn main() -> ExitCode {
    let cli = Cli::parse();
    trecbm25_cli::init_tracing(cli.verbose);
    let style = Style::new(ColorMode::from_str(&cli.color).unwrap_or(ColorMode::Auto));

    if let Err(e) = validate(&cli) {
        eprintln!("{}", style.error_with_hint(&e.to_string(), None));
        return ExitCode::FAILURE;
    }

    let index = match Bm25Index::load(&cli.index_directory_path) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{}", style.error_with_hint(&e.to_string(), None));
            return ExitCode::FAILURE;
        }
    };
    let store = DocumentStore::new(cli.index_directory_path.as_path());
    let tokenizer = Tokenizer::new();

    println!("{}", style.section("BM25 Search Engine"));
    run_repl(&index, &store, &tokenizer, &style);
    ExitCode::SUCCESS
}

fn validate(cli: &Cli) -> Result<(), EngineError> {
    require_absolute(&cli.index_directory_path)?;
    require_index_artifacts(&cli.index_directory_path)
}

fn prompt(message: &str) -> String {
    print!("{message}");
    io::stdout().flush().ok();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn run_repl(index: &Bm25Index, store: &DocumentStore, tokenizer: &Tokenizer, style: &Style) {
    loop {
        let query = prompt("\nPlease enter a search query (or type 'exit' to quit):\n");
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            println!("No results returned for an empty query.");
            continue;
        }

        let started = Instant::now();
        let results = index.search(&query, tokenizer);
        if results.is_empty() {
            println!("No results found for query: {query}");
            continue;
        }

        let query_tokens = tokenizer.tokenize(&query, false);
        let docnos = display_results(index, store, &results, &query_tokens, style);
        println!("Retrieval took {:.2} seconds.\n", started.elapsed().as_secs_f64());

        handle_user_actions(&docnos, store);
    }
}

/// Renders the ranked results and returns their docnos, in rank order, for
/// the follow-up view-by-rank menu.
fn display_results(
    index: &Bm25Index,
    store: &DocumentStore,
    results: &[(u32, f64)],
    query_tokens: &[String],
    style: &Style,
) -> Vec<String> {
    let mut docnos = Vec::with_capacity(results.len());
    for (rank, &(doc_id, _score)) in results.iter().enumerate() {
        let rank = rank + 1;
        let Some(docno) = index.docno(doc_id) else {
            continue;
        };
        let docno = docno.to_string();

        let Ok(Some(record)) = store.get_parsed(&docno) else {
            docnos.push(docno);
            continue;
        };
        let snippet = build_snippet(&record.headline, &record.raw_document, query_tokens);

        println!("{} {} ({})", style.rank(rank), snippet.headline, record.date);
        println!("{} ({docno})", snippet.text);
        println!();

        docnos.push(docno);
    }
    docnos
}

fn handle_user_actions(docnos: &[String], store: &DocumentStore) {
    loop {
        let next_action = prompt(
            "Please enter:\n1. The numeric rank of a document to view the full document.\n\
             2. 'N' to launch a new query.\n3. 'Q' to exit the search program.\n\n",
        )
        .to_lowercase();

        if next_action == "q" {
            break;
        } else if next_action == "n" {
            return;
        } else if let Ok(rank) = next_action.parse::<usize>() {
            if rank > 0 && rank <= docnos.len() {
                match store.get(&docnos[rank - 1]) {
                    Ok(Some(document)) => println!("{document}"),
                    _ => println!("Document Mismatch Error: Document not found."),
                }
            } else {
                println!("{WRONGFUL_SELECTION_MSG}");
            }
        } else {
            println!("{WRONGFUL_SELECTION_MSG}");
        }
    }
}
