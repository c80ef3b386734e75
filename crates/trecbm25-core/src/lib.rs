//! # trecbm25-core
//!
//! Core engine for a single-node BM25 search system over the TREC LA-Times
//! newswire corpus: ingest, retrieval, boolean-AND runs and evaluation.
//!
//! ## Modules
//!
//! - [`sgml`] – streaming document splitting out of the gzip-compressed corpus
//! - [`tokenizer`] – whitespace/punctuation tokenization with optional stemming
//! - [`lexicon`], [`postings`] – the term dictionary and inverted index
//! - [`docstore`] – date-partitioned on-disk document storage
//! - [`indexer`] – drives ingest end to end
//! - [`scorer`] – Okapi BM25 retrieval over a loaded index
//! - [`boolean`] – boolean-AND retrieval for the fixed topic set
//! - [`snippet`] – query-biased snippet generation for displayed results
//! - [`eval`] – TREC run evaluation (AP, P@10, NDCG)
//! - [`errors`] – the domain error type
//! - [`constants`] – shared filenames and fixed parameters

pub mod boolean;
pub mod constants;
pub mod docstore;
pub mod errors;
pub mod eval;
pub mod indexer;
pub mod lexicon;
pub mod postings;
pub mod scorer;
pub mod sgml;
pub mod snippet;
pub mod tokenizer;

pub use boolean::{run_boolean_and, BooleanAndResult};
pub use docstore::{parse_record, DocumentRecord, DocumentStore};
pub use errors::EngineError;
pub use eval::{evaluate, EvaluationReport};
pub use indexer::{build_index, build_index_from_gzip_path, IndexReport};
pub use lexicon::Lexicon;
pub use postings::{InvertedIndex, Posting};
pub use scorer::Bm25Index;
pub use sgml::{parse_docno_date, DocumentSplitter, SplitDocument};
pub use snippet::{build_snippet, Snippet};
pub use tokenizer::Tokenizer;
