//! Text tokenization shared by ingest and query-time retrieval.
//!
//! The contract is intentionally small: replace runs of non-word characters
//! with whitespace, lowercase, split, and optionally stem. Stemming is an
//! ingest-time concern — the BM25 and boolean-AND query paths always
//! tokenize without it (see [`Tokenizer::tokenize`] call sites in
//! `scorer` and `boolean`).

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Splits text on runs of non-word characters, exactly like the ingest
/// pipeline's field-extraction regex `\W+`.
fn non_word_runs() -> Regex {
    Regex::new(r"\W+").expect("static regex is valid")
}

/// Normalizes and optionally stems text into a sequence of terms.
pub struct Tokenizer {
    word_splitter: Regex,
    stemmer: Stemmer,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Builds a tokenizer. The Porter stemmer is always constructed; callers
    /// decide per-call whether to apply it via [`Tokenizer::tokenize`]'s
    /// `stem` flag.
    pub fn new() -> Self {
        Self {
            word_splitter: non_word_runs(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Tokenizes `text`, applying Porter stemming to each token when `stem`
    /// is true. Total: returns `[]` for empty input.
    pub fn tokenize(&self, text: &str, stem: bool) -> Vec<String> {
        let normalized = self.word_splitter.replace_all(text, " ").to_lowercase();
        normalized
            .split_whitespace()
            .map(|token| {
                if stem {
                    self.stemmer.stem(token).into_owned()
                } else {
                    token.to_string()
                }
            })
            .collect()
    }
}
