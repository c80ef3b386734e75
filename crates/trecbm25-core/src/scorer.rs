//! Okapi BM25 scoring over a loaded index.
//!
//! ```text
//! K = k1 * ((1 - b) + b * len[d] / avgdl)
//! Δ = (f / (f + K)) * ln((N - df + 0.5) / (df + 0.5))
//! ```
//!
//! The IDF term is used unclamped and may be negative for very common
//! terms — a deliberate choice preserved from the source system, not a bug.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::constants::{
    BM25_B, BM25_K1, DOC_LENGTHS_FILENAME, INDEX_REGISTRAR_FILENAME, INVERTED_INDEX_FILENAME,
    LEXICON_FILENAME, RETRIEVED_RESULTS_LIMIT,
};
use crate::errors::EngineError;
use crate::lexicon::Lexicon;
use crate::postings::InvertedIndex;
use crate::tokenizer::Tokenizer;

/// A loaded, read-only index ready for retrieval.
pub struct Bm25Index {
    lexicon: Lexicon,
    inverted_index: InvertedIndex,
    docno_registry: Vec<String>,
    doc_lengths: Vec<u32>,
    avgdl: f64,
}

impl Bm25Index {
    /// Loads the four required artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, EngineError> {
        let required = [
            LEXICON_FILENAME,
            INDEX_REGISTRAR_FILENAME,
            INVERTED_INDEX_FILENAME,
            DOC_LENGTHS_FILENAME,
        ];
        for file in required {
            if !dir.join(file).exists() {
                return Err(EngineError::MissingIndexArtifact {
                    dir: dir.to_path_buf(),
                    file,
                });
            }
        }

        let lexicon = Lexicon::from_lines(
            fs::read_to_string(dir.join(LEXICON_FILENAME))?
                .lines()
                .map(str::to_string),
        );

        let docno_registry: Vec<String> = fs::read_to_string(dir.join(INDEX_REGISTRAR_FILENAME))?
            .lines()
            .map(str::to_string)
            .collect();

        let doc_lengths: Vec<u32> = fs::read_to_string(dir.join(DOC_LENGTHS_FILENAME))?
            .lines()
            .map(|line| {
                line.trim().parse().map_err(|_| EngineError::IndexArtifactCorrupt {
                    file: DOC_LENGTHS_FILENAME,
                    detail: format!("`{line}` is not an integer"),
                })
            })
            .collect::<Result<_, _>>()?;

        let index_json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(INVERTED_INDEX_FILENAME))?)?;
        let inverted_index = InvertedIndex::from_json(&index_json)?;

        let avgdl = if doc_lengths.is_empty() {
            0.0
        } else {
            doc_lengths.iter().map(|&l| l as f64).sum::<f64>() / doc_lengths.len() as f64
        };

        Ok(Self {
            lexicon,
            inverted_index,
            docno_registry,
            doc_lengths,
            avgdl,
        })
    }

    /// Total document count, `N` in the scoring formula.
    pub fn num_docs(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Resolves a doc id to its external docno.
    pub fn docno(&self, doc_id: u32) -> Option<&str> {
        self.docno_registry.get(doc_id as usize).map(String::as_str)
    }

    /// Looks up a token's term id without assigning a new one.
    pub fn term_id(&self, token: &str) -> Option<u32> {
        self.lexicon.lookup(token)
    }

    /// Posting list for `term_id`, empty if unknown.
    pub fn postings(&self, term_id: u32) -> &[crate::postings::Posting] {
        self.inverted_index.get(term_id)
    }

    /// Scores and ranks documents for a free-text query.
    ///
    /// The query is tokenized without stemming — a compatibility
    /// requirement distinct from ingest, which stems when its flag is set.
    /// Query tokens are not deduplicated before scoring, matching the
    /// source's behavior of letting a repeated word contribute twice.
    pub fn search(&self, query: &str, tokenizer: &Tokenizer) -> Vec<(u32, f64)> {
        let tokens = tokenizer.tokenize(query, false);
        let term_ids: Vec<u32> = tokens
            .iter()
            .filter_map(|token| self.lexicon.lookup(token))
            .collect();
        if term_ids.is_empty() {
            return Vec::new();
        }

        let num_docs = self.num_docs() as f64;
        let mut scores: HashMap<u32, f64> = HashMap::new();
        for term_id in term_ids {
            let df = self.inverted_index.document_frequency(term_id);
            if df == 0 {
                continue;
            }
            let idf = ((num_docs - df as f64 + 0.5) / (df as f64 + 0.5)).ln();
            for &(doc_id, freq) in self.inverted_index.get(term_id) {
                let len = self.doc_lengths[doc_id as usize] as f64;
                let k = BM25_K1 as f64 * ((1.0 - BM25_B as f64) + BM25_B as f64 * len / self.avgdl);
                let delta = (freq as f64 / (freq as f64 + k)) * idf;
                *scores.entry(doc_id).or_insert(0.0) += delta;
            }
        }

        let mut ranked: Vec<(u32, f64)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(RETRIEVED_RESULTS_LIMIT);
        ranked
    }
}
