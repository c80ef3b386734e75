//! The inverted index: term-id → posting list of `(doc_id, term_frequency)`.
//!
//! In memory this is a typed pair sequence, per document design notes; the
//! interleaved `[d, f, d, f, ...]` shape is purely an on-disk compatibility
//! requirement and is produced/consumed only at the JSON boundary
//! ([`InvertedIndex::emit`], [`InvertedIndex::from_json`]).

use std::collections::HashMap;
use std::io::Write;

use serde_json::{Map, Value};

use crate::constants::INVERTED_INDEX_FILENAME;
use crate::errors::EngineError;

/// One `(doc_id, term_frequency)` posting.
pub type Posting = (u32, u32);

/// Mapping from term id to its posting list.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<u32, Vec<Posting>>,
}

impl InvertedIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a posting for `term_id`. `doc_id` must be strictly greater
    /// than any previously appended doc id for this term — callers process
    /// documents in doc-id order, so this always holds in practice.
    pub fn append(&mut self, term_id: u32, doc_id: u32, freq: u32) {
        let list = self.postings.entry(term_id).or_default();
        debug_assert!(
            list.last().is_none_or(|&(last_doc, _)| doc_id > last_doc),
            "postings must be appended in doc-id order"
        );
        list.push((doc_id, freq));
    }

    /// Returns the posting list for `term_id`, empty if the term never appeared.
    pub fn get(&self, term_id: u32) -> &[Posting] {
        self.postings.get(&term_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Document frequency of `term_id`: the length of its posting list.
    pub fn document_frequency(&self, term_id: u32) -> usize {
        self.get(term_id).len()
    }

    /// Writes the JSON object keyed by term-id-as-string, values flat
    /// interleaved `[doc_id, freq, doc_id, freq, ...]` arrays.
    ///
    /// Keys are written in ascending term-id order: `self.postings` is a
    /// `HashMap`, whose iteration order is randomized per-process, but every
    /// other persisted artifact (lexicon, registrar, doc-lengths) is
    /// reproducible line-for-line, so this one must be too.
    pub fn emit<W: Write>(&self, writer: W) -> Result<(), EngineError> {
        let mut ordered: Vec<(&u32, &Vec<Posting>)> = self.postings.iter().collect();
        ordered.sort_unstable_by_key(|&(term_id, _)| *term_id);

        let mut map = Map::with_capacity(ordered.len());
        for (term_id, postings) in ordered {
            let flat: Vec<Value> = postings
                .iter()
                .flat_map(|&(doc_id, freq)| [Value::from(doc_id), Value::from(freq)])
                .collect();
            map.insert(term_id.to_string(), Value::Array(flat));
        }
        serde_json::to_writer(writer, &Value::Object(map))?;
        Ok(())
    }

    /// Rebuilds an index from its persisted JSON form.
    pub fn from_json(value: &Value) -> Result<Self, EngineError> {
        let obj = value.as_object().ok_or_else(|| EngineError::IndexArtifactCorrupt {
            file: INVERTED_INDEX_FILENAME,
            detail: "top-level value is not a JSON object".to_string(),
        })?;

        let mut postings = HashMap::with_capacity(obj.len());
        for (key, value) in obj {
            let term_id: u32 = key.parse().map_err(|_| EngineError::IndexArtifactCorrupt {
                file: INVERTED_INDEX_FILENAME,
                detail: format!("key `{key}` is not a term id"),
            })?;
            let flat = value.as_array().ok_or_else(|| EngineError::IndexArtifactCorrupt {
                file: INVERTED_INDEX_FILENAME,
                detail: format!("value for term id {term_id} is not an array"),
            })?;
            let numbers: Option<Vec<u32>> = flat.iter().map(|v| v.as_u64().map(|n| n as u32)).collect();
            let numbers = numbers.ok_or_else(|| EngineError::IndexArtifactCorrupt {
                file: INVERTED_INDEX_FILENAME,
                detail: format!("value for term id {term_id} contains a non-integer"),
            })?;
            let pairs: Vec<Posting> = numbers.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
            postings.insert(term_id, pairs);
        }
        Ok(Self { postings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_on_absent_term_is_empty() {
        let index = InvertedIndex::new();
        assert!(index.get(1).is_empty());
    }

    #[test]
    fn append_then_get_preserves_order() {
        let mut index = InvertedIndex::new();
        index.append(1, 0, 2);
        index.append(1, 3, 1);
        assert_eq!(index.get(1), &[(0, 2), (3, 1)]);
        assert_eq!(index.document_frequency(1), 2);
    }

    #[test]
    fn emit_and_from_json_round_trip() {
        let mut index = InvertedIndex::new();
        index.append(1, 0, 1);
        index.append(1, 2, 3);
        index.append(4, 1, 1);

        let mut buf = Vec::new();
        index.emit(&mut buf).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        let reloaded = InvertedIndex::from_json(&value).unwrap();

        assert_eq!(reloaded.get(1), &[(0, 1), (2, 3)]);
        assert_eq!(reloaded.get(4), &[(1, 1)]);
    }

    #[test]
    fn from_json_rejects_non_object() {
        let value = Value::from(42);
        assert!(InvertedIndex::from_json(&value).is_err());
    }

    #[test]
    fn emit_writes_keys_in_ascending_term_id_order() {
        let mut index = InvertedIndex::new();
        // Insertion order deliberately scrambled, and chosen so that
        // lexicographic string order ("10" < "2") would disagree with
        // ascending numeric order if the fix regressed to string sorting.
        index.append(10, 0, 1);
        index.append(2, 0, 1);
        index.append(1, 0, 1);

        let mut buf = Vec::new();
        index.emit(&mut buf).unwrap();
        let json = String::from_utf8(buf).unwrap();

        let pos1 = json.find("\"1\"").unwrap();
        let pos2 = json.find("\"2\"").unwrap();
        let pos10 = json.find("\"10\"").unwrap();
        assert!(pos1 < pos2);
        assert!(pos2 < pos10);
    }
}
