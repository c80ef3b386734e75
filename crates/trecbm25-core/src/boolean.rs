//! Boolean-AND retrieval over a set of TREC topic queries.

use std::collections::{BTreeMap, HashSet};

use crate::constants::{BOOLEAN_AND_Q0, BOOLEAN_AND_RUNTAG, BOOLEAN_AND_SKIP_TOPICS};
use crate::scorer::Bm25Index;
use crate::tokenizer::Tokenizer;

/// One result line for the boolean-AND run file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanAndResult {
    /// Topic id the result belongs to.
    pub topic_id: String,
    /// The literal `"QO"` compatibility artifact.
    pub q0: &'static str,
    /// External document identifier.
    pub docno: String,
    /// 1-based position within the topic's result set.
    pub rank: usize,
    /// `|intersection| - (rank - 1)`.
    pub score: i64,
    /// The fixed run tag.
    pub runtag: &'static str,
}

impl BooleanAndResult {
    /// Renders the six space-separated run-file columns.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.topic_id, self.q0, self.docno, self.rank, self.score, self.runtag
        )
    }
}

/// Intersects posting doc-id sets for each topic's tokens, skipping the
/// hardcoded topic set and any topic whose tokens are all unknown.
///
/// Topics are processed in ascending numeric order for reproducibility;
/// within a topic, the order of the intersected set is implementation-defined
/// but stable (ascending doc id).
pub fn run_boolean_and(
    topics: &BTreeMap<u32, String>,
    index: &Bm25Index,
    tokenizer: &Tokenizer,
) -> Vec<BooleanAndResult> {
    let mut results = Vec::new();

    for (topic_id, raw_query) in topics {
        if BOOLEAN_AND_SKIP_TOPICS.contains(topic_id) {
            continue;
        }

        let cleaned = raw_query.replace('\n', " ").replace('_', " ");
        let tokens = tokenizer.tokenize(&cleaned, false);

        let term_ids: Vec<u32> = tokens.iter().filter_map(|t| index.term_id(t)).collect();
        if term_ids.is_empty() {
            continue;
        }

        let mut doc_sets: Vec<HashSet<u32>> = term_ids
            .iter()
            .map(|&term_id| index.postings(term_id).iter().map(|&(doc_id, _)| doc_id).collect())
            .collect();

        let Some(mut common) = doc_sets.pop() else {
            continue;
        };
        for set in &doc_sets {
            common.retain(|doc_id| set.contains(doc_id));
        }

        let mut doc_ids: Vec<u32> = common.into_iter().collect();
        doc_ids.sort_unstable();
        let total = doc_ids.len();

        for (i, doc_id) in doc_ids.into_iter().enumerate() {
            let rank = i + 1;
            let Some(docno) = index.docno(doc_id) else {
                continue;
            };
            results.push(BooleanAndResult {
                topic_id: topic_id.to_string(),
                q0: BOOLEAN_AND_Q0,
                docno: docno.to_string(),
                rank,
                score: total as i64 - (rank as i64 - 1),
                runtag: BOOLEAN_AND_RUNTAG,
            });
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn index_with_cats_and_dogs() -> (tempfile::TempDir, Bm25Index) {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("idx");
        let corpus = "<DOC>\n<DOCNO> LA010189-0001 </DOCNO>\n<TEXT>cats</TEXT>\n</DOC>\n\
                      <DOC>\n<DOCNO> LA010289-0002 </DOCNO>\n<TEXT>nothing</TEXT>\n</DOC>\n\
                      <DOC>\n<DOCNO> LA010389-0003 </DOCNO>\n<TEXT>cats dogs</TEXT>\n</DOC>\n\
                      <DOC>\n<DOCNO> LA010489-0004 </DOCNO>\n<TEXT>dogs</TEXT>\n</DOC>\n";
        crate::indexer::build_index(Cursor::new(corpus), &dest, false).unwrap();
        let index = Bm25Index::load(&dest).unwrap();
        (dir, index)
    }

    #[test]
    fn intersects_postings_for_a_topic() {
        let (_dir, index) = index_with_cats_and_dogs();
        let tokenizer = Tokenizer::new();
        let mut topics = BTreeMap::new();
        topics.insert(401, "cats dogs".to_string());

        let results = run_boolean_and(&topics, &index, &tokenizer);

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.topic_id, "401");
        assert_eq!(result.q0, "QO");
        assert_eq!(result.docno, "LA010389-0003");
        assert_eq!(result.rank, 1);
        assert_eq!(result.score, 1);
        assert_eq!(result.runtag, "ctiscareAND");
    }

    #[test]
    fn skip_set_topics_are_excluded() {
        let (_dir, index) = index_with_cats_and_dogs();
        let tokenizer = Tokenizer::new();
        let mut topics = BTreeMap::new();
        topics.insert(416, "cats".to_string());

        assert!(run_boolean_and(&topics, &index, &tokenizer).is_empty());
    }

    #[test]
    fn unknown_tokens_contribute_nothing() {
        let (_dir, index) = index_with_cats_and_dogs();
        let tokenizer = Tokenizer::new();
        let mut topics = BTreeMap::new();
        topics.insert(402, "zzyzx".to_string());

        assert!(run_boolean_and(&topics, &index, &tokenizer).is_empty());
    }

    #[test]
    fn to_line_renders_six_space_separated_columns() {
        let result = BooleanAndResult {
            topic_id: "401".to_string(),
            q0: "QO",
            docno: "LA010389-0003".to_string(),
            rank: 1,
            score: 1,
            runtag: "ctiscareAND",
        };
        assert_eq!(result.to_line(), "401 QO LA010389-0003 1 1 ctiscareAND");
    }
}
