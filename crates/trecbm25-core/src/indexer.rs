//! Drives the tokenizer, lexicon, inverted index and document store over an
//! input stream, and flushes the on-disk artifacts once at the end.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::docstore::DocumentStore;
use crate::errors::EngineError;
use crate::lexicon::Lexicon;
use crate::postings::InvertedIndex;
use crate::sgml::DocumentSplitter;
use crate::tokenizer::Tokenizer;

/// Summary of a completed ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexReport {
    /// Number of documents consumed from the input stream.
    pub document_count: usize,
}

/// Ingests `input` into a fresh index rooted at `dest_root`.
///
/// `dest_root` must not already exist — this is the crude single-writer
/// exclusion mechanism the system relies on (there is no update path).
pub fn build_index(
    input: impl BufRead,
    dest_root: &Path,
    porter_stem: bool,
) -> Result<IndexReport, EngineError> {
    if dest_root.exists() {
        return Err(EngineError::OutputConflict {
            path: dest_root.to_path_buf(),
        });
    }
    fs::create_dir_all(dest_root)?;

    let mut splitter = DocumentSplitter::new(input);
    let tokenizer = Tokenizer::new();
    let store = DocumentStore::new(dest_root);

    let mut lexicon = Lexicon::new();
    let mut inverted_index = InvertedIndex::new();
    let mut docno_registry = Vec::new();
    let mut doc_lengths = Vec::new();
    let mut doc_id: u32 = 0;

    while let Some(doc) = splitter.next_document()? {
        let tokens = tokenizer.tokenize(&doc.searchable_content(), porter_stem);

        // Term ids must be assigned in first-sight input order (spec §3
        // invariant), so term frequencies are counted into an order-preserving
        // structure rather than a `HashMap` whose iteration order would make
        // id assignment depend on the process's random hasher seed.
        let mut order: Vec<&str> = Vec::new();
        let mut term_counts: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            let count = term_counts.entry(token.as_str()).or_insert_with(|| {
                order.push(token.as_str());
                0
            });
            *count += 1;
        }
        for term in order {
            let term_id = lexicon.id_of(term);
            inverted_index.append(term_id, doc_id, term_counts[term]);
        }

        store.put(&doc, doc_id)?;
        tracing::debug!(docno = %doc.docno, doc_id, tokens = tokens.len(), "indexed document");

        docno_registry.push(doc.docno);
        doc_lengths.push(tokens.len() as u32);
        doc_id += 1;
    }

    store.finalize(&lexicon, &inverted_index, &docno_registry, &doc_lengths)?;
    tracing::info!(document_count = docno_registry.len(), "index flushed");

    Ok(IndexReport {
        document_count: docno_registry.len(),
    })
}

/// Opens `source_file` as a gzip-compressed corpus and builds a fresh index
/// at `dest_root`. The decompressor streams directly off the file handle;
/// the corpus is never fully materialized in memory.
pub fn build_index_from_gzip_path(
    source_file: &Path,
    dest_root: &Path,
    porter_stem: bool,
) -> Result<IndexReport, EngineError> {
    if !source_file.exists() {
        return Err(EngineError::MissingInput {
            path: source_file.to_path_buf(),
        });
    }
    let file = File::open(source_file)?;
    let reader = BufReader::new(GzDecoder::new(file));
    build_index(reader, dest_root, porter_stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn corpus() -> &'static str {
        "<DOC>\n<DOCNO> LA010189-0001 </DOCNO>\n<TEXT>Cats and dogs. Dogs bark.</TEXT>\n</DOC>\n"
    }

    #[test]
    fn ingests_the_worked_example_from_the_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("idx");
        let report = build_index(Cursor::new(corpus()), &dest, false).unwrap();

        assert_eq!(report.document_count, 1);

        let lexicon = fs::read_to_string(dest.join("lexicon.txt")).unwrap();
        assert_eq!(lexicon.lines().collect::<Vec<_>>(), vec!["cats", "and", "dogs", "bark"]);

        let lengths = fs::read_to_string(dest.join("doc-lengths.txt")).unwrap();
        assert_eq!(lengths.trim(), "5");

        let registrar = fs::read_to_string(dest.join("index_registrar.txt")).unwrap();
        assert_eq!(registrar.trim(), "LA010189-0001");

        assert!(dest.join("1989/1/1/LA010189-0001.txt").exists());

        let index_json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dest.join("inverted_index.json")).unwrap())
                .unwrap();
        assert_eq!(index_json["1"], serde_json::json!([0, 1])); // cats
        assert_eq!(index_json["3"], serde_json::json!([0, 2])); // dogs, freq 2
    }

    #[test]
    fn refuses_to_overwrite_an_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("idx");
        fs::create_dir_all(&dest).unwrap();

        let err = build_index(Cursor::new(corpus()), &dest, false).unwrap_err();
        assert!(matches!(err, EngineError::OutputConflict { .. }));
    }

    #[test]
    fn stemming_flag_controls_term_surface_form() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("idx");
        build_index(Cursor::new(corpus()), &dest, true).unwrap();

        let lexicon = fs::read_to_string(dest.join("lexicon.txt")).unwrap();
        assert!(lexicon.lines().any(|t| t == "dog"));
    }

    #[test]
    fn builds_from_a_gzip_compressed_source_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("corpus.gz");
        let mut encoder = GzEncoder::new(File::create(&source).unwrap(), Compression::default());
        encoder.write_all(corpus().as_bytes()).unwrap();
        encoder.finish().unwrap();

        let dest = dir.path().join("idx");
        let report = build_index_from_gzip_path(&source, &dest, false).unwrap();
        assert_eq!(report.document_count, 1);
    }

    #[test]
    fn missing_source_file_is_a_missing_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            build_index_from_gzip_path(&dir.path().join("missing.gz"), &dir.path().join("idx"), false)
                .unwrap_err();
        assert!(matches!(err, EngineError::MissingInput { .. }));
    }
}
