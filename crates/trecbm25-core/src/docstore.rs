//! Date-partitioned on-disk storage for parsed documents and index artifacts.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::constants::{
    DOC_LENGTHS_FILENAME, INDEX_REGISTRAR_FILENAME, INVERTED_INDEX_FILENAME, LEXICON_FILENAME,
};
use crate::errors::EngineError;
use crate::lexicon::Lexicon;
use crate::postings::InvertedIndex;
use crate::sgml::{parse_docno_date, SplitDocument};

/// Writes and reads per-document records under `{root}/{yyyy}/{m}/{d}/{docno}.txt`,
/// and owns the four root-level index artifacts.
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Opens a document store rooted at `root`. Does not touch the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory this store persists under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, docno: &str) -> Option<PathBuf> {
        let date = parse_docno_date(docno)?;
        Some(
            self.root
                .join(date.format("%Y").to_string())
                .join(date.format("%-m").to_string())
                .join(date.format("%-d").to_string())
                .join(format!("{docno}.txt")),
        )
    }

    /// Writes a parsed document's five-line record at its date-partitioned path.
    pub fn put(&self, doc: &SplitDocument, doc_id: u32) -> Result<(), EngineError> {
        let path = self.doc_path(&doc.docno).ok_or_else(|| EngineError::DocumentParseError {
            detail: format!("docno `{}` does not encode a date", doc.docno),
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let body = format!(
            "docno: {}\ninternal id: {}\ndate: {}\nheadline: {}\nraw document:\n{}",
            doc.docno,
            doc_id,
            doc.human_date(),
            doc.headline,
            doc.raw_document,
        );
        fs::write(&path, body)?;
        Ok(())
    }

    /// Reads a document's raw five-line record by its docno, re-deriving the
    /// path from the docno's encoded date. `Ok(None)` means the docno's file
    /// does not exist (or the docno is malformed) — a recoverable absence,
    /// not an error.
    pub fn get(&self, docno: &str) -> Result<Option<String>, EngineError> {
        let Some(path) = self.doc_path(docno) else {
            return Ok(None);
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Looks up a docno by its doc id within a loaded registry, then reads
    /// its record. `Ok(None)` covers both an out-of-range id and a missing file.
    pub fn get_by_id(&self, registry: &[String], doc_id: usize) -> Result<Option<String>, EngineError> {
        match registry.get(doc_id) {
            Some(docno) => self.get(docno),
            None => Ok(None),
        }
    }

    /// Reads and parses a document's record by docno, in one step.
    pub fn get_parsed(&self, docno: &str) -> Result<Option<DocumentRecord>, EngineError> {
        Ok(self.get(docno)?.and_then(|record| parse_record(&record)))
    }

    /// Flushes the four root-level index artifacts. Called once at the end
    /// of ingest.
    pub fn finalize(
        &self,
        lexicon: &Lexicon,
        inverted_index: &InvertedIndex,
        docno_registry: &[String],
        doc_lengths: &[u32],
    ) -> Result<(), EngineError> {
        fs::create_dir_all(&self.root)?;

        let lexicon_file = BufWriter::new(fs::File::create(self.root.join(LEXICON_FILENAME))?);
        lexicon.emit(lexicon_file)?;

        let index_file =
            BufWriter::new(fs::File::create(self.root.join(INVERTED_INDEX_FILENAME))?);
        inverted_index.emit(index_file)?;

        let mut registrar = BufWriter::new(fs::File::create(
            self.root.join(INDEX_REGISTRAR_FILENAME),
        )?);
        for docno in docno_registry {
            use std::io::Write;
            writeln!(registrar, "{docno}")?;
        }

        let mut lengths_file =
            BufWriter::new(fs::File::create(self.root.join(DOC_LENGTHS_FILENAME))?);
        for length in doc_lengths {
            use std::io::Write;
            writeln!(lengths_file, "{length}")?;
        }

        Ok(())
    }
}

/// A document record as read back from disk, split into its logical fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// External document identifier.
    pub docno: String,
    /// Human-readable date, as persisted (e.g. `"January 1, 1989"`).
    pub date: String,
    /// Stored headline, possibly empty.
    pub headline: String,
    /// The untouched SGML this document was parsed from.
    pub raw_document: String,
}

/// Parses the five-line record format `put` writes. Returns `None` if
/// `record` doesn't have enough lines to be a valid record.
pub fn parse_record(record: &str) -> Option<DocumentRecord> {
    let mut parts = record.splitn(6, '\n');
    let docno_line = parts.next()?;
    let _internal_id_line = parts.next()?;
    let date_line = parts.next()?;
    let headline_line = parts.next()?;
    let _raw_document_label = parts.next()?;
    let raw_document = parts.next().unwrap_or_default().to_string();

    Some(DocumentRecord {
        docno: docno_line.strip_prefix("docno: ")?.to_string(),
        date: date_line.strip_prefix("date: ")?.to_string(),
        headline: headline_line.strip_prefix("headline: ")?.to_string(),
        raw_document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_doc(docno: &str) -> SplitDocument {
        SplitDocument {
            docno: docno.to_string(),
            date: NaiveDate::from_ymd_opt(1989, 1, 1).unwrap(),
            headline: "Cats".to_string(),
            text: "Cats and dogs.".to_string(),
            graphic: String::new(),
            raw_document: "<DOC>...</DOC>".to_string(),
        }
    }

    #[test]
    fn put_then_get_round_trips_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let doc = sample_doc("LA010189-0001");
        store.put(&doc, 0).unwrap();

        let record = store.get("LA010189-0001").unwrap().unwrap();
        assert!(record.contains("docno: LA010189-0001"));
        assert!(record.contains("internal id: 0"));
        assert!(record.contains("date: January 1, 1989"));
        assert!(record.contains("headline: Cats"));
        assert!(record.contains("raw document:\n<DOC>...</DOC>"));
    }

    #[test]
    fn put_partitions_by_year_month_day_without_zero_padding() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.put(&sample_doc("LA010189-0001"), 0).unwrap();

        assert!(dir.path().join("1989/1/1/LA010189-0001.txt").exists());
    }

    #[test]
    fn get_on_missing_docno_is_none_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        assert_eq!(store.get("LA010189-0002").unwrap(), None);
    }

    #[test]
    fn get_by_id_resolves_through_registry() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.put(&sample_doc("LA010189-0001"), 0).unwrap();
        let registry = vec!["LA010189-0001".to_string()];

        assert!(store.get_by_id(&registry, 0).unwrap().is_some());
        assert_eq!(store.get_by_id(&registry, 5).unwrap(), None);
    }

    #[test]
    fn get_parsed_splits_the_record_into_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.put(&sample_doc("LA010189-0001"), 0).unwrap();

        let record = store.get_parsed("LA010189-0001").unwrap().unwrap();
        assert_eq!(record.docno, "LA010189-0001");
        assert_eq!(record.date, "January 1, 1989");
        assert_eq!(record.headline, "Cats");
        assert_eq!(record.raw_document, "<DOC>...</DOC>");
    }

    #[test]
    fn finalize_writes_the_four_root_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let mut lexicon = Lexicon::new();
        lexicon.id_of("cats");
        let index = InvertedIndex::new();

        store
            .finalize(&lexicon, &index, &["LA010189-0001".to_string()], &[5])
            .unwrap();

        assert!(dir.path().join(LEXICON_FILENAME).exists());
        assert!(dir.path().join(INVERTED_INDEX_FILENAME).exists());
        assert!(dir.path().join(INDEX_REGISTRAR_FILENAME).exists());
        assert!(dir.path().join(DOC_LENGTHS_FILENAME).exists());
    }
}
