//! Streaming SGML document splitter.
//!
//! Consumes a corpus line-by-line and yields one record per `<DOC>...</DOC>`
//! block. The full input is never materialized in memory; callers hand in
//! anything that implements [`BufRead`], typically a gzip decoder wrapped in
//! a buffered reader.

use std::io::BufRead;

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::EngineError;

/// One parsed `<DOC>...</DOC>` record, prior to doc-id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument {
    /// External document identifier, e.g. `LA010189-0001`.
    pub docno: String,
    /// Calendar date encoded in the docno's six digits.
    pub date: NaiveDate,
    /// Cleaned contents of the `<HEADLINE>` tag, or `""` if absent.
    pub headline: String,
    /// Cleaned contents of the `<TEXT>` tag, or `""` if absent.
    pub text: String,
    /// Cleaned contents of the `<GRAPHIC>` tag, or `""` if absent.
    pub graphic: String,
    /// The untouched lines of the document, newline-joined.
    pub raw_document: String,
}

impl SplitDocument {
    /// The content BM25/boolean-AND index and score against: `graphic text
    /// headline`, in that order. The order is a compatibility requirement,
    /// not a style choice.
    pub fn searchable_content(&self) -> String {
        format!("{} {} {}", self.graphic, self.text, self.headline)
    }

    /// `"Month D, YYYY"` with no zero-padding on the day.
    pub fn human_date(&self) -> String {
        format!(
            "{} {}, {}",
            self.date.format("%B"),
            self.date.format("%-d"),
            self.date.format("%Y")
        )
    }
}

/// Extracts the calendar date encoded in a docno's six-digit date component
/// (`LA[0-9]{6}-[0-9]{4}`, parsed as `%m%d%y`). Returns `None` if the docno
/// does not match the expected shape.
pub fn parse_docno_date(docno: &str) -> Option<NaiveDate> {
    let date_re = Regex::new(r"LA([0-9]{6})-[0-9]{4}").expect("date regex is valid");
    let six_digit_date = date_re.captures(docno)?.get(1)?.as_str();
    NaiveDate::parse_from_str(six_digit_date, "%m%d%y").ok()
}

struct TagExtractor {
    tag_block: Regex,
    strip_tags: Regex,
    collapse_whitespace: Regex,
}

impl TagExtractor {
    fn new(tag: &str) -> Self {
        Self {
            tag_block: Regex::new(&format!(r"(?s)<{tag}>.*</{tag}>"))
                .expect("tag block regex is valid"),
            strip_tags: Regex::new(r"<[^>]*>").expect("strip-tags regex is valid"),
            collapse_whitespace: Regex::new(r"\s+").expect("whitespace regex is valid"),
        }
    }

    fn extract(&self, raw_document: &str) -> String {
        let Some(block) = self.tag_block.find(raw_document) else {
            return String::new();
        };
        let stripped = self.strip_tags.replace_all(block.as_str(), "");
        self.collapse_whitespace
            .replace_all(stripped.trim(), " ")
            .replace('_', " ")
    }
}

/// Re-extracts the `<TEXT>` tag's cleaned contents from a stored raw
/// document, for callers that only persisted the raw SGML and need the
/// text back (the snippet generator, re-reading a document record).
pub fn extract_text_tag(raw_document: &str) -> String {
    TagExtractor::new("TEXT").extract(raw_document)
}

/// Re-extracts the `<GRAPHIC>` tag's cleaned contents from a stored raw
/// document.
pub fn extract_graphic_tag(raw_document: &str) -> String {
    TagExtractor::new("GRAPHIC").extract(raw_document)
}

/// Splits a buffered stream into [`SplitDocument`] records.
pub struct DocumentSplitter<R> {
    reader: R,
    docno_re: Regex,
    date_re: Regex,
    headline: TagExtractor,
    text: TagExtractor,
    graphic: TagExtractor,
    buffer: Vec<String>,
}

impl<R: BufRead> DocumentSplitter<R> {
    /// Wraps a buffered reader (e.g. a gzip decoder) over the corpus.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            docno_re: Regex::new(r"<DOCNO>\s(.*)\s</DOCNO>").expect("docno regex is valid"),
            date_re: Regex::new(r"LA([0-9]{6})-[0-9]{4}").expect("date regex is valid"),
            headline: TagExtractor::new("HEADLINE"),
            text: TagExtractor::new("TEXT"),
            graphic: TagExtractor::new("GRAPHIC"),
            buffer: Vec::new(),
        }
    }

    /// Reads and parses the next document, or `None` at end of stream.
    pub fn next_document(&mut self) -> Result<Option<SplitDocument>, EngineError> {
        loop {
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            let line = line.trim_end_matches(['\n', '\r']).to_string();
            let ends_document = line.contains("</DOC>");
            self.buffer.push(line);
            if ends_document {
                let raw_document = self.buffer.join("\n");
                self.buffer.clear();
                return Ok(Some(self.parse_document(raw_document)?));
            }
        }
    }

    fn parse_document(&self, raw_document: String) -> Result<SplitDocument, EngineError> {
        let docno = self
            .docno_re
            .captures(&raw_document)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let six_digit_date = self
            .date_re
            .captures(&docno)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| EngineError::DocumentParseError {
                detail: format!("docno `{docno}` does not encode a date"),
            })?;

        let date = NaiveDate::parse_from_str(&six_digit_date, "%m%d%y").map_err(|e| {
            EngineError::DocumentParseError {
                detail: format!("invalid date `{six_digit_date}` in docno `{docno}`: {e}"),
            }
        })?;

        Ok(SplitDocument {
            docno,
            date,
            headline: self.headline.extract(&raw_document),
            text: self.text.extract(&raw_document),
            graphic: self.graphic.extract(&raw_document),
            raw_document,
        })
    }
}
