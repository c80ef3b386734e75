//! Shared test utilities for trecbm25-cli integration tests.

use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Gets a [`Command`] for one of the workspace's five binaries.
pub fn bin(name: &str) -> Command {
    Command::cargo_bin(name).unwrap_or_else(|_| panic!("{name} binary should exist"))
}

/// A tiny two-document corpus: enough to exercise ingest, BM25, boolean-AND
/// and doc lookup without pulling in the real LA Times pack.
pub fn sample_corpus() -> &'static str {
    "<DOC>\n<DOCNO> LA010189-0001 </DOCNO>\n<HEADLINE>Cats Win</HEADLINE>\n\
     <TEXT>Cats and dogs get along. Dogs bark at cats sometimes.</TEXT>\n</DOC>\n\
     <DOC>\n<DOCNO> LA020289-0002 </DOCNO>\n<TEXT>Birds fly south for winter.</TEXT>\n</DOC>\n"
}

/// Writes `sample_corpus()` gzip-compressed at `path`.
pub fn write_sample_corpus_gz(path: &Path) {
    let mut encoder = GzEncoder::new(std::fs::File::create(path).unwrap(), Compression::default());
    encoder.write_all(sample_corpus().as_bytes()).unwrap();
    encoder.finish().unwrap();
}
