//! Error types for trecbm25-core.

use std::path::PathBuf;

use thiserror::Error;

/// Domain-specific errors for engine operations.
///
/// Lookup failures (a doc id out of range, a docno whose file is absent)
/// are NOT represented here — those are modeled as `Option`/sentinel
/// return values per the spec's error-handling design, since the caller
/// is expected to handle absence rather than unwind on it.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required positional argument was missing or malformed.
    #[error("{0}")]
    InvalidArguments(String),

    /// A path given as an absolute-path argument was not absolute.
    #[error("path must be absolute: {0}")]
    NotAbsolute(PathBuf),

    /// A required input file does not exist.
    #[error("required input not found: {path}")]
    MissingInput {
        /// The path that was expected to exist.
        path: PathBuf,
    },

    /// The destination for a write already exists (hard refusal, no overwrite).
    #[error("destination already exists: {path}")]
    OutputConflict {
        /// The conflicting path.
        path: PathBuf,
    },

    /// An index directory is missing one of its required artifact files.
    #[error("index directory `{dir}` is missing required file `{file}`")]
    MissingIndexArtifact {
        /// The index directory that was checked.
        dir: PathBuf,
        /// The missing file's name.
        file: &'static str,
    },

    /// A TREC run file line failed to parse.
    #[error("run file parse error at line {line_no}: {detail}")]
    RunParseError {
        /// 1-based line number within the run file.
        line_no: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },

    /// A `<DOC>...</DOC>` record in the input corpus could not be parsed.
    #[error("document parse error: {detail}")]
    DocumentParseError {
        /// Human-readable description of what went wrong.
        detail: String,
    },

    /// A persisted index artifact parsed as JSON/text but did not match the
    /// shape this engine expects.
    #[error("corrupt index artifact `{file}`: {detail}")]
    IndexArtifactCorrupt {
        /// The artifact file's name.
        file: &'static str,
        /// Human-readable description of the mismatch.
        detail: String,
    },

    /// Unexpected I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unexpected JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
