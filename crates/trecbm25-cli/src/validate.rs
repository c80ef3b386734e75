//! Positional-argument validation shared by all five binaries.
//!
//! Each binary's CLI surface is purely positional (no flags beyond
//! `-v/--verbose` and `--color`), matching the original system's `click`
//! commands; the checks here reproduce what each command's
//! `utils::validate_paths` did before dispatching.

use std::path::{Path, PathBuf};

use trecbm25_core::EngineError;

/// A path argument must be absolute.
pub fn require_absolute(path: &Path) -> Result<(), EngineError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(EngineError::NotAbsolute(path.to_path_buf()))
    }
}

/// A path argument naming a file that must already exist.
pub fn require_exists(path: &Path) -> Result<(), EngineError> {
    if path.exists() {
        Ok(())
    } else {
        Err(EngineError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

/// A path argument naming a destination that must not already exist.
pub fn require_absent(path: &Path) -> Result<(), EngineError> {
    if path.exists() {
        Err(EngineError::OutputConflict {
            path: path.to_path_buf(),
        })
    } else {
        Ok(())
    }
}

/// Parses the indexer's `porter_stem` positional argument (`true`/`false`,
/// case-insensitive).
pub fn parse_porter_stem(raw: &str) -> Result<bool, EngineError> {
    match raw.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(EngineError::InvalidArguments(format!(
            "expected `true` or `false` for porter_stem, found `{other}`"
        ))),
    }
}

/// Docno shape required by `get-doc`'s `docno` identifier mode.
const DOCNO_PATTERN: &str = r"LA[0-9]{6}-[0-9]{4}";

/// Validates the `(identifier, value)` pair for `get-doc`: `identifier` must
/// be `id` or `docno`, and `value` must match the corresponding shape.
pub fn validate_lookup(identifier: &str, value: &str) -> Result<(), EngineError> {
    match identifier {
        "docno" => {
            let re = regex::Regex::new(DOCNO_PATTERN).expect("docno regex is valid");
            if re.is_match(value) {
                Ok(())
            } else {
                Err(EngineError::InvalidArguments(format!(
                    "`{value}` does not match the expected docno format {DOCNO_PATTERN}"
                )))
            }
        }
        "id" => value.parse::<usize>().map(|_| ()).map_err(|_| {
            EngineError::InvalidArguments(format!("`{value}` is not a valid integer id"))
        }),
        other => Err(EngineError::InvalidArguments(format!(
            "identifier must be `id` or `docno`, found `{other}`"
        ))),
    }
}

fn require_files(dir: &Path, files: &[&'static str]) -> Result<(), EngineError> {
    for &file in files {
        let path: PathBuf = dir.join(file);
        if !path.exists() {
            return Err(EngineError::MissingIndexArtifact { dir: dir.to_path_buf(), file });
        }
    }
    Ok(())
}

/// Required BM25-index artifacts, for a quick up-front presence check
/// before handing the directory to [`trecbm25_core::Bm25Index::load`].
pub fn require_index_artifacts(dir: &Path) -> Result<(), EngineError> {
    require_files(
        dir,
        &["lexicon.txt", "index_registrar.txt", "inverted_index.json", "doc-lengths.txt"],
    )
}

/// The boolean-AND retriever only reads the lexicon and postings, never
/// document lengths, so it checks one fewer file than [`require_index_artifacts`].
pub fn require_boolean_index_artifacts(dir: &Path) -> Result<(), EngineError> {
    require_files(dir, &["lexicon.txt", "index_registrar.txt", "inverted_index.json"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_is_rejected() {
        assert!(matches!(
            require_absolute(Path::new("relative/path")),
            Err(EngineError::NotAbsolute(_))
        ));
    }

    #[test]
    fn porter_stem_accepts_case_insensitive_booleans() {
        assert_eq!(parse_porter_stem("True").unwrap(), true);
        assert_eq!(parse_porter_stem("FALSE").unwrap(), false);
        assert!(parse_porter_stem("maybe").is_err());
    }

    #[test]
    fn docno_identifier_enforces_the_docno_shape() {
        assert!(validate_lookup("docno", "LA010189-0001").is_ok());
        assert!(validate_lookup("docno", "not-a-docno").is_err());
    }

    #[test]
    fn id_identifier_requires_an_integer() {
        assert!(validate_lookup("id", "42").is_ok());
        assert!(validate_lookup("id", "forty-two").is_err());
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert!(validate_lookup("title", "anything").is_err());
    }
}
