//! Error types for the command-line tools.
//!
//! Wraps [`CorpusError`] from the core with the I/O and parsing failures that
//! only occur once files are involved.

use std::path::PathBuf;

use katameros_core::{CorpusError, Language};
use thiserror::Error;

/// Main error type for the command-line tools.
#[derive(Debug, Error)]
pub enum CliError {
    /// A document failed to transform.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The input path does not exist.
    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A language code has the wrong shape.
    #[error("Invalid language code format: '{0}'. Expected a two-letter code, optionally with a suffix (e.g. en, co-en)")]
    InvalidLanguageCode(String),

    /// The new language is the ground truth, whose files would be overwritten.
    #[error("Language '{}' is the ground truth; its files are the source and cannot be scaffolded", .0.code())]
    GroundTruthLanguage(Language),

    /// A path has no file name to derive sibling names from.
    #[error("Not a document file: {}", .0.display())]
    NotAFile(PathBuf),

    /// At least one file of a batch failed.
    #[error("{failed} of {total} files failed")]
    BatchFailed { failed: usize, total: usize },
}

/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;
