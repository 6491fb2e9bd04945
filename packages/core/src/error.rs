//! Error types for the transformation core.
//!
//! Every error is scoped to a single document. Batch callers record the
//! error for that document and move on to the next one.

use thiserror::Error;

use crate::language::Language;
use crate::model::SectionKind;

/// Main error type for the core library.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A language's structure disagrees with the ground truth at a position
    /// that cannot be resolved by treating the entry as absent.
    #[error("Structural mismatch in {language}{}: expected {expected}, found {found}", .index.map(|i| format!(" at section {i}")).unwrap_or_default())]
    StructuralMismatch {
        language: Language,
        index: Option<usize>,
        expected: String,
        found: String,
    },

    /// A columnar array has a nonzero length that differs from the agreed length.
    #[error("Length mismatch: {language} has {actual} entries while {expected} were expected (first entry: {})", .sample.as_deref().unwrap_or("<none>"))]
    LengthMismatch {
        language: Language,
        expected: usize,
        actual: usize,
        sample: Option<String>,
    },

    /// The root variant of an untyped tree could not be inferred.
    #[error("Could not determine a valid root type. Keys found: {}", .keys.join(", "))]
    Classification { keys: Vec<String> },

    /// A section's `type` discriminant is outside the known set.
    #[error("Unsupported section type '{found}'{}", .index.map(|i| format!(" at section {i}")).unwrap_or_default())]
    UnsupportedSectionType { index: Option<usize>, found: String },

    /// A reference section lacks the field it points with.
    #[error("Missing field '{field}' in {kind} section{}", .index.map(|i| format!(" {i}")).unwrap_or_default())]
    MissingField {
        index: Option<usize>,
        kind: SectionKind,
        field: &'static str,
    },

    /// The ground-truth language has no document to merge from.
    #[error("Ground truth language {0} has no document")]
    MissingGroundTruth(Language),

    /// A short language code is not registered.
    #[error("Unknown language code: '{0}'")]
    UnknownLanguageCode(String),

    /// A language registry was built from an empty or duplicated list.
    #[error("Invalid language registry: {0}")]
    InvalidRegistry(String),

    /// The tree has the right root variant but does not decode into it.
    #[error("Malformed document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
