//! Conversion between row-wise and columnar verse lists.
//!
//! The columnar layout stores one flat string array per language instead of
//! one multilingual record per verse. It is the legacy authoring format, and
//! the only place where misaligned translations can be caught: every language
//! that has verses at all must have exactly as many as the longest one.

use crate::error::{CorpusError, Result};
use crate::language::{LanguageMap, LanguageRegistry};
use crate::model::MultilingualText;

/// Convert columnar verses to one record per verse.
///
/// Languages with no entries are exempt from the length check and are
/// absent from every record.
///
/// # Errors
/// [`CorpusError::LengthMismatch`] when a language has a nonzero length
/// different from the longest language.
///
/// # Examples
/// ```
/// use katameros_core::{to_row_wise, Language, LanguageMap};
///
/// let mut columnar = LanguageMap::new();
/// columnar.insert(Language::English, vec!["a".to_string(), "b".to_string()]);
/// columnar.insert(Language::Coptic, vec![]);
///
/// let rows = to_row_wise(&columnar).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].get(Language::English), Some("b"));
/// assert_eq!(rows[1].get(Language::Coptic), None);
/// ```
pub fn to_row_wise(columnar: &LanguageMap<Vec<String>>) -> Result<Vec<MultilingualText>> {
    let max_len = columnar.values().map(Vec::len).max().unwrap_or(0);

    for (language, entries) in columnar {
        if !entries.is_empty() && entries.len() != max_len {
            return Err(CorpusError::LengthMismatch {
                language: *language,
                expected: max_len,
                actual: entries.len(),
                sample: entries.first().cloned(),
            });
        }
    }

    Ok((0..max_len)
        .map(|i| {
            columnar
                .iter()
                .filter_map(|(language, entries)| {
                    entries.get(i).map(|entry| (*language, entry.clone()))
                })
                .collect()
        })
        .collect())
}

/// Convert verse records to one array per registered language.
///
/// Total and length preserving: a language absent from a record contributes
/// an empty string at that position.
#[must_use]
pub fn to_columnar(
    registry: &LanguageRegistry,
    rows: &[MultilingualText],
) -> LanguageMap<Vec<String>> {
    registry.for_each_language(|language| {
        rows.iter()
            .map(|row| row.text(language).to_string())
            .collect()
    })
}
