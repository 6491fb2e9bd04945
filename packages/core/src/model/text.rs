//! Text leaves: the two representations a document's text can take.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::language::{Language, LanguageMap};

/// A text leaf representation.
///
/// Implemented by [`MultilingualText`] (joint form, every language co-located)
/// and [`String`] (split form, one language per document).
pub trait Leaf: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned {}

impl Leaf for String {}

impl Leaf for MultilingualText {}

/// Text with an optional value per language.
///
/// Never required to be total: not every language is transcribed for every leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultilingualText(LanguageMap<String>);

impl MultilingualText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        self.set(language, text);
        self
    }

    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        self.0.insert(language, text.into());
    }

    /// Value for a language, `None` when the language is absent.
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&str> {
        self.0.get(&language).map(String::as_str)
    }

    /// Value for a language, empty when absent.
    #[must_use]
    pub fn text(&self, language: Language) -> &str {
        self.get(language).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Languages that have an entry, in canonical order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &str)> + '_ {
        self.0.iter().map(|(language, text)| (*language, text.as_str()))
    }

    /// Normalized copy: trailing whitespace trimmed, empty entries dropped.
    ///
    /// Split projection fills absent languages with empty strings, so
    /// round-trip comparisons are made on compacted text.
    #[must_use]
    pub fn compact(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(language, text)| (*language, text.trim_end()))
                .filter(|(_, text)| !text.is_empty())
                .map(|(language, text)| (language, text.to_string()))
                .collect(),
        )
    }
}

impl FromIterator<(Language, String)> for MultilingualText {
    fn from_iter<I: IntoIterator<Item = (Language, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<LanguageMap<String>> for MultilingualText {
    fn from(map: LanguageMap<String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_and_text() {
        let text = MultilingualText::new().with(Language::English, "Amen");
        assert_eq!(text.get(Language::English), Some("Amen"));
        assert_eq!(text.get(Language::Arabic), None);
        assert_eq!(text.text(Language::Arabic), "");
    }

    #[test]
    fn test_compact() {
        let text = MultilingualText::new()
            .with(Language::English, "Amen.  ")
            .with(Language::Arabic, "")
            .with(Language::Coptic, " \n");

        assert_eq!(text.compact(), MultilingualText::new().with(Language::English, "Amen."));
    }

    #[test]
    fn test_serializes_in_canonical_order() {
        let text = MultilingualText::new()
            .with(Language::Coptic, "c")
            .with(Language::English, "e");
        assert_eq!(
            serde_json::to_string(&text).unwrap(),
            r#"{"english":"e","coptic":"c"}"#
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let text: MultilingualText = serde_json::from_str(r#"{"arabic":"x"}"#).unwrap();
        assert_eq!(text.languages().collect::<Vec<_>>(), vec![Language::Arabic]);
    }

    #[test]
    fn test_deserialize_rejects_unknown_language() {
        let result = serde_json::from_str::<MultilingualText>(r#"{"french":"x"}"#);
        assert!(result.is_err());
    }
}
