//! Language registry.
//!
//! The set of languages is closed and known at compile time. A
//! [`LanguageRegistry`] selects the ordered subset a transformation runs over;
//! its first language is the ground truth for structure.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, Result};

/// Mapping from language to a per-language value, in canonical order.
pub type LanguageMap<T> = BTreeMap<Language, T>;

/// A supported language key.
///
/// Declaration order is the canonical serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Arabic,
    Coptic,
    CopticEnglish,
    CopticArabic,
}

impl Language {
    /// Every known language, in canonical order.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Arabic,
        Language::Coptic,
        Language::CopticEnglish,
        Language::CopticArabic,
    ];

    /// Key used in document trees (e.g. `coptic_english`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Arabic => "arabic",
            Self::Coptic => "coptic",
            Self::CopticEnglish => "coptic_english",
            Self::CopticArabic => "coptic_arabic",
        }
    }

    /// Short external code used in file names (e.g. `co-en`).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
            Self::Coptic => "co",
            Self::CopticEnglish => "co-en",
            Self::CopticArabic => "co-ar",
        }
    }

    /// Inverse of [`Language::code`].
    ///
    /// # Examples
    /// ```
    /// use katameros_core::Language;
    ///
    /// assert_eq!(Language::from_code("co-en").unwrap(), Language::CopticEnglish);
    /// assert!(Language::from_code("fr").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .ok_or_else(|| CorpusError::UnknownLanguageCode(code.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CorpusError;

    /// Accepts either the tree key (`arabic`) or the short code (`ar`).
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .map_or_else(|| Self::from_code(s), Ok)
    }
}

/// Ordered, duplicate-free set of languages a transformation operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
}

impl LanguageRegistry {
    /// Create a registry from an ordered list of languages.
    ///
    /// The first language becomes the ground truth.
    pub fn new(languages: impl IntoIterator<Item = Language>) -> Result<Self> {
        let mut ordered: Vec<Language> = Vec::new();
        for language in languages {
            if ordered.contains(&language) {
                return Err(CorpusError::InvalidRegistry(format!(
                    "{language} is listed more than once"
                )));
            }
            ordered.push(language);
        }

        if ordered.is_empty() {
            return Err(CorpusError::InvalidRegistry(
                "at least one language is required".to_string(),
            ));
        }

        Ok(Self { languages: ordered })
    }

    /// Registry containing every known language.
    #[must_use]
    pub fn all() -> Self {
        Self {
            languages: Language::ALL.to_vec(),
        }
    }

    /// Build a registry from a comma-separated list of short codes.
    ///
    /// # Examples
    /// ```
    /// use katameros_core::{Language, LanguageRegistry};
    ///
    /// let registry = LanguageRegistry::from_codes("en, ar").unwrap();
    /// assert_eq!(registry.languages(), &[Language::English, Language::Arabic]);
    /// ```
    pub fn from_codes(codes: &str) -> Result<Self> {
        let languages = codes
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(Language::from_code)
            .collect::<Result<Vec<_>>>()?;
        Self::new(languages)
    }

    /// Registered languages in order.
    #[must_use]
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// The language whose structure dictates the shape of merged output.
    #[must_use]
    pub fn ground_truth(&self) -> Language {
        // `new` guarantees at least one language
        self.languages[0]
    }

    #[must_use]
    pub fn contains(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }

    /// Apply `f` to every registered language and collect the results.
    pub fn for_each_language<T>(&self, mut f: impl FnMut(Language) -> T) -> LanguageMap<T> {
        self.languages
            .iter()
            .map(|&language| (language, f(language)))
            .collect()
    }

    /// Fallible variant of [`LanguageRegistry::for_each_language`]; stops at the first error.
    pub fn try_for_each_language<T, E>(
        &self,
        mut f: impl FnMut(Language) -> std::result::Result<T, E>,
    ) -> std::result::Result<LanguageMap<T>, E> {
        self.languages
            .iter()
            .map(|&language| f(language).map(|value| (language, value)))
            .collect()
    }
}

impl Default for LanguageRegistry {
    /// The four languages the corpus is transcribed in.
    fn default() -> Self {
        Self {
            languages: vec![
                Language::English,
                Language::Arabic,
                Language::Coptic,
                Language::CopticEnglish,
            ],
        }
    }
}
