//! Prayer sections.
//!
//! A section is one of four variants, discriminated by the `type` field.
//! Sections without a `type` are verses, which is how the oldest files were
//! written.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::text::Leaf;
use super::vocabulary::{Occasion, ReadingType, Saint, Speaker};
use crate::error::{CorpusError, Result};
use crate::Tree;

/// Bare discriminant of a [`Section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Info,
    Verses,
    Reading,
    CompoundPrayer,
}

impl SectionKind {
    /// Value of the `type` field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Verses => "verses",
            Self::Reading => "reading",
            Self::CompoundPrayer => "compound-prayer",
        }
    }

    /// Parse a `type` field; `None` for values outside the known set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "info" => Some(Self::Info),
            "verses" => Some(Self::Verses),
            "reading" => Some(Self::Reading),
            "compound-prayer" => Some(Self::CompoundPrayer),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-standing instruction or rubric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Leaf", deserialize = "L: Leaf"))]
pub struct InfoSection<L> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
    #[serde(default)]
    pub text: L,
}

/// Ordered verses, optionally attributed to a speaker or saint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Leaf", deserialize = "L: Leaf"))]
pub struct VersesSection<L> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saint: Option<Saint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inaudible: Option<bool>,
    #[serde(default)]
    pub verses: Vec<L>,
}

/// Reference to the reading of the day; carries no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSection {
    pub reading_type: ReadingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
}

/// Reference to another prayer document; carries no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundPrayerSection {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
}

/// A prayer section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", bound(serialize = "L: Leaf"))]
pub enum Section<L> {
    Info(InfoSection<L>),
    Verses(VersesSection<L>),
    Reading(ReadingSection),
    CompoundPrayer(CompoundPrayerSection),
}

impl<L: Leaf> Section<L> {
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Info(_) => SectionKind::Info,
            Self::Verses(_) => SectionKind::Verses,
            Self::Reading(_) => SectionKind::Reading,
            Self::CompoundPrayer(_) => SectionKind::CompoundPrayer,
        }
    }

    /// Number of verses, zero for non-verse sections.
    #[must_use]
    pub fn verse_count(&self) -> usize {
        match self {
            Self::Verses(section) => section.verses.len(),
            _ => 0,
        }
    }

    /// Rebuild the section with every text leaf passed through `f`.
    ///
    /// References are language independent and are copied unchanged.
    pub fn map_leaves<M: Leaf>(&self, f: &mut impl FnMut(&L) -> M) -> Section<M> {
        match self {
            Self::Info(section) => Section::Info(InfoSection {
                occasion: section.occasion,
                text: f(&section.text),
            }),
            Self::Verses(section) => Section::Verses(VersesSection {
                speaker: section.speaker,
                saint: section.saint,
                occasion: section.occasion,
                inaudible: section.inaudible,
                verses: section.verses.iter().map(&mut *f).collect(),
            }),
            Self::Reading(section) => Section::Reading(section.clone()),
            Self::CompoundPrayer(section) => Section::CompoundPrayer(section.clone()),
        }
    }

    /// Decode one section of an untyped tree.
    ///
    /// `index` is the position within the prayer and is reported in errors.
    pub fn from_tree(tree: Tree, index: usize) -> Result<Self> {
        let raw: RawSection<L> = serde_json::from_value(tree)?;
        Self::from_raw(raw, Some(index))
    }

    fn from_raw(raw: RawSection<L>, index: Option<usize>) -> Result<Self> {
        let kind = match raw.kind.as_deref() {
            None => SectionKind::Verses,
            Some(value) => SectionKind::parse(value).ok_or_else(|| {
                CorpusError::UnsupportedSectionType {
                    index,
                    found: value.to_string(),
                }
            })?,
        };

        let missing = |field: &'static str| CorpusError::MissingField { index, kind, field };

        Ok(match kind {
            SectionKind::Info => Self::Info(InfoSection {
                occasion: raw.occasion,
                text: raw.text.unwrap_or_default(),
            }),
            SectionKind::Verses => Self::Verses(VersesSection {
                speaker: raw.speaker,
                saint: raw.saint,
                occasion: raw.occasion,
                inaudible: raw.inaudible,
                verses: raw.verses.unwrap_or_default(),
            }),
            SectionKind::Reading => Self::Reading(ReadingSection {
                reading_type: raw.reading_type.ok_or_else(|| missing("readingType"))?,
                occasion: raw.occasion,
            }),
            SectionKind::CompoundPrayer => Self::CompoundPrayer(CompoundPrayerSection {
                path: raw.path.ok_or_else(|| missing("path"))?,
                occasion: raw.occasion,
            }),
        })
    }
}

impl<'de, L: Leaf> Deserialize<'de> for Section<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawSection::<L>::deserialize(deserializer)?;
        Self::from_raw(raw, None).map_err(serde::de::Error::custom)
    }
}

/// Union of every section field, before dispatch on `type`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "L: Leaf"))]
struct RawSection<L> {
    #[serde(rename = "type")]
    kind: Option<String>,
    occasion: Option<Occasion>,
    text: Option<L>,
    speaker: Option<Speaker>,
    saint: Option<Saint>,
    inaudible: Option<bool>,
    verses: Option<Vec<L>>,
    reading_type: Option<ReadingType>,
    path: Option<String>,
}
