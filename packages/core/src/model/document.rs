//! Root documents: prayers, readings and synaxaria.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::section::{Section, SectionKind};
use super::text::{Leaf, MultilingualText};
use super::vocabulary::{Occasion, ReadingType};
use crate::classify::classify;
use crate::error::{CorpusError, Result};
use crate::Tree;

/// Root variant of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    Prayer,
    Reading,
    Synaxarium,
}

impl RootKind {
    /// Value of the root `type` field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prayer => "prayer",
            Self::Reading => "reading",
            Self::Synaxarium => "synaxarium",
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RootKind {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prayer" => Ok(Self::Prayer),
            "reading" => Ok(Self::Reading),
            "synaxarium" => Ok(Self::Synaxarium),
            other => Err(CorpusError::Classification {
                keys: vec![format!("type={other}")],
            }),
        }
    }
}

/// A prayer: an optional title and an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Leaf", deserialize = "L: Leaf"))]
pub struct Prayer<L> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<L>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section<L>>>,
}

/// One reading within a reading type (e.g. the first of several prophecies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Leaf", deserialize = "L: Leaf"))]
pub struct SubReading<L> {
    #[serde(default)]
    pub title: L,
    #[serde(default)]
    pub text: Vec<L>,
}

/// The readings of one day, keyed by their place in the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Leaf", deserialize = "L: Leaf"))]
pub struct Reading<L> {
    #[serde(default)]
    pub title: L,
    #[serde(flatten)]
    pub readings: BTreeMap<ReadingType, Vec<SubReading<L>>>,
}

/// A single commemoration of the synaxarium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Leaf", deserialize = "L: Leaf"))]
pub struct Commemoration<L> {
    #[serde(default)]
    pub title: L,
    #[serde(default)]
    pub text: L,
}

/// The commemorations of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Leaf", deserialize = "L: Leaf"))]
pub struct Synaxarium<L> {
    #[serde(default)]
    pub title: L,
    #[serde(default)]
    pub commemorations: Vec<Commemoration<L>>,
}

/// A document in either joint (`L = MultilingualText`) or split (`L = String`) form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", bound(serialize = "L: Leaf"))]
pub enum Document<L> {
    Prayer(Prayer<L>),
    Reading(Reading<L>),
    Synaxarium(Synaxarium<L>),
}

/// Document with every language co-located in each leaf.
pub type JointDocument = Document<MultilingualText>;

/// Document holding a single language's plain strings.
pub type SplitDocument = Document<String>;

/// Structure of a document with its text removed.
///
/// Two documents with equal shapes are structurally isomorphic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentShape {
    pub kind: RootKind,
    pub has_title: bool,
    /// Kind and verse count of every section, `None` when the prayer has no sections.
    pub sections: Option<Vec<(SectionKind, usize)>>,
    /// Text length of every sub-reading, per reading type.
    pub readings: Vec<(ReadingType, Vec<usize>)>,
    pub commemorations: usize,
}

impl<L: Leaf> Document<L> {
    #[must_use]
    pub fn kind(&self) -> RootKind {
        match self {
            Self::Prayer(_) => RootKind::Prayer,
            Self::Reading(_) => RootKind::Reading,
            Self::Synaxarium(_) => RootKind::Synaxarium,
        }
    }

    #[must_use]
    pub fn shape(&self) -> DocumentShape {
        let mut shape = DocumentShape {
            kind: self.kind(),
            has_title: true,
            sections: None,
            readings: Vec::new(),
            commemorations: 0,
        };

        match self {
            Self::Prayer(prayer) => {
                shape.has_title = prayer.title.is_some();
                shape.sections = prayer.sections.as_ref().map(|sections| {
                    sections
                        .iter()
                        .map(|section| (section.kind(), section.verse_count()))
                        .collect()
                });
            }
            Self::Reading(reading) => {
                shape.readings = reading
                    .readings
                    .iter()
                    .map(|(reading_type, subs)| {
                        (*reading_type, subs.iter().map(|sub| sub.text.len()).collect())
                    })
                    .collect();
            }
            Self::Synaxarium(synaxarium) => {
                shape.commemorations = synaxarium.commemorations.len();
            }
        }

        shape
    }

    /// Rebuild the document with every text leaf passed through `f`.
    pub fn map_leaves<M: Leaf>(&self, mut f: impl FnMut(&L) -> M) -> Document<M> {
        match self {
            Self::Prayer(prayer) => Document::Prayer(Prayer {
                title: prayer.title.as_ref().map(&mut f),
                occasion: prayer.occasion,
                sections: prayer.sections.as_ref().map(|sections| {
                    sections
                        .iter()
                        .map(|section| section.map_leaves(&mut f))
                        .collect()
                }),
            }),
            Self::Reading(reading) => Document::Reading(Reading {
                title: f(&reading.title),
                readings: reading
                    .readings
                    .iter()
                    .map(|(reading_type, subs)| {
                        let subs = subs
                            .iter()
                            .map(|sub| SubReading {
                                title: f(&sub.title),
                                text: sub.text.iter().map(&mut f).collect(),
                            })
                            .collect();
                        (*reading_type, subs)
                    })
                    .collect(),
            }),
            Self::Synaxarium(synaxarium) => Document::Synaxarium(Synaxarium {
                title: f(&synaxarium.title),
                commemorations: synaxarium
                    .commemorations
                    .iter()
                    .map(|commemoration| Commemoration {
                        title: f(&commemoration.title),
                        text: f(&commemoration.text),
                    })
                    .collect(),
            }),
        }
    }

    /// Decode a document from an untyped tree.
    ///
    /// The root variant comes from the `type` field when it holds a known
    /// value, and is inferred with [`classify`] otherwise.
    pub fn from_tree(tree: Tree) -> Result<Self> {
        let kind = match declared_kind(&tree) {
            Some(kind) => kind,
            None => classify(&tree)?,
        };

        Self::from_tree_as(tree, kind)
    }

    /// Decode a document, falling back to `fallback` when the tree neither
    /// declares nor reveals its root variant.
    ///
    /// A declared or inferable variant always wins, so a translation of the
    /// wrong variant still reaches [`crate::merge::merge`] as such and is rejected
    /// there. Empty and title-only trees decode as `fallback`.
    pub fn from_tree_or(tree: Tree, fallback: RootKind) -> Result<Self> {
        let kind = declared_kind(&tree)
            .or_else(|| classify(&tree).ok())
            .unwrap_or(fallback);

        Self::from_tree_as(tree, kind)
    }

    /// Decode a document whose root variant is already known.
    ///
    /// Used for translations of a ground-truth document, which may be too
    /// sparse to classify on their own. An empty tree decodes to an empty
    /// document.
    pub fn from_tree_as(tree: Tree, kind: RootKind) -> Result<Self> {
        let mut map = match tree {
            Tree::Null => serde_json::Map::new(),
            other => serde_json::from_value(other)?,
        };
        map.remove("type");

        tracing::debug!(%kind, "decoding document");

        Ok(match kind {
            RootKind::Prayer => {
                let sections = match map.remove("sections") {
                    None | Some(Tree::Null) => None,
                    Some(value) => {
                        let items: Vec<Tree> = serde_json::from_value(value)?;
                        Some(
                            items
                                .into_iter()
                                .enumerate()
                                .map(|(index, item)| Section::from_tree(item, index))
                                .collect::<Result<Vec<_>>>()?,
                        )
                    }
                };
                let mut prayer: Prayer<L> = serde_json::from_value(Tree::Object(map))?;
                prayer.sections = sections;
                Self::Prayer(prayer)
            }
            RootKind::Reading => Self::Reading(serde_json::from_value(Tree::Object(map))?),
            RootKind::Synaxarium => Self::Synaxarium(serde_json::from_value(Tree::Object(map))?),
        })
    }

    /// Encode the document as an untyped tree.
    pub fn to_tree(&self) -> Result<Tree> {
        Ok(serde_json::to_value(self)?)
    }
}

impl JointDocument {
    /// Copy with every leaf compacted, for comparisons that ignore empty
    /// entries and trailing whitespace.
    #[must_use]
    pub fn compact(&self) -> Self {
        self.map_leaves(MultilingualText::compact)
    }
}

/// Root variant named by the `type` field, if it names a known one.
fn declared_kind(tree: &Tree) -> Option<RootKind> {
    let value = tree.get("type").and_then(Tree::as_str)?;
    match value.parse::<RootKind>() {
        Ok(kind) => Some(kind),
        Err(_) => {
            tracing::warn!(root_type = value, "ignoring unknown root type");
            None
        }
    }
}

impl<'de, L: Leaf> Deserialize<'de> for Document<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tree = Tree::deserialize(deserializer)?;
        Self::from_tree(tree).map_err(serde::de::Error::custom)
    }
}
