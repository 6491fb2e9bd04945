//! Merge per-language documents into one joint document.
//!
//! The ground-truth language (the first one registered) decides the shape of
//! the result. Every other language contributes text at the positions the
//! ground truth defines:
//!
//! - titles, info text, sub-reading titles and commemorations default to an
//!   empty string when a language lacks them;
//! - verses and reading text a language lacks are left absent;
//! - reading and compound-prayer references are copied from the ground truth;
//! - entries beyond the ground truth's length are discarded with a warning.
//!
//! A language whose section sits where the ground truth has a section of
//! another kind cannot be aligned, and fails the whole merge.

use crate::error::{CorpusError, Result};
use crate::language::{Language, LanguageMap, LanguageRegistry};
use crate::model::{
    Commemoration, Document, InfoSection, JointDocument, JointSection, MultilingualText, Prayer,
    Reading, Section, SplitDocument, SplitSection, SubReading, Synaxarium, VersesSection,
};

/// One optional value per registered language, in registry order.
type PerLanguage<'a, T> = Vec<(Language, Option<&'a T>)>;

/// Merge split documents into a joint document.
///
/// Languages missing from `docs` contribute nothing. Documents for languages
/// outside the registry are ignored.
///
/// # Errors
/// - [`CorpusError::MissingGroundTruth`] when the ground-truth document is absent.
/// - [`CorpusError::StructuralMismatch`] when a language has a different root
///   variant, or a section kind that disagrees with the ground truth.
pub fn merge(registry: &LanguageRegistry, docs: &LanguageMap<SplitDocument>) -> Result<JointDocument> {
    let ground_truth = registry.ground_truth();
    let truth = docs
        .get(&ground_truth)
        .ok_or(CorpusError::MissingGroundTruth(ground_truth))?;

    for language in docs.keys().filter(|language| !registry.contains(**language)) {
        tracing::warn!(%language, "ignoring document for unregistered language");
    }

    let aligned: PerLanguage<SplitDocument> = registry
        .languages()
        .iter()
        .map(|language| (*language, docs.get(language)))
        .collect();

    for (language, doc) in &aligned {
        if let Some(doc) = doc {
            if doc.kind() != truth.kind() {
                return Err(CorpusError::StructuralMismatch {
                    language: *language,
                    index: None,
                    expected: truth.kind().to_string(),
                    found: doc.kind().to_string(),
                });
            }
        }
    }

    tracing::debug!(kind = %truth.kind(), %ground_truth, "merging document");

    Ok(match truth {
        Document::Prayer(prayer) => {
            let prayers = project(&aligned, |doc| match doc {
                Document::Prayer(prayer) => Some(prayer),
                _ => None,
            });
            Document::Prayer(merge_prayer(prayer, &prayers)?)
        }
        Document::Reading(reading) => {
            let readings = project(&aligned, |doc| match doc {
                Document::Reading(reading) => Some(reading),
                _ => None,
            });
            Document::Reading(merge_reading(reading, &readings))
        }
        Document::Synaxarium(synaxarium) => {
            let synaxaria = project(&aligned, |doc| match doc {
                Document::Synaxarium(synaxarium) => Some(synaxarium),
                _ => None,
            });
            Document::Synaxarium(merge_synaxarium(synaxarium, &synaxaria))
        }
    })
}

fn merge_prayer(
    truth: &Prayer<String>,
    prayers: &PerLanguage<'_, Prayer<String>>,
) -> Result<Prayer<MultilingualText>> {
    let title = truth
        .title
        .as_ref()
        .map(|_| text_or_empty(&project(prayers, |prayer| prayer.title.as_ref())));

    let sections = project(prayers, |prayer| prayer.sections.as_ref());
    let sections = match &truth.sections {
        Some(truth_sections) => Some(merge_sections(truth_sections, &sections)?),
        None => {
            if sections.iter().any(|(_, sections)| sections.is_some()) {
                tracing::warn!("ground truth has no sections, discarding translated sections");
            }
            None
        }
    };

    Ok(Prayer {
        title,
        occasion: truth.occasion,
        sections,
    })
}

fn merge_sections(
    truth: &[SplitSection],
    sections: &PerLanguage<'_, Vec<SplitSection>>,
) -> Result<Vec<JointSection>> {
    warn_surplus("sections", truth.len(), sections);

    truth
        .iter()
        .enumerate()
        .map(|(index, truth_section)| {
            let at_index = project(sections, |sections| sections.get(index));

            for (language, section) in &at_index {
                if let Some(section) = section {
                    if section.kind() != truth_section.kind() {
                        return Err(CorpusError::StructuralMismatch {
                            language: *language,
                            index: Some(index),
                            expected: truth_section.kind().to_string(),
                            found: section.kind().to_string(),
                        });
                    }
                }
            }

            Ok(match truth_section {
                Section::Info(info) => Section::Info(InfoSection {
                    occasion: info.occasion,
                    text: text_or_empty(&project(&at_index, |section| match section {
                        Section::Info(info) => Some(&info.text),
                        _ => None,
                    })),
                }),
                Section::Verses(verses) => {
                    let columns = project(&at_index, |section| match section {
                        Section::Verses(verses) => Some(&verses.verses),
                        _ => None,
                    });
                    warn_surplus("verses", verses.verses.len(), &columns);
                    Section::Verses(VersesSection {
                        speaker: verses.speaker,
                        saint: verses.saint,
                        occasion: verses.occasion,
                        inaudible: verses.inaudible,
                        verses: zip_sparse(verses.verses.len(), &columns),
                    })
                }
                Section::Reading(reading) => Section::Reading(reading.clone()),
                Section::CompoundPrayer(compound) => Section::CompoundPrayer(compound.clone()),
            })
        })
        .collect()
}

fn merge_reading(
    truth: &Reading<String>,
    readings: &PerLanguage<'_, Reading<String>>,
) -> Reading<MultilingualText> {
    for (language, reading) in readings {
        let extra = reading
            .map(|reading| reading.readings.keys().filter(|key| !truth.readings.contains_key(*key)));
        for reading_type in extra.into_iter().flatten() {
            tracing::warn!(%language, %reading_type, "discarding reading type absent from ground truth");
        }
    }

    Reading {
        title: text_or_empty(&project(readings, |reading| Some(&reading.title))),
        readings: truth
            .readings
            .iter()
            .map(|(reading_type, subs)| {
                let per_language = project(readings, |reading| reading.readings.get(reading_type));
                warn_surplus("sub-readings", subs.len(), &per_language);

                let subs = subs
                    .iter()
                    .enumerate()
                    .map(|(i, sub)| {
                        let at_index = project(&per_language, |subs| subs.get(i));
                        let text = project(&at_index, |sub| Some(&sub.text));
                        warn_surplus("reading paragraphs", sub.text.len(), &text);
                        SubReading {
                            title: text_or_empty(&project(&at_index, |sub| Some(&sub.title))),
                            text: zip_sparse(sub.text.len(), &text),
                        }
                    })
                    .collect();
                (*reading_type, subs)
            })
            .collect(),
    }
}

fn merge_synaxarium(
    truth: &Synaxarium<String>,
    synaxaria: &PerLanguage<'_, Synaxarium<String>>,
) -> Synaxarium<MultilingualText> {
    let commemorations = project(synaxaria, |synaxarium| Some(&synaxarium.commemorations));
    warn_surplus("commemorations", truth.commemorations.len(), &commemorations);

    Synaxarium {
        title: text_or_empty(&project(synaxaria, |synaxarium| Some(&synaxarium.title))),
        commemorations: (0..truth.commemorations.len())
            .map(|i| {
                let at_index = project(&commemorations, |commemorations| commemorations.get(i));
                Commemoration {
                    title: text_or_empty(&project(&at_index, |c| Some(&c.title))),
                    text: text_or_empty(&project(&at_index, |c| Some(&c.text))),
                }
            })
            .collect(),
    }
}

fn project<'a, T, U>(
    items: &PerLanguage<'a, T>,
    f: impl Fn(&'a T) -> Option<&'a U>,
) -> PerLanguage<'a, U> {
    items
        .iter()
        .map(|(language, item)| (*language, item.and_then(&f)))
        .collect()
}

/// Every language, with an empty string where a language has no value.
fn text_or_empty(items: &PerLanguage<'_, String>) -> MultilingualText {
    items
        .iter()
        .map(|(language, text)| (*language, text.cloned().unwrap_or_default()))
        .collect()
}

/// `len` records; a language lacking an entry is absent from that record.
fn zip_sparse(len: usize, columns: &PerLanguage<'_, Vec<String>>) -> Vec<MultilingualText> {
    (0..len)
        .map(|i| {
            columns
                .iter()
                .filter_map(|(language, column)| {
                    column
                        .and_then(|column| column.get(i))
                        .map(|text| (*language, text.clone()))
                })
                .collect()
        })
        .collect()
}

fn warn_surplus<T>(what: &str, expected: usize, items: &PerLanguage<'_, Vec<T>>) {
    for (language, item) in items {
        if let Some(item) = item {
            if item.len() > expected {
                tracing::warn!(
                    %language,
                    expected,
                    found = item.len(),
                    "discarding {what} beyond the ground truth"
                );
            }
        }
    }
}
