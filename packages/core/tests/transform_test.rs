//! End-to-end tests for the split, merge and columnar transformations.
//!
//! Fixtures are YAML files as they appear in the corpus, parsed into trees
//! the same way the command-line tool does.

use std::fs;
use std::path::Path;

use katameros_core::{
    classify, columnarize, joint_from_tree, merge, split, Commemoration, CompoundPrayerSection,
    CorpusError, Document, InfoSection, JointDocument, Language, LanguageMap, LanguageRegistry,
    MultilingualText, Prayer, Reading, ReadingSection, ReadingType, RootKind, Section,
    SectionKind, SplitDocument, SubReading, Synaxarium, Tree, VersesSection,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Load a fixture file as an untyped tree.
fn load_fixture(name: &str) -> Tree {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
    serde_yaml_ng::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

fn load_joint(name: &str) -> JointDocument {
    joint_from_tree(load_fixture(name)).unwrap_or_else(|e| panic!("Failed to decode {name}: {e}"))
}

fn sections(doc: &JointDocument) -> &[Section<MultilingualText>] {
    match doc {
        Document::Prayer(Prayer {
            sections: Some(sections),
            ..
        }) => sections,
        other => panic!("expected prayer with sections, got {other:?}"),
    }
}

#[test]
fn test_round_trip_prayer() {
    let registry = LanguageRegistry::default();
    let joint = load_joint("vespers/joint.yml");

    let merged = merge(&registry, &split(&registry, &joint)).unwrap();

    assert_eq!(merged.compact(), joint.compact());
}

#[test]
fn test_round_trip_reading() {
    let registry = LanguageRegistry::default();
    let joint = load_joint("readings/thout-1.yml");
    assert_eq!(joint.kind(), RootKind::Reading);

    let merged = merge(&registry, &split(&registry, &joint)).unwrap();

    assert_eq!(merged.compact(), joint.compact());
}

#[test]
fn test_round_trip_synaxarium() {
    let registry = LanguageRegistry::default();
    let joint = load_joint("synaxarium/thout-1.yml");
    assert_eq!(joint.kind(), RootKind::Synaxarium);

    let merged = merge(&registry, &split(&registry, &joint)).unwrap();

    assert_eq!(merged.compact(), joint.compact());
}

#[test]
fn test_every_projection_has_the_joint_shape() {
    let registry = LanguageRegistry::all();

    for name in ["vespers/joint.yml", "readings/thout-1.yml", "synaxarium/thout-1.yml"] {
        let joint = load_joint(name);
        let projections = split(&registry, &joint);

        assert_eq!(projections.len(), Language::ALL.len());
        for (language, doc) in &projections {
            assert_eq!(doc.shape(), joint.shape(), "{name} projected onto {language}");
        }
    }
}

/// Deterministic generator of joint documents with varied shapes and
/// partially translated leaves.
struct DocumentGenerator {
    state: u64,
    languages: Vec<Language>,
}

impl DocumentGenerator {
    const READING_TYPES: [ReadingType; 4] = [
        ReadingType::VespersGospel,
        ReadingType::PaulineEpistle,
        ReadingType::LiturgyGospel,
        ReadingType::Synaxarium,
    ];

    fn new(seed: u64, registry: &LanguageRegistry) -> Self {
        Self {
            state: seed,
            languages: registry.languages().to_vec(),
        }
    }

    fn below(&mut self, bound: usize) -> usize {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.state >> 33) as usize) % bound
    }

    /// Text in roughly two out of three languages.
    fn text(&mut self, label: &str) -> MultilingualText {
        let mut text = MultilingualText::new();
        for language in self.languages.clone() {
            if self.below(3) > 0 {
                text = text.with(language, format!("{label} ({})", language.code()));
            }
        }
        text
    }

    fn texts(&mut self, label: &str, max: usize) -> Vec<MultilingualText> {
        (0..self.below(max + 1))
            .map(|i| self.text(&format!("{label} {i}")))
            .collect()
    }

    fn reading_type(&mut self) -> ReadingType {
        Self::READING_TYPES[self.below(Self::READING_TYPES.len())]
    }

    fn section(&mut self, index: usize) -> Section<MultilingualText> {
        match self.below(4) {
            0 => Section::Info(InfoSection {
                occasion: None,
                text: self.text(&format!("info {index}")),
            }),
            1 => Section::Verses(VersesSection {
                speaker: None,
                saint: None,
                occasion: None,
                inaudible: None,
                verses: self.texts(&format!("verse {index}"), 4),
            }),
            2 => Section::Reading(ReadingSection {
                reading_type: self.reading_type(),
                occasion: None,
            }),
            _ => Section::CompoundPrayer(CompoundPrayerSection {
                path: format!("common/prayer-{index}"),
                occasion: None,
            }),
        }
    }

    fn document(&mut self) -> JointDocument {
        match self.below(3) {
            0 => {
                let title = (self.below(2) == 0).then(|| self.text("title"));
                let sections = (self.below(4) > 0)
                    .then(|| (0..self.below(6)).map(|i| self.section(i)).collect());
                Document::Prayer(Prayer {
                    title,
                    occasion: None,
                    sections,
                })
            }
            1 => {
                let title = self.text("title");
                let readings = (0..self.below(3))
                    .map(|_| {
                        let subs: Vec<_> = (0..self.below(3))
                            .map(|i| SubReading {
                                title: self.text(&format!("reading {i}")),
                                text: self.texts(&format!("paragraph {i}"), 3),
                            })
                            .collect();
                        (self.reading_type(), subs)
                    })
                    .collect();
                Document::Reading(Reading { title, readings })
            }
            _ => {
                let title = self.text("title");
                let commemorations = (0..self.below(4))
                    .map(|i| Commemoration {
                        title: self.text(&format!("saint {i}")),
                        text: self.text(&format!("life {i}")),
                    })
                    .collect();
                Document::Synaxarium(Synaxarium {
                    title,
                    commemorations,
                })
            }
        }
    }
}

#[test]
fn test_round_trip_and_shape_on_generated_documents() {
    for registry in [
        LanguageRegistry::default(),
        LanguageRegistry::all(),
        LanguageRegistry::from_codes("ar,co").unwrap(),
    ] {
        for seed in 0..200 {
            let joint = DocumentGenerator::new(seed, &registry).document();
            let projections = split(&registry, &joint);

            for (language, doc) in &projections {
                assert_eq!(doc.shape(), joint.shape(), "seed {seed} projected onto {language}");
            }

            let merged = merge(&registry, &projections)
                .unwrap_or_else(|e| panic!("seed {seed} failed to merge: {e}"));
            assert_eq!(merged.compact(), joint.compact(), "seed {seed}");
        }
    }
}

#[test]
fn test_projection_copies_references() {
    let registry = LanguageRegistry::default();
    let joint = load_joint("vespers/joint.yml");
    let projections = split(&registry, &joint);

    let Document::Prayer(Prayer {
        sections: Some(sections),
        ..
    }) = &projections[&Language::Coptic]
    else {
        panic!("expected prayer");
    };

    let Section::CompoundPrayer(compound) = &sections[4] else {
        panic!("expected compound prayer");
    };
    assert_eq!(compound.path, "common/our-father");
    // Coptic has no info text: it projects to an empty string
    let Section::Info(info) = &sections[0] else {
        panic!("expected info");
    };
    assert_eq!(info.text, "");
}

#[test]
fn test_legacy_columnar_verses_are_upgraded() {
    let joint = load_joint("vespers/legacy.yml");

    let Section::Verses(verses) = &sections(&joint)[0] else {
        panic!("expected verses");
    };
    assert_eq!(
        verses.verses,
        vec![
            MultilingualText::new()
                .with(Language::English, "Let us pray.")
                .with(Language::Arabic, "صلوا."),
            MultilingualText::new()
                .with(Language::English, "Peace be with you.")
                .with(Language::Arabic, "السلام لجميعكم."),
        ]
    );
}

#[test]
fn test_misaligned_columns_are_rejected() {
    let err = joint_from_tree(load_fixture("vespers/misaligned.yml")).unwrap_err();

    match err {
        CorpusError::LengthMismatch {
            language,
            expected,
            actual,
            ..
        } => {
            assert_eq!(language, Language::Arabic);
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_columnarize_is_idempotent() {
    let registry = LanguageRegistry::default();
    let joint = load_joint("vespers/joint.yml");

    let once = columnarize(&registry, &joint).unwrap();
    let twice = columnarize(&registry, &joint_from_tree(once.clone()).unwrap()).unwrap();

    assert_eq!(once, twice);
    assert_eq!(
        once["sections"][1]["verses"]["coptic"],
        json!(["Ϣⲗⲏⲗ.", ""])
    );
}

#[test]
fn test_merge_translation_files() {
    let registry = LanguageRegistry::from_codes("en,ar,co").unwrap();

    let english = SplitDocument::from_tree(load_fixture("vespers/vespers.en.yml")).unwrap();
    let arabic =
        SplitDocument::from_tree_as(load_fixture("vespers/vespers.ar.yml"), english.kind()).unwrap();

    let mut docs = LanguageMap::new();
    docs.insert(Language::English, english);
    docs.insert(Language::Arabic, arabic);

    let joint = merge(&registry, &docs).unwrap();

    let Document::Prayer(Prayer { title, .. }) = &joint else {
        panic!("expected prayer");
    };
    assert_eq!(
        title.as_ref(),
        Some(
            &MultilingualText::new()
                .with(Language::English, "Vespers Praise")
                .with(Language::Arabic, "تسبحة عشية")
                .with(Language::Coptic, "")
        )
    );

    let sections = sections(&joint);
    assert_eq!(
        sections.iter().map(Section::kind).collect::<Vec<_>>(),
        vec![SectionKind::Info, SectionKind::Verses, SectionKind::CompoundPrayer]
    );

    let Section::Verses(verses) = &sections[1] else {
        panic!("expected verses");
    };
    assert_eq!(
        verses.verses[1],
        MultilingualText::new().with(Language::English, "Peace be with you.")
    );
}

#[test]
fn test_ground_truth_decides_info_presence() {
    let registry = LanguageRegistry::from_codes("en,ar").unwrap();

    let mut docs = LanguageMap::new();
    docs.insert(
        Language::English,
        SplitDocument::from_tree(json!({"sections": [{"type": "info", "text": "hi"}]})).unwrap(),
    );
    docs.insert(
        Language::Arabic,
        SplitDocument::from_tree_as(json!({}), RootKind::Prayer).unwrap(),
    );

    let joint = merge(&registry, &docs).unwrap();

    assert_eq!(
        joint.to_tree().unwrap(),
        json!({
            "type": "prayer",
            "sections": [{"type": "info", "text": {"english": "hi", "arabic": ""}}]
        })
    );
}

#[test]
fn test_classifier_on_untyped_fixtures() {
    assert_eq!(classify(&load_fixture("vespers/legacy.yml")).unwrap(), RootKind::Prayer);
    assert_eq!(classify(&load_fixture("readings/thout-1.yml")).unwrap(), RootKind::Reading);
    assert_eq!(
        classify(&load_fixture("synaxarium/thout-1.yml")).unwrap(),
        RootKind::Synaxarium
    );
}
