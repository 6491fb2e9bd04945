//! Per-file operations behind each subcommand.
//!
//! Every operation reads its inputs, transforms them with the core and only
//! then writes. A file that fails leaves no output behind.

use std::path::{Path, PathBuf};

use katameros_core::{
    columnarize, joint_from_tree, merge, scaffold, split, stamp_root_type, Language, LanguageMap,
    LanguageRegistry, RootKind, SplitDocument,
};

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use crate::paths::{joint_path, language_variant};
use crate::yaml::{load_tree, save_json, save_yaml};

/// Split a joint file into one file per registered language.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn split_file(registry: &LanguageRegistry, path: &Path) -> Result<Vec<PathBuf>> {
    let joint = joint_from_tree(load_tree(path)?)?;

    let outputs = split(registry, &joint)
        .into_iter()
        .map(|(language, doc)| Ok((language_variant(path, language)?, doc.to_tree()?)))
        .collect::<Result<Vec<_>>>()?;

    for (output, tree) in &outputs {
        save_yaml(output, tree)?;
    }

    Ok(outputs.into_iter().map(|(output, _)| output).collect())
}

/// Merge a ground-truth file and its sibling translations into a joint file.
///
/// A missing translation file contributes nothing. A file that neither
/// declares nor reveals its root type is read as a prayer when it is the
/// ground truth, and as the ground truth's type otherwise.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn merge_file(
    registry: &LanguageRegistry,
    path: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    let ground_truth = registry.ground_truth();
    let truth = SplitDocument::from_tree_or(load_tree(path)?, RootKind::Prayer)?;
    let kind = truth.kind();
    let mut truth = Some(truth);

    let docs = registry.try_for_each_language(|language| -> Result<Option<SplitDocument>> {
        if language == ground_truth {
            return Ok(truth.take());
        }
        let sibling = language_variant(path, language)?;
        if !sibling.exists() {
            tracing::warn!(%language, sibling = %sibling.display(), "translation file missing");
            return Ok(None);
        }
        Ok(Some(SplitDocument::from_tree_or(load_tree(&sibling)?, kind)?))
    })?;
    let docs: LanguageMap<SplitDocument> = docs
        .into_iter()
        .filter_map(|(language, doc)| doc.map(|doc| (language, doc)))
        .collect();

    let joint = merge(registry, &docs)?;
    let output = joint_path(path, format.extension())?;
    match format {
        OutputFormat::Json => save_json(&output, &joint)?,
        OutputFormat::Yaml => save_yaml(&output, &joint)?,
    }

    Ok(vec![output])
}

/// Upgrade a legacy joint file and write it as canonical YAML and JSON.
///
/// Writes to `target` when given, otherwise rewrites `path` in place.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn preprocess_file(path: &Path, target: Option<&Path>) -> Result<Vec<PathBuf>> {
    let joint = joint_from_tree(load_tree(path)?)?;
    let tree = joint.to_tree()?;

    let yaml_output = target.unwrap_or(path).to_path_buf();
    let json_output = yaml_output.with_extension(crate::config::JSON_EXTENSION);

    save_yaml(&yaml_output, &tree)?;
    save_json(&json_output, &tree)?;

    Ok(vec![yaml_output, json_output])
}

/// Rewrite a joint file with its verses in columnar layout.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn columnize_file(registry: &LanguageRegistry, path: &Path) -> Result<Vec<PathBuf>> {
    let joint = joint_from_tree(load_tree(path)?)?;
    let tree = columnarize(registry, &joint)?;
    save_yaml(path, &tree)?;
    Ok(vec![path.to_path_buf()])
}

/// Stamp the root `type` field, writing only when it changed.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn add_type_file(path: &Path) -> Result<Vec<PathBuf>> {
    let mut tree = load_tree(path)?;
    if !stamp_root_type(&mut tree)? {
        return Ok(Vec::new());
    }
    save_yaml(path, &tree)?;
    Ok(vec![path.to_path_buf()])
}

/// Reject a scaffolding target that would overwrite the ground-truth files.
pub fn ensure_new_language(registry: &LanguageRegistry, language: Language) -> Result<()> {
    if language == registry.ground_truth() {
        return Err(CliError::GroundTruthLanguage(language));
    }
    Ok(())
}

/// Create an empty translation for `language` beside a ground-truth file.
#[tracing::instrument(skip_all, fields(path = %path.display(), %language))]
pub fn add_language_file(
    registry: &LanguageRegistry,
    path: &Path,
    language: Language,
) -> Result<Vec<PathBuf>> {
    ensure_new_language(registry, language)?;
    let source = SplitDocument::from_tree_or(load_tree(path)?, RootKind::Prayer)?;
    let output = language_variant(path, language)?;
    if output.as_path() == path {
        return Err(CliError::GroundTruthLanguage(language));
    }
    if output.exists() {
        tracing::warn!(output = %output.display(), "overwriting existing translation");
    }
    save_yaml(&output, &scaffold(&source))?;
    Ok(vec![output])
}

#[cfg(test)]
mod tests {
    use super::*;
    use katameros_core::{CorpusError, Document, JointDocument, Prayer, Section};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    const JOINT: &str = "---
title:
  english: Our Father
  arabic: أبانا
sections:
  - type: verses
    verses:
      - english: Our Father who art in heaven
        arabic: أبانا الذي في السموات
      - english: Hallowed be Thy name
";

    #[test]
    fn test_split_then_merge() {
        let dir = tempdir().unwrap();
        let joint_file = dir.path().join("our-father.yml");
        fs::write(&joint_file, JOINT).unwrap();
        let registry = LanguageRegistry::from_codes("en,ar").unwrap();

        let outputs = split_file(&registry, &joint_file).unwrap();
        assert_eq!(
            outputs,
            vec![dir.path().join("our-father.en.yml"), dir.path().join("our-father.ar.yml")]
        );

        let arabic = load_tree(&dir.path().join("our-father.ar.yml")).unwrap();
        assert_eq!(arabic["sections"][0]["verses"], json!(["أبانا الذي في السموات", ""]));

        let merged =
            merge_file(&registry, &dir.path().join("our-father.en.yml"), OutputFormat::Json)
                .unwrap();
        assert_eq!(merged, vec![dir.path().join("our-father.json")]);

        let original = joint_from_tree(load_tree(&joint_file).unwrap()).unwrap();
        let round_trip: JointDocument =
            serde_json::from_str(&fs::read_to_string(&merged[0]).unwrap()).unwrap();
        assert_eq!(round_trip.compact(), original.compact());
    }

    #[test]
    fn test_merge_tolerates_missing_translation() {
        let dir = tempdir().unwrap();
        let english = dir.path().join("hymn.en.yml");
        fs::write(&english, "---\ntitle: Hymn\nsections:\n  - type: info\n    text: Stand\n")
            .unwrap();

        let registry = LanguageRegistry::from_codes("en,ar").unwrap();
        let outputs = merge_file(&registry, &english, OutputFormat::Yaml).unwrap();

        let joint = joint_from_tree(load_tree(&outputs[0]).unwrap()).unwrap();
        assert_eq!(
            joint.to_tree().unwrap()["sections"][0]["text"],
            json!({"english": "Stand", "arabic": ""})
        );
    }

    #[test]
    fn test_merge_rejects_translation_of_another_root_type() {
        let dir = tempdir().unwrap();
        let english = dir.path().join("day.en.yml");
        fs::write(&english, "---\ntype: prayer\nsections:\n  - type: info\n    text: Stand\n")
            .unwrap();
        fs::write(
            dir.path().join("day.ar.yml"),
            "---\ntype: synaxarium\ntitle: توت\ncommemorations:\n  - title: النيروز\n    text: عيد\n",
        )
        .unwrap();

        let registry = LanguageRegistry::from_codes("en,ar").unwrap();
        let err = merge_file(&registry, &english, OutputFormat::Json).unwrap_err();

        assert!(matches!(
            err,
            CliError::Corpus(CorpusError::StructuralMismatch {
                language: Language::Arabic,
                index: None,
                ..
            })
        ));
        assert!(!dir.path().join("day.json").exists());
    }

    #[test]
    fn test_merge_accepts_title_only_ground_truth() {
        let dir = tempdir().unwrap();
        let english = dir.path().join("amen.en.yml");
        fs::write(&english, "---\ntitle: Amen\n").unwrap();
        fs::write(dir.path().join("amen.ar.yml"), "---\ntitle: آمين\n").unwrap();

        let registry = LanguageRegistry::from_codes("en,ar").unwrap();
        let outputs = merge_file(&registry, &english, OutputFormat::Json).unwrap();

        let tree = load_tree(&outputs[0]).unwrap();
        assert_eq!(tree["type"], json!("prayer"));
        assert_eq!(tree["title"], json!({"english": "Amen", "arabic": "آمين"}));
    }

    #[test]
    fn test_add_type_only_writes_when_changed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("thout-1.yml");
        fs::write(&path, "---\ntitle: Thout 1\ncommemorations: []\n").unwrap();

        assert_eq!(add_type_file(&path).unwrap(), vec![path.clone()]);
        assert_eq!(load_tree(&path).unwrap()["type"], json!("synaxarium"));
        assert!(add_type_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_add_language_scaffolds_template() {
        let dir = tempdir().unwrap();
        let english = dir.path().join("creed.en.yml");
        fs::write(
            &english,
            "---\ntitle: Creed\nsections:\n  - verses:\n      - We believe\n  - type: compound-prayer\n    path: common/amen\n",
        )
        .unwrap();

        let outputs = add_language_file(&LanguageRegistry::default(), &english, Language::CopticArabic).unwrap();
        assert_eq!(outputs, vec![dir.path().join("creed.co-ar.yml")]);

        let template = SplitDocument::from_tree(load_tree(&outputs[0]).unwrap()).unwrap();
        let Document::Prayer(Prayer {
            title,
            sections: Some(sections),
            ..
        }) = template
        else {
            panic!("expected prayer");
        };
        assert_eq!(title.as_deref(), Some(""));
        assert_eq!(sections[0].verse_count(), 1);
        assert!(matches!(&sections[1], Section::CompoundPrayer(c) if c.path == "common/amen"));
    }

    #[test]
    fn test_add_language_refuses_ground_truth() {
        let dir = tempdir().unwrap();
        let english = dir.path().join("creed.en.yml");
        let source = "---\ntitle: Creed\nsections:\n  - verses:\n      - We believe\n";
        fs::write(&english, source).unwrap();

        let err =
            add_language_file(&LanguageRegistry::default(), &english, Language::English).unwrap_err();

        assert!(matches!(err, CliError::GroundTruthLanguage(Language::English)));
        assert_eq!(fs::read_to_string(&english).unwrap(), source);
    }

    #[test]
    fn test_preprocess_to_output_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("legacy.yml");
        fs::write(
            &input,
            "---\nsections:\n  - verses:\n      english: [a, b]\n      arabic: [x, y]\n",
        )
        .unwrap();
        let target = dir.path().join("out").join("legacy.yml");

        let outputs = preprocess_file(&input, Some(&target)).unwrap();
        assert_eq!(outputs, vec![target.clone(), dir.path().join("out").join("legacy.json")]);

        let tree = load_tree(&outputs[1]).unwrap();
        assert_eq!(tree["type"], json!("prayer"));
        assert_eq!(
            tree["sections"][0]["verses"],
            json!([{"english": "a", "arabic": "x"}, {"english": "b", "arabic": "y"}])
        );
        // Input is left untouched
        assert!(fs::read_to_string(&input).unwrap().contains("english: [a, b]"));
    }
}
