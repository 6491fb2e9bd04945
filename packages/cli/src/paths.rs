//! File naming and discovery.
//!
//! A joint document is stored as `base.yml`; its per-language variants sit
//! beside it as `base.<code>.yml`, e.g. `our-father.en.yml` and
//! `our-father.co-en.yml`.

use std::path::{Path, PathBuf};

use katameros_core::Language;
use walkdir::WalkDir;

use crate::config::YAML_EXTENSIONS;
use crate::error::{CliError, Result};

/// Language of a per-language variant, `None` for a joint file.
pub fn language_of(path: &Path) -> Option<Language> {
    let stem = path.file_stem()?.to_str()?;
    let (_, code) = stem.rsplit_once('.')?;
    Language::from_code(code).ok()
}

/// Whether the path has a YAML extension.
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext))
}

/// A YAML file without a language code segment.
pub fn is_joint_yaml(path: &Path) -> bool {
    is_yaml(path) && language_of(path).is_none()
}

/// Sibling of a joint or per-language file for `language`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use katameros_cli::paths::language_variant;
/// use katameros_core::Language;
///
/// let joint = Path::new("prayers/our-father.yml");
/// assert_eq!(
///     language_variant(joint, Language::CopticEnglish).unwrap(),
///     Path::new("prayers/our-father.co-en.yml")
/// );
/// let english = Path::new("prayers/our-father.en.yml");
/// assert_eq!(
///     language_variant(english, Language::Arabic).unwrap(),
///     Path::new("prayers/our-father.ar.yml")
/// );
/// ```
pub fn language_variant(path: &Path, language: Language) -> Result<PathBuf> {
    let base = base_name(path)?;
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or(crate::config::YAML_EXTENSION);
    Ok(path.with_file_name(format!("{base}.{}.{ext}", language.code())))
}

/// Joint sibling of a file, with the given extension.
pub fn joint_path(path: &Path, ext: &str) -> Result<PathBuf> {
    let base = base_name(path)?;
    Ok(path.with_file_name(format!("{base}.{ext}")))
}

/// File stem without any language code segment.
fn base_name(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| CliError::NotAFile(path.to_path_buf()))?;

    Ok(match language_of(path) {
        Some(language) => stem
            .strip_suffix(language.code())
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(stem)
            .to_string(),
        None => stem.to_string(),
    })
}

/// Collect the files under `input` accepted by `predicate`, in sorted order.
///
/// A single file is returned as is, whether or not it matches.
pub fn collect_files(input: &Path, predicate: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(CliError::InputNotFound(input.to_path_buf()));
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && predicate(path) {
            files.push(path.to_path_buf());
        }
    }

    tracing::debug!(input = %input.display(), count = files.len(), "collected files");
    Ok(files)
}
