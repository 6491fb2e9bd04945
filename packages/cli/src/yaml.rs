//! Reading and writing document files.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use katameros_core::Tree;
use regex::Regex;
use serde::Serialize;

use crate::config::JSON_EXTENSION;
use crate::error::Result;

/// Line opening a block scalar (`key: |-`, `- >`), whose content must not be
/// re-indented.
#[allow(clippy::expect_used)]
static BLOCK_SCALAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|: |- )[|>][-+]?[0-9]?$").expect("valid regex"));

/// Parse a YAML or JSON file into a tree.
///
/// An empty YAML file parses to `null`.
pub fn load_tree(path: &Path) -> Result<Tree> {
    let content = fs::read_to_string(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == JSON_EXTENSION);
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else if content.trim().is_empty() {
        Ok(Tree::Null)
    } else {
        Ok(serde_yaml_ng::from_str(&content)?)
    }
}

/// Indent YAML sequences under their parent key.
///
/// serde_yaml_ng places sequence items (`- `) at the same indent as their
/// parent key. This adds 2 spaces per open sequence, e.g.:
///
/// ```yaml
/// # Before:          # After:
/// sections:          sections:
/// - type: info         - type: info
///   text: foo            text: foo
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    // Stack of indent levels where sequences start
    let mut seq_indents: Vec<usize> = Vec::new();
    // Owner indent and extra indentation of an open block scalar
    let mut block: Option<(usize, usize)> = None;

    for line in yaml.lines() {
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();

        // Block scalar content is shifted as a whole
        if let Some((block_indent, extra)) = block {
            if indent > block_indent {
                result.push(format!("{}{line}", " ".repeat(extra)));
                continue;
            }
            block = None;
        }

        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !trimmed.starts_with("- ")) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if trimmed.starts_with("- ") {
            let is_continuation = seq_indents.last().is_some_and(|&si| si == indent);
            if !is_continuation {
                seq_indents.push(indent);
            }
        }

        let extra = seq_indents.len() * 2;
        if BLOCK_SCALAR_RE.is_match(trimmed) {
            // Content is indented past the owning key, which follows `- ` on item lines
            let owner = if trimmed.starts_with("- ") && trimmed.contains(": ") {
                indent + 2
            } else {
                indent
            };
            block = Some((owner, extra));
        }

        if extra > 0 {
            result.push(format!("{}{}", " ".repeat(indent + extra), trimmed));
        } else {
            result.push(line.to_string());
        }
    }

    result.join("\n")
}

/// Serialize a value as YAML with a document start marker.
pub fn generate_yaml<T: Serialize>(value: &T) -> Result<String> {
    let yaml_string = serde_yaml_ng::to_string(value)?;
    let yaml_string = indent_yaml_sequences(&yaml_string);

    // Add document start marker and clean up trailing whitespace
    let lines: Vec<&str> = yaml_string.lines().map(|l| l.trim_end()).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Serialize a value as pretty-printed JSON.
pub fn generate_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

/// Write a value as YAML, atomically.
pub fn save_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, &generate_yaml(value)?)
}

/// Write a value as JSON, atomically.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, &generate_json(value)?)
}

/// Write to a temp file beside `path`, sync, then rename over `path`.
///
/// Partial writes never corrupt an existing file.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}
