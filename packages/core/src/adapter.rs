//! Bridges between untyped trees and typed documents.
//!
//! Older joint files store verses and reading text columnar (one array per
//! language) and sometimes nest reading paragraphs one level deeper than the
//! current layout. [`upgrade_legacy`] rewrites both in place before decoding,
//! validating every columnar array on the way.

use crate::columnar::{to_columnar, to_row_wise};
use crate::error::Result;
use crate::language::{LanguageMap, LanguageRegistry};
use crate::model::{Document, JointDocument, Prayer, ReadingType, Section};
use crate::Tree;

/// Rewrite legacy joint layouts into the row-wise layout.
///
/// Returns whether anything changed.
///
/// # Errors
/// [`crate::CorpusError::LengthMismatch`] when a columnar array does not
/// align with the others.
pub fn upgrade_legacy(tree: &mut Tree) -> Result<bool> {
    let Some(map) = tree.as_object_mut() else {
        return Ok(false);
    };

    let mut changed = false;

    if let Some(sections) = map.get_mut("sections").and_then(Tree::as_array_mut) {
        for section in sections {
            if let Some(verses) = section.get_mut("verses") {
                changed |= upgrade_columnar(verses)?;
            }
        }
    }

    for (key, subs) in map.iter_mut() {
        if !ReadingType::is_reading_type(key) {
            continue;
        }
        let Some(subs) = subs.as_array_mut() else {
            continue;
        };
        for sub in subs {
            if let Some(text) = sub.get_mut("text") {
                changed |= flatten_nested(text);
                changed |= upgrade_columnar(text)?;
            }
        }
    }

    Ok(changed)
}

/// Decode a joint document, upgrading legacy layouts first.
pub fn joint_from_tree(mut tree: Tree) -> Result<JointDocument> {
    if upgrade_legacy(&mut tree)? {
        tracing::debug!("upgraded legacy columnar layout");
    }
    JointDocument::from_tree(tree)
}

/// Encode a joint document with every verse list in columnar form.
///
/// Columns are emitted for each registered language, with empty strings where
/// a verse lacks that language.
pub fn columnarize(registry: &LanguageRegistry, joint: &JointDocument) -> Result<Tree> {
    let mut tree = joint.to_tree()?;

    let Document::Prayer(Prayer {
        sections: Some(sections),
        ..
    }) = joint
    else {
        return Ok(tree);
    };

    if let Some(items) = tree.get_mut("sections").and_then(Tree::as_array_mut) {
        for (section, item) in sections.iter().zip(items.iter_mut()) {
            let (Section::Verses(verses), Some(item)) = (section, item.as_object_mut()) else {
                continue;
            };
            let columns = to_columnar(registry, &verses.verses);
            item.insert("verses".to_string(), serde_json::to_value(columns)?);
        }
    }

    Ok(tree)
}

/// Replace a columnar mapping with row-wise records.
fn upgrade_columnar(value: &mut Tree) -> Result<bool> {
    if !value.is_object() {
        return Ok(false);
    }

    let columns: LanguageMap<Option<Vec<String>>> = serde_json::from_value(value.take())?;
    let columns: LanguageMap<Vec<String>> = columns
        .into_iter()
        .map(|(language, entries)| (language, entries.unwrap_or_default()))
        .collect();

    *value = serde_json::to_value(to_row_wise(&columns)?)?;
    Ok(true)
}

/// Flatten `[[a, b], [c]]` into `[a, b, c]`.
fn flatten_nested(value: &mut Tree) -> bool {
    let Some(items) = value.as_array_mut() else {
        return false;
    };
    if !items.iter().any(Tree::is_array) {
        return false;
    }

    let flat = items
        .drain(..)
        .flat_map(|item| match item {
            Tree::Array(inner) => inner,
            other => vec![other],
        })
        .collect();
    *items = flat;
    true
}
