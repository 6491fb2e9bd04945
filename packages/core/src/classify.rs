//! Root-type inference for trees without an explicit `type` field.
//!
//! This is a heuristic over historically inconsistent data, not a schema
//! validator: it only tells the three root variants apart.

use crate::error::{CorpusError, Result};
use crate::model::{ReadingType, RootKind};
use crate::Tree;

/// Infer the root variant of an untyped tree.
///
/// Rules, first match wins:
/// 1. an array-valued `sections` field is a prayer;
/// 2. an array-valued `commemorations` field is a synaxarium;
/// 3. any key naming a [`ReadingType`] is a reading.
///
/// # Examples
/// ```
/// use katameros_core::{classify, RootKind};
/// use serde_json::json;
///
/// assert_eq!(classify(&json!({"sections": []})).unwrap(), RootKind::Prayer);
/// assert!(classify(&json!({"title": "?"})).is_err());
/// ```
pub fn classify(tree: &Tree) -> Result<RootKind> {
    let Some(map) = tree.as_object() else {
        return Err(CorpusError::Classification { keys: Vec::new() });
    };

    if map.get("sections").is_some_and(Tree::is_array) {
        return Ok(RootKind::Prayer);
    }

    if map.get("commemorations").is_some_and(Tree::is_array) {
        return Ok(RootKind::Synaxarium);
    }

    if map.keys().any(|key| ReadingType::is_reading_type(key)) {
        return Ok(RootKind::Reading);
    }

    Err(CorpusError::Classification {
        keys: map.keys().cloned().collect(),
    })
}

/// Set the root `type` field to the classified variant.
///
/// Returns whether the tree changed. The classification always comes from the
/// structure, so a stale `type` value is overwritten.
pub fn stamp_root_type(tree: &mut Tree) -> Result<bool> {
    let kind = classify(tree)?;
    let Some(map) = tree.as_object_mut() else {
        return Err(CorpusError::Classification { keys: Vec::new() });
    };

    if map.get("type").and_then(Tree::as_str) == Some(kind.as_str()) {
        return Ok(false);
    }

    tracing::debug!(%kind, "stamping root type");
    map.insert("type".to_string(), Tree::String(kind.as_str().to_string()));
    Ok(true)
}
