//! Project a joint document onto each registered language.

use crate::language::{Language, LanguageMap, LanguageRegistry};
use crate::model::{JointDocument, SplitDocument};

/// Project a joint document onto every registered language.
///
/// Each projection has the joint document's exact shape. A language absent
/// from a leaf projects to an empty string; references are copied as is.
#[must_use]
pub fn split(registry: &LanguageRegistry, joint: &JointDocument) -> LanguageMap<SplitDocument> {
    tracing::debug!(kind = %joint.kind(), languages = registry.languages().len(), "splitting document");
    registry.for_each_language(|language| project(joint, language))
}

/// Project a joint document onto one language.
#[must_use]
pub fn project(joint: &JointDocument, language: Language) -> SplitDocument {
    joint.map_leaves(|text| text.text(language).to_string())
}
