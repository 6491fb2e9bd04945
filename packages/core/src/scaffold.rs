//! Empty translation templates.

use crate::model::SplitDocument;

/// Copy a document's structure with every text leaf blanked.
///
/// The result is the starting file for a new translation: it has the same
/// shape, references and metadata as `source`, and no text.
#[must_use]
pub fn scaffold(source: &SplitDocument) -> SplitDocument {
    source.map_leaves(|_| String::new())
}
