//! Katameros Core
//!
//! Transformation core for multilingual liturgical documents.
//! This library provides functionality for:
//! - Merging per-language documents into one joint document
//! - Splitting a joint document back into one document per language
//! - Converting verse lists between row-wise and columnar layouts
//! - Inferring the root type of untyped documents
//!
//! # Example
//!
//! ```
//! use katameros_core::{merge, split, Language, LanguageMap, LanguageRegistry, SplitDocument};
//! use serde_json::json;
//!
//! let registry = LanguageRegistry::from_codes("en,ar").unwrap();
//!
//! let mut docs = LanguageMap::new();
//! docs.insert(
//!     Language::English,
//!     SplitDocument::from_tree(json!({"sections": [{"type": "info", "text": "Stand"}]})).unwrap(),
//! );
//!
//! let joint = merge(&registry, &docs).unwrap();
//! let split = split(&registry, &joint);
//! assert_eq!(split[&Language::Arabic].shape(), joint.shape());
//! ```

pub mod adapter;
pub mod batch;
pub mod classify;
pub mod columnar;
pub mod error;
pub mod language;
pub mod merge;
pub mod model;
pub mod scaffold;
pub mod split;

/// Untyped document tree, as parsed from YAML or JSON.
pub type Tree = serde_json::Value;

// Re-export commonly used items
pub use adapter::{columnarize, joint_from_tree, upgrade_legacy};
pub use batch::{run_batch, BatchReport, Failure};
pub use classify::{classify, stamp_root_type};
pub use columnar::{to_columnar, to_row_wise};
pub use error::{CorpusError, Result};
pub use language::{Language, LanguageMap, LanguageRegistry};
pub use merge::merge;
pub use model::{
    Commemoration, CompoundPrayerSection, Document, DocumentShape, InfoSection, JointDocument,
    JointSection, Leaf, MultilingualText, Occasion, Prayer, Reading, ReadingSection, ReadingType,
    RootKind, Saint, Section, SectionKind, Speaker, SplitDocument, SplitSection, SubReading,
    Synaxarium, VersesSection,
};
pub use scaffold::scaffold;
pub use split::{project, split};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
