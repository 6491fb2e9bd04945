//! Document model.
//!
//! Every entity is generic over its text leaf, so a joint document and its
//! per-language projections share one set of types:
//!
//! ```text
//! Document<L>
//! ├── Prayer      { title?, occasion?, sections?: [Section<L>] }
//! │   └── Section<L> = info | verses | reading | compound-prayer
//! ├── Reading     { title, <reading-type>: [SubReading { title, text: [L] }] }
//! └── Synaxarium  { title, commemorations: [{ title, text }] }
//! ```

mod document;
mod section;
mod text;
mod vocabulary;

pub use document::{
    Commemoration, Document, DocumentShape, JointDocument, Prayer, Reading, RootKind,
    SplitDocument, SubReading, Synaxarium,
};
pub use section::{
    CompoundPrayerSection, InfoSection, ReadingSection, Section, SectionKind, VersesSection,
};
pub use text::{Leaf, MultilingualText};
pub use vocabulary::{Occasion, ReadingType, Saint, Speaker};

/// Section holding every language.
pub type JointSection = Section<MultilingualText>;

/// Section holding one language.
pub type SplitSection = Section<String>;
