//! Closed vocabularies shared by every document.
//!
//! The string forms are part of the on-disk format and must not change.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, IntoEnumIterator};

/// Canonical place of a reading in the liturgical cycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReadingType {
    VespersPsalm,
    VespersGospel,
    MatinsPsalm,
    MatinsGospel,
    MatinsProphecies,
    MatinsSermon,
    PaulineEpistle,
    CatholicEpistle,
    ActsOfTheApostles,
    Synaxarium,
    LiturgyPsalm,
    LiturgyGospel,
    EveningPrayersPsalm,
    EveningPrayersGospel,
}

impl ReadingType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Whether `key` names a reading type.
    #[must_use]
    pub fn is_reading_type(key: &str) -> bool {
        Self::iter().any(|reading_type| reading_type.as_str() == key)
    }
}

/// Who says a block of verses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Speaker {
    People,
    Priest,
    Deacon,
    Reader,
}

impl Speaker {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Saint a block of verses is addressed to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Saint {
    StMark,
    ArchangelGabriel,
    ArchangelMichael,
    ArchangelRaphael,
    ArchangelSuriel,
    StJohnTheBaptist,
    StMary,
    AnyMartyrAll,
    StAbanoub,
    StDemiana,
    StGeorge,
    StMarinaTheMartyr,
    StMina,
    StPhilopaterMercurius,
    StStephen,
    StsSergiosAndBachus,
    PopeKyrillosVi,
    StAbraam,
    StAntonyTheGreat,
    StAthanasiusTheApostolic,
    StBishoy,
    StKarasTheAnchorite,
    StMosesTheBlack,
    #[serde(rename = "st-paul-the-1st-hermit")]
    #[strum(serialize = "st-paul-the-1st-hermit")]
    StPaulThe1stHermit,
    StReweisTeji,
    StShenoudaTheArchimandrite,
    StThomasTheHermit,
    StsMaximosAndDometius,
}

impl Saint {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Season a prayer or section belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Occasion {
    Annual,
    GreatLent,
}

impl Occasion {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
