//! Voice catalog records
//!
//! A [`Voice`] is a read-only snapshot of one installed platform voice,
//! taken at enumeration time. The bridge never mutates these; selecting a
//! voice hands the record back to the synthesizer.

use serde::{Deserialize, Serialize};

/// Quality placeholder reported for every voice
///
/// The platforms this bridge targets expose no usable quality metric on the
/// enumeration path, so the catalog reports a constant.
pub const VOICE_QUALITY: u32 = 300;

/// Voice gender as reported over the bridge
///
/// The external contract only knows the literals "male" and "female";
/// backends fold anything else into `Female`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The literal string used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// One installed platform voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// Platform-assigned voice identifier
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// BCP-47 style language tag, e.g. "en-US"
    pub language: String,
    pub gender: Gender,
    /// Always [`VOICE_QUALITY`] on the platforms this bridge targets
    pub quality: u32,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            gender,
            quality: VOICE_QUALITY,
        }
    }
}
