//! Entity definitions for the root atlas.

mod root;
mod vocabulary;

pub use root::*;
pub use vocabulary::*;

use serde::{Deserialize, Serialize};

/// Identifier of a character root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootId(pub i64);

impl std::fmt::Display for RootId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyId(pub i64);

impl std::fmt::Display for VocabularyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a dialect example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialectId(pub i64);

impl std::fmt::Display for DialectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Language a borrowed word belongs to.
///
/// Only Japanese and Korean are supported. Any other tag is kept verbatim
/// so the data still loads, but it never shows up in per-language counts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    Japanese,
    Korean,
    Unsupported(String),
}

impl Language {
    /// Parse a language tag such as `"ja"` or `"ko"`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ja" => Language::Japanese,
            "ko" => Language::Korean,
            other => Language::Unsupported(other.to_string()),
        }
    }

    /// The short tag used in data files.
    pub fn tag(&self) -> &str {
        match self {
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Unsupported(tag) => tag,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Language::Unsupported(_))
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Language::from_tag(&tag)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.tag().to_string()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
