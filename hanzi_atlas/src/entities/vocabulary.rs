//! Borrowed vocabulary and dialect examples.

use serde::{Deserialize, Serialize};

use super::{DialectId, Language, RootId, VocabularyId};

/// Japanese reading class of a kanji inside a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingType {
    /// Sino-Japanese reading inherited from Chinese.
    On,
    /// Native Japanese reading.
    Kun,
}

/// A word in a target language that borrows a character root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: VocabularyId,
    pub root_id: RootId,
    pub language: Language,
    /// Surface form, e.g. "電話".
    pub word: String,
    /// Latin transcription, Japanese only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,
    /// Kana for Japanese, romanized syllables for Korean.
    pub pronunciation: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_type: Option<ReadingType>,
    pub difficulty: u8,
    #[serde(default)]
    pub example_count: u32,
}

impl Vocabulary {
    /// The romanized form learners read: romaji when present, otherwise the pronunciation.
    pub fn display_reading(&self) -> &str {
        self.romaji.as_deref().unwrap_or(&self.pronunciation)
    }

    pub fn belongs_to(&self, root_id: RootId) -> bool {
        self.root_id == root_id
    }
}

/// A phrase whose regional reading preserves an older pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectExample {
    pub id: DialectId,
    pub root_id: RootId,
    /// Standard Mandarin phrase, e.g. "吃饭".
    pub standard: String,
    /// The dialect rendering, e.g. "食饭".
    pub dialect: String,
    /// Dialect family tag, e.g. "cantonese".
    pub dialect_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn korean_word() -> Vocabulary {
        Vocabulary {
            id: VocabularyId(5),
            root_id: RootId(1),
            language: Language::Korean,
            word: "전화".to_string(),
            romaji: None,
            pronunciation: "jeon-hwa".to_string(),
            meaning: "telephone".to_string(),
            reading_type: None,
            difficulty: 1,
            example_count: 2,
        }
    }

    #[test]
    fn test_display_reading_prefers_romaji() {
        let mut word = korean_word();
        assert_eq!(word.display_reading(), "jeon-hwa");

        word.romaji = Some("denwa".to_string());
        assert_eq!(word.display_reading(), "denwa");
    }

    #[test]
    fn test_vocabulary_serialization_skips_empty_optionals() {
        let json = serde_json::to_value(korean_word()).unwrap();
        assert!(json.get("romaji").is_none());
        assert!(json.get("reading_type").is_none());
        assert_eq!(json["language"], "ko");
        assert!(korean_word().belongs_to(RootId(1)));
    }

    #[test]
    fn test_reading_type_lowercase() {
        let parsed: ReadingType = serde_json::from_str("\"kun\"").unwrap();
        assert_eq!(parsed, ReadingType::Kun);
    }
}
