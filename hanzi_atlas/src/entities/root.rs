//! Character root definitions.

use serde::{Deserialize, Serialize};

use super::RootId;

/// A single ideographic character that recurs across borrowed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRoot {
    pub id: RootId,
    pub character: char,
    /// Canonical Mandarin reading, e.g. "diàn".
    pub pinyin: String,
    /// 1 (easiest) to 3.
    pub difficulty: u8,
    /// Priority tier, 1 is taught first.
    pub tier: u8,
    pub description: String,
}

impl CharacterRoot {
    /// Create a root with tier equal to its difficulty and no description.
    pub fn new(id: i64, character: char, pinyin: impl Into<String>, difficulty: u8) -> Self {
        Self {
            id: RootId(id),
            character,
            pinyin: pinyin.into(),
            difficulty,
            tier: difficulty,
            description: String::new(),
        }
    }

    /// Set the priority tier.
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this root is a high-frequency entry-level root.
    pub fn is_entry_level(&self) -> bool {
        self.difficulty == 1
    }

    /// Absolute difficulty gap between two roots.
    pub fn difficulty_gap(&self, other: &CharacterRoot) -> u8 {
        self.difficulty.abs_diff(other.difficulty)
    }
}

impl std::fmt::Display for CharacterRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.character, self.pinyin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_root() {
        let root = CharacterRoot::new(1, '电', "diàn", 1).with_description("电力、电子相关");
        assert_eq!(root.id, RootId(1));
        assert_eq!(root.tier, 1);
        assert!(root.is_entry_level());
        assert_eq!(root.to_string(), "电 (diàn)");
    }

    #[test]
    fn test_difficulty_gap() {
        let easy = CharacterRoot::new(1, '电', "diàn", 1);
        let hard = CharacterRoot::new(9, '图', "tú", 3).with_tier(2);
        assert_eq!(easy.difficulty_gap(&hard), 2);
        assert_eq!(hard.difficulty_gap(&easy), 2);
        assert_eq!(hard.tier, 2);
    }
}
