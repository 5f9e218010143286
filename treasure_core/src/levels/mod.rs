//! Levels - generated quiz units built around a single root.
//!
//! Levels are ephemeral: they are produced on request by the
//! [`LevelGenerator`] and only live as long as the caller (or a
//! [`LevelStore`]) keeps them.

mod generator;
mod store;

pub use generator::*;
pub use store::*;

use hanzi_atlas::RootId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::EngineError;

/// Unique identifier for generated levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub Uuid);

impl LevelId {
    /// Create a new random level ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LevelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub Uuid);

impl QuestionId {
    /// Create a new random question ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of level the generator can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    /// Compare the Japanese on-readings of two words sharing a root.
    Pronunciation,
    /// Spot Sino-Korean words in a list.
    Listening,
    /// Relate a standard phrase to its dialect reading.
    Dialect,
}

impl LevelType {
    pub const ALL: [LevelType; 3] = [
        LevelType::Pronunciation,
        LevelType::Listening,
        LevelType::Dialect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelType::Pronunciation => "pronunciation",
            LevelType::Listening => "listening",
            LevelType::Dialect => "dialect",
        }
    }

    /// Seconds the player is given.
    pub fn time_limit_secs(&self) -> u32 {
        match self {
            LevelType::Pronunciation => 180,
            LevelType::Listening => 240,
            LevelType::Dialect => 120,
        }
    }

    /// Score awarded for clearing the level.
    pub fn reward_score(&self) -> u32 {
        match self {
            LevelType::Pronunciation => 100,
            LevelType::Listening => 150,
            LevelType::Dialect => 80,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LevelType::Pronunciation => "音读破译室 🔊",
            LevelType::Listening => "韩语听力侦探 🎧",
            LevelType::Dialect => "方言连接彩蛋 🗺️",
        }
    }
}

impl FromStr for LevelType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pronunciation" => Ok(LevelType::Pronunciation),
            "listening" => Ok(LevelType::Listening),
            "dialect" => Ok(LevelType::Dialect),
            other => Err(EngineError::UnsupportedLevelType(other.to_string())),
        }
    }
}

impl std::fmt::Display for LevelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TextInput,
    AudioMatch,
}

/// A single question inside a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub content: String,
    /// Choices in display order. Empty for free-text questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub explanation: String,
}

impl Question {
    /// Whether `answer` matches the correct answer, ignoring surrounding whitespace.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim() == self.correct_answer.trim()
    }
}

/// What clearing a level grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub roots: Vec<RootId>,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
}

/// A generated quiz unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub level_type: LevelType,
    pub title: String,
    pub description: String,
    pub root_id: RootId,
    pub difficulty: u8,
    /// Descriptive only; nothing in the engine enforces it.
    pub time_limit_secs: u32,
    pub questions: Vec<Question>,
    pub reward: Reward,
}

impl Level {
    /// Get a question by ID.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }
}
