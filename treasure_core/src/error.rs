//! Engine error kinds.
//!
//! Every variant is a deterministic precondition failure: retrying the same
//! call with the same input fails the same way.

use std::path::PathBuf;

use hanzi_atlas::{DatasetError, RootId};
use thiserror::Error;

use crate::levels::{LevelId, QuestionId};

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("expected between 1 and {max} words, got {count}")]
    InvalidInput { count: usize, max: usize },

    #[error("unsupported level type: {0}")]
    UnsupportedLevelType(String),

    #[error("root {0} does not exist")]
    RootNotFound(RootId),

    #[error("root {character} does not have enough data: {reason}")]
    InsufficientData { character: char, reason: String },

    #[error("no roots available to build a level sequence")]
    NoRootsAvailable,

    #[error("no roots unlocked in this session")]
    NoRootsUnlocked,

    #[error("level {0} not found")]
    LevelNotFound(LevelId),

    #[error("question {question} not found in level {level}")]
    QuestionNotFound { level: LevelId, question: QuestionId },

    #[error("invalid engine configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read configuration from {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
