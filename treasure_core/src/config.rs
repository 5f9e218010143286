//! Engine configuration.
//!
//! Every section has defaults, so an empty TOML document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub detection: DetectionConfig,
    pub insights: InsightConfig,
    pub levels: LevelConfig,
    pub achievements: AchievementThresholds,
    pub map: MapConfig,
    /// Session metrics used when no answers have been recorded yet.
    pub default_metrics: SessionMetrics,
}

impl EngineConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

/// Limits applied to unlock ceremony input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Maximum number of words per unlock request.
    pub max_words: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { max_words: 5 }
    }
}

/// Parameters for insight text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Upper bound on the number of words suggested for one session.
    pub daily_unlock_cap: usize,
    /// Root count from which the cultural remark is added.
    pub cultural_threshold: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            daily_unlock_cap: 20,
            cultural_threshold: 3,
        }
    }
}

/// Parameters for session level sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Maximum number of levels in a session sequence.
    pub session_level_cap: usize,
    /// Levels attempted per unlocked root before the cap applies.
    pub levels_per_root: usize,
    /// Difficulty used for every level of a session sequence.
    pub session_difficulty: u8,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            session_level_cap: 5,
            levels_per_root: 2,
            session_difficulty: 1,
        }
    }
}

/// Thresholds at which treasure map achievements unlock. Each is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementThresholds {
    pub min_roots: usize,
    pub min_words: usize,
    /// Percentage, 0.0 to 100.0.
    pub min_accuracy: f64,
}

impl Default for AchievementThresholds {
    fn default() -> Self {
        Self {
            min_roots: 3,
            min_words: 10,
            min_accuracy: 80.0,
        }
    }
}

/// Treasure map assembly and report parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Largest difficulty gap that still produces a connection.
    pub connection_max_gap: u8,
    pub recommendation_limit: usize,
    /// Words listed per root in the text report.
    pub report_sample_size: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            connection_max_gap: 1,
            recommendation_limit: 3,
            report_sample_size: 3,
        }
    }
}

/// Performance figures for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionMetrics {
    /// Percentage of correct answers.
    pub accuracy: f64,
    /// Mean seconds per answered question.
    pub average_time_secs: u32,
    /// Percentage of assigned levels completed.
    pub completion_rate: f64,
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self {
            accuracy: 85.0,
            average_time_secs: 45,
            completion_rate: 100.0,
        }
    }
}
