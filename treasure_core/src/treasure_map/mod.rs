//! Treasure Map - the session-scoped view over everything a player unlocked.
//!
//! Assembly is deterministic and works as follows:
//! 1. **Resolve**: map unlocked root ids to atlas roots, skipping unknown ids
//! 2. **Group**: collect each root's vocabulary under its surface character
//! 3. **Connect**: link every pair of roots whose difficulties are close
//! 4. **Measure**: build session statistics from counts and supplied metrics
//! 5. **Reward**: evaluate achievement thresholds against the statistics

mod achievement;
mod report;

pub use achievement::*;
pub use report::*;

use hanzi_atlas::{CharacterRoot, ReferenceDataset, RootId, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

use crate::config::{AchievementThresholds, EngineConfig, MapConfig, SessionMetrics};
use crate::detector::LanguageBreakdown;
use crate::error::{EngineError, Result};
use crate::session::{Session, SessionId};

/// Roots at or below this difficulty are always worth recommending.
const RECOMMEND_MAX_DIFFICULTY: u8 = 2;

const RECOMMENDATION_REASON: &str = "基于你已掌握的字根，推荐学习相似难度的新字根";
const NEXT_GOALS: [&str; 3] = [
    "解锁更多生活相关的字根",
    "挑战更高难度的词汇",
    "探索不同语言的发音规律",
];

/// How two roots relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Roots of close difficulty, one read as growing out of the other.
    Derivative,
}

/// A derived edge between two unlocked roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from_root_id: RootId,
    pub to_root_id: RootId,
    pub connection_type: ConnectionType,
    pub description: String,
}

impl Connection {
    /// Whether this edge joins `a` and `b`, in either direction.
    pub fn links(&self, a: RootId, b: RootId) -> bool {
        (self.from_root_id == a && self.to_root_id == b)
            || (self.from_root_id == b && self.to_root_id == a)
    }
}

/// Aggregate figures for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Unlocked roots that resolved to an atlas entry.
    pub total_roots: usize,
    /// Distinct root ids supplied, known or not.
    pub unlocked_roots: usize,
    pub total_words: usize,
    pub learned_words: usize,
    pub accuracy: f64,
    pub average_time_secs: u32,
    pub completion_rate: f64,
}

/// Everything a player has unlocked in one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasureMap {
    pub user_id: String,
    pub session_id: SessionId,
    /// Resolved roots in unlock order.
    pub roots: Vec<CharacterRoot>,
    /// Vocabulary keyed by root character.
    pub vocabularies: BTreeMap<String, Vec<Vocabulary>>,
    pub word_breakdown: LanguageBreakdown,
    pub connections: Vec<Connection>,
    pub achievements: Vec<Achievement>,
    pub stats: SessionStats,
}

impl TreasureMap {
    /// Vocabulary grouped under a root, empty if the root has none.
    pub fn vocabulary_for(&self, root: &CharacterRoot) -> &[Vocabulary] {
        self.vocabularies
            .get(&root.character.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Suggested next roots with the reasoning shown to the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub roots: Vec<CharacterRoot>,
    pub reason: String,
    pub next_goals: Vec<String>,
}

/// Builds treasure maps and recommendations from the atlas.
pub struct TreasureMapAssembler<'a> {
    dataset: &'a ReferenceDataset,
    thresholds: AchievementThresholds,
    config: MapConfig,
    default_metrics: SessionMetrics,
}

impl<'a> TreasureMapAssembler<'a> {
    pub fn new(dataset: &'a ReferenceDataset, config: &EngineConfig) -> Self {
        Self {
            dataset,
            thresholds: config.achievements.clone(),
            config: config.map.clone(),
            default_metrics: config.default_metrics,
        }
    }

    /// Create an assembler with default configuration.
    pub fn with_defaults(dataset: &'a ReferenceDataset) -> Self {
        Self::new(dataset, &EngineConfig::default())
    }

    /// Assemble the treasure map for a list of unlocked roots.
    ///
    /// Unknown and repeated ids are skipped. Fails with
    /// [`EngineError::NoRootsUnlocked`] if `unlocked` is empty.
    pub fn assemble(
        &self,
        session_id: SessionId,
        user_id: &str,
        unlocked: &[RootId],
        metrics: &SessionMetrics,
    ) -> Result<TreasureMap> {
        if unlocked.is_empty() {
            return Err(EngineError::NoRootsUnlocked);
        }

        // Step 1: Resolve
        let mut seen = HashSet::new();
        let mut roots = Vec::with_capacity(unlocked.len());
        for &id in unlocked {
            if !seen.insert(id) {
                continue;
            }
            match self.dataset.root(id) {
                Some(root) => roots.push(root.clone()),
                None => debug!(root = %id, "skipping unknown root"),
            }
        }

        // Step 2: Group
        let mut vocabularies = BTreeMap::new();
        let mut word_breakdown = LanguageBreakdown::new();
        let mut total_words = 0;
        for root in &roots {
            let words: Vec<Vocabulary> = self
                .dataset
                .vocabulary_for_root(root.id)
                .into_iter()
                .cloned()
                .collect();
            for word in &words {
                word_breakdown.record(&word.language);
            }
            total_words += words.len();
            vocabularies.insert(root.character.to_string(), words);
        }

        // Step 3: Connect
        let connections = derive_connections(&roots, self.config.connection_max_gap);

        // Step 4: Measure
        let stats = SessionStats {
            total_roots: roots.len(),
            unlocked_roots: seen.len(),
            total_words,
            learned_words: total_words,
            accuracy: metrics.accuracy,
            average_time_secs: metrics.average_time_secs,
            completion_rate: metrics.completion_rate,
        };

        // Step 5: Reward
        let achievements = evaluate_achievements(&stats, &self.thresholds);

        info!(
            session = %session_id,
            roots = roots.len(),
            words = total_words,
            connections = connections.len(),
            achievements = achievements.len(),
            "treasure map assembled"
        );

        Ok(TreasureMap {
            user_id: user_id.to_string(),
            session_id,
            roots,
            vocabularies,
            word_breakdown,
            connections,
            achievements,
            stats,
        })
    }

    /// Assemble the treasure map for a session, using its recorded metrics.
    pub fn assemble_session(&self, session: &Session) -> Result<TreasureMap> {
        let metrics = session.metrics(&self.default_metrics);
        self.assemble(session.id, &session.user_id, &session.unlocked_roots, &metrics)
    }

    /// Suggest roots to unlock next.
    ///
    /// Returns the first roots in atlas order that are not in `current` and
    /// either share a difficulty with a current root or are easy enough on
    /// their own.
    pub fn recommend_next(&self, current: &[RootId]) -> Vec<CharacterRoot> {
        let current: HashSet<RootId> = current.iter().copied().collect();
        let difficulties: HashSet<u8> = current
            .iter()
            .filter_map(|id| self.dataset.root(*id))
            .map(|root| root.difficulty)
            .collect();

        self.dataset
            .roots()
            .iter()
            .filter(|root| !current.contains(&root.id))
            .filter(|root| {
                difficulties.contains(&root.difficulty)
                    || root.difficulty <= RECOMMEND_MAX_DIFFICULTY
            })
            .take(self.config.recommendation_limit)
            .cloned()
            .collect()
    }

    /// Recommended roots together with the reason and next goals.
    pub fn recommend(&self, current: &[RootId]) -> Recommendations {
        Recommendations {
            roots: self.recommend_next(current),
            reason: RECOMMENDATION_REASON.to_string(),
            next_goals: NEXT_GOALS.iter().map(|goal| goal.to_string()).collect(),
        }
    }

    /// Render a map as the end-of-session text report.
    pub fn render_report(&self, map: &TreasureMap) -> String {
        render_report(map, self.config.report_sample_size)
    }
}

/// Link every unordered pair of roots whose difficulty gap is at most `max_gap`.
///
/// Quadratic in the number of roots; meant for session-sized inputs.
pub fn derive_connections(roots: &[CharacterRoot], max_gap: u8) -> Vec<Connection> {
    let mut connections = Vec::new();

    for (i, from) in roots.iter().enumerate() {
        for to in &roots[i + 1..] {
            if from.difficulty_gap(to) <= max_gap {
                connections.push(Connection {
                    from_root_id: from.id,
                    to_root_id: to.id,
                    connection_type: ConnectionType::Derivative,
                    description: format!("{} → {} 的词根演变", from.character, to.character),
                });
            }
        }
    }

    connections
}
