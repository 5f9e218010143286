//! Session tracking - what a player has unlocked and how they have answered.

use hanzi_atlas::RootId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionMetrics;
use crate::detector::DetectionResult;
use crate::levels::{AnswerResult, Level, LevelId};

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

/// One play session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Caller-supplied player identity; may be anonymous.
    pub user_id: String,
    /// Unlocked roots in unlock order, without duplicates.
    pub unlocked_roots: Vec<RootId>,
    pub assigned_levels: Vec<LevelId>,
    pub completed_levels: Vec<LevelId>,
    pub score: u32,
    pub answered: u32,
    pub correct: u32,
    pub total_answer_secs: u64,
    pub status: SessionStatus,
}

impl Session {
    /// Start a new session for a player.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            user_id: user_id.into(),
            unlocked_roots: Vec::new(),
            assigned_levels: Vec::new(),
            completed_levels: Vec::new(),
            score: 0,
            answered: 0,
            correct: 0,
            total_answer_secs: 0,
            status: SessionStatus::Active,
        }
    }

    /// Unlock the roots found by a detection. Returns how many were new.
    pub fn unlock(&mut self, detection: &DetectionResult) -> usize {
        self.unlock_roots(detection.root_ids())
    }

    /// Unlock roots by ID. Returns how many were new.
    pub fn unlock_roots(&mut self, roots: impl IntoIterator<Item = RootId>) -> usize {
        let before = self.unlocked_roots.len();
        for root in roots {
            if !self.unlocked_roots.contains(&root) {
                self.unlocked_roots.push(root);
            }
        }
        self.unlocked_roots.len() - before
    }

    /// Record levels handed to the player.
    pub fn assign_levels(&mut self, levels: &[Level]) {
        self.assigned_levels.extend(levels.iter().map(|level| level.id));
    }

    /// Record an answer and the seconds it took.
    ///
    /// A correct answer completes the level only if it was assigned to this
    /// session, so the completion rate never exceeds 100%.
    pub fn record_answer(&mut self, level_id: LevelId, result: &AnswerResult, elapsed_secs: u64) {
        self.answered += 1;
        self.total_answer_secs += elapsed_secs;
        self.score += result.score;

        if result.correct {
            self.correct += 1;
            let assigned = self.assigned_levels.contains(&level_id);
            if assigned && !self.completed_levels.contains(&level_id) {
                self.completed_levels.push(level_id);
            }
        }
    }

    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Metrics derived from recorded answers.
    ///
    /// Falls back to `defaults` before the first answer, and for the
    /// completion rate while no levels have been assigned.
    pub fn metrics(&self, defaults: &SessionMetrics) -> SessionMetrics {
        if self.answered == 0 {
            return *defaults;
        }

        let completion_rate = if self.assigned_levels.is_empty() {
            defaults.completion_rate
        } else {
            self.completed_levels.len() as f64 / self.assigned_levels.len() as f64 * 100.0
        };

        SessionMetrics {
            accuracy: self.correct as f64 / self.answered as f64 * 100.0,
            average_time_secs: (self.total_answer_secs / self.answered as u64) as u32,
            completion_rate,
        }
    }
}
