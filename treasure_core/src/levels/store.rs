//! In-process storage of generated levels and answer validation against it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::{Level, LevelId, QuestionId};
use crate::error::{EngineError, Result};

const CORRECT_HINT: &str = "继续探索更多汉字词根的奥秘";

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub correct: bool,
    pub score: u32,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hint: Option<String>,
}

/// Generated levels kept by ID so answers can be checked later.
///
/// Nothing is persisted: the store lives as long as its owner.
#[derive(Debug, Clone, Default)]
pub struct LevelStore {
    levels: HashMap<LevelId, Level>,
}

impl LevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a level, returning its ID.
    pub fn insert(&mut self, level: Level) -> LevelId {
        let id = level.id;
        self.levels.insert(id, level);
        id
    }

    /// Store several levels at once.
    pub fn extend(&mut self, levels: impl IntoIterator<Item = Level>) {
        for level in levels {
            self.insert(level);
        }
    }

    /// Get level by ID.
    pub fn get(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(&id)
    }

    pub fn remove(&mut self, id: LevelId) -> Option<Level> {
        self.levels.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Check an answer against the stored correct answer.
    ///
    /// A correct answer earns the level's reward score, a wrong one earns
    /// nothing and comes back with the question's hint.
    pub fn validate(
        &self,
        level_id: LevelId,
        question_id: QuestionId,
        answer: &str,
    ) -> Result<AnswerResult> {
        let level = self.get(level_id).ok_or(EngineError::LevelNotFound(level_id))?;
        let question = level.question(question_id).ok_or(EngineError::QuestionNotFound {
            level: level_id,
            question: question_id,
        })?;

        let correct = question.accepts(answer);
        debug!(level = %level_id, question = %question_id, correct, "answer validated");

        Ok(AnswerResult {
            correct,
            score: if correct { level.reward.score } else { 0 },
            explanation: question.explanation.clone(),
            next_hint: if correct {
                Some(CORRECT_HINT.to_string())
            } else {
                question.hint.clone()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{LevelGenerator, LevelType};
    use hanzi_atlas::{ReferenceDataset, RootId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stored_listening_level() -> (LevelStore, Level) {
        let dataset = ReferenceDataset::builtin().unwrap();
        let generator = LevelGenerator::with_defaults(&dataset);
        let mut rng = StdRng::seed_from_u64(1);
        let level = generator
            .generate(LevelType::Listening, RootId(3), 1, &mut rng)
            .unwrap();

        let mut store = LevelStore::new();
        store.insert(level.clone());
        (store, level)
    }

    #[test]
    fn test_correct_answer() {
        let (store, level) = stored_listening_level();
        let question = &level.questions[0];

        let result = store.validate(level.id, question.id, "3").unwrap();

        assert!(result.correct);
        assert_eq!(result.score, 150);
        assert_eq!(result.explanation, question.explanation);
        assert_eq!(result.next_hint.as_deref(), Some(CORRECT_HINT));
    }

    #[test]
    fn test_wrong_answer_returns_hint() {
        let (store, level) = stored_listening_level();
        let question = &level.questions[0];

        let result = store.validate(level.id, question.id, "2").unwrap();

        assert!(!result.correct);
        assert_eq!(result.score, 0);
        assert_eq!(result.next_hint, question.hint);
    }

    #[test]
    fn test_unknown_level_and_question() {
        let (store, level) = stored_listening_level();

        let missing_level = store.validate(LevelId::new(), level.questions[0].id, "3");
        assert!(matches!(missing_level, Err(EngineError::LevelNotFound(_))));

        let missing_question = store.validate(level.id, QuestionId::new(), "3");
        assert!(matches!(missing_question, Err(EngineError::QuestionNotFound { .. })));
    }

    #[test]
    fn test_store_bookkeeping() {
        let (mut store, level) = stored_listening_level();
        assert_eq!(store.len(), 1);

        assert!(store.remove(level.id).is_some());
        assert!(store.is_empty());
        assert!(store.get(level.id).is_none());
    }
}
