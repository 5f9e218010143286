//! Level generation.

use hanzi_atlas::{CharacterRoot, Language, ReferenceDataset, RootId, Vocabulary};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::debug;

use super::{Level, LevelId, LevelType, Question, QuestionId, QuestionKind, Reward};
use crate::config::{EngineConfig, LevelConfig};
use crate::error::{EngineError, Result};

/// Japanese words needed for a pronunciation level.
const PRONUNCIATION_WORDS: usize = 2;

/// Korean words shown in a listening level.
const LISTENING_WORDS: usize = 3;

const PRONUNCIATION_ANSWER: &str = "模仿了古汉语的不同方言层次";
const PRONUNCIATION_EXPLANATION: &str =
    "日语中的汉字词继承了中国古代汉语的读音层次，反映了历史上的语言演变";

/// Builds levels from the reference dataset.
///
/// The generator itself holds no random state; every call takes the
/// caller's RNG, so each request can own its generator exclusively.
pub struct LevelGenerator<'a> {
    dataset: &'a ReferenceDataset,
    config: LevelConfig,
}

impl<'a> LevelGenerator<'a> {
    pub fn new(dataset: &'a ReferenceDataset, config: &EngineConfig) -> Self {
        Self {
            dataset,
            config: config.levels.clone(),
        }
    }

    pub fn with_defaults(dataset: &'a ReferenceDataset) -> Self {
        Self::new(dataset, &EngineConfig::default())
    }

    /// Generate a level of the given type for a root.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RootNotFound`] if the root is not in the dataset
    /// - [`EngineError::InsufficientData`] if the root has fewer than 2
    ///   Japanese words (pronunciation), fewer than 3 Korean words
    ///   (listening) or no dialect example (dialect)
    pub fn generate<R: Rng + ?Sized>(
        &self,
        level_type: LevelType,
        root_id: RootId,
        difficulty: u8,
        rng: &mut R,
    ) -> Result<Level> {
        let root = self
            .dataset
            .root(root_id)
            .ok_or(EngineError::RootNotFound(root_id))?;

        match level_type {
            LevelType::Pronunciation => self.pronunciation_level(root, difficulty, rng),
            LevelType::Listening => self.listening_level(root, difficulty, rng),
            LevelType::Dialect => self.dialect_level(root, difficulty, rng),
        }
    }

    /// Like [`generate`](Self::generate), with the level type given by name.
    pub fn generate_named<R: Rng + ?Sized>(
        &self,
        level_type: &str,
        root_id: RootId,
        difficulty: u8,
        rng: &mut R,
    ) -> Result<Level> {
        self.generate(level_type.parse()?, root_id, difficulty, rng)
    }

    /// Build a level sequence for a session.
    ///
    /// Makes `min(session_level_cap, levels_per_root * roots)` attempts,
    /// each with a random root and a random level type. Attempts that fail
    /// are skipped rather than retried, so the sequence may come back
    /// shorter than the number of attempts, or even empty.
    pub fn generate_session_sequence<R: Rng + ?Sized>(
        &self,
        unlocked: &[RootId],
        rng: &mut R,
    ) -> Result<Vec<Level>> {
        if unlocked.is_empty() {
            return Err(EngineError::NoRootsAvailable);
        }

        let attempts =
            (unlocked.len() * self.config.levels_per_root).min(self.config.session_level_cap);
        let mut levels = Vec::with_capacity(attempts);

        for _ in 0..attempts {
            let (Some(&root_id), Some(&level_type)) =
                (unlocked.choose(rng), LevelType::ALL.choose(rng))
            else {
                continue;
            };

            match self.generate(level_type, root_id, self.config.session_difficulty, rng) {
                Ok(level) => levels.push(level),
                Err(err) => debug!(root = %root_id, %level_type, error = %err, "skipping level"),
            }
        }

        debug!(attempts, generated = levels.len(), "session sequence generated");
        Ok(levels)
    }

    fn pronunciation_level<R: Rng + ?Sized>(
        &self,
        root: &CharacterRoot,
        difficulty: u8,
        rng: &mut R,
    ) -> Result<Level> {
        let words = self.dataset.vocabulary_for_root_in(root.id, &Language::Japanese);
        let picked = sample_distinct(&words, PRONUNCIATION_WORDS, rng).ok_or_else(|| {
            let reason = format!(
                "需要至少{}个日语词汇，只有{}个",
                PRONUNCIATION_WORDS,
                words.len()
            );
            insufficient(root, reason)
        })?;
        let (first, second) = (picked[0], picked[1]);

        let mut options = vec![
            PRONUNCIATION_ANSWER.to_string(),
            "完全相同的发音".to_string(),
            "现代汉语的标准发音".to_string(),
            "随机的发音变化".to_string(),
        ];
        options.shuffle(rng);

        let question = Question {
            id: QuestionId::new(),
            kind: QuestionKind::MultipleChoice,
            content: format!(
                "这两个日语词中相同的\"{}\"，读音有何规律？\n• {}（{}）\n• {}（{}）",
                root.character,
                first.word,
                first.display_reading(),
                second.word,
                second.display_reading()
            ),
            options,
            correct_answer: PRONUNCIATION_ANSWER.to_string(),
            hint: Some(format!("中文\"{}\"在不同语境下的发音差异", root.character)),
            explanation: PRONUNCIATION_EXPLANATION.to_string(),
        };

        Ok(build_level(
            LevelType::Pronunciation,
            root,
            difficulty,
            format!("探索\"{}\"在日语中的发音奥秘", root.character),
            question,
        ))
    }

    fn listening_level<R: Rng + ?Sized>(
        &self,
        root: &CharacterRoot,
        difficulty: u8,
        rng: &mut R,
    ) -> Result<Level> {
        let words = self.dataset.vocabulary_for_root_in(root.id, &Language::Korean);
        let picked = sample_distinct(&words, LISTENING_WORDS, rng).ok_or_else(|| {
            let reason = format!("需要至少{}个韩语词汇，只有{}个", LISTENING_WORDS, words.len());
            insufficient(root, reason)
        })?;

        let listing: String = picked
            .iter()
            .enumerate()
            .map(|(i, word)| format!("{}. {} ({})\n", i + 1, word.word, word.pronunciation))
            .collect();

        let question = Question {
            id: QuestionId::new(),
            kind: QuestionKind::TextInput,
            content: format!(
                "请聆听这段韩语内容，圈出你听到的、像中文的词汇：\n\n{}\n你听到了几个像中文的词？",
                listing
            ),
            options: Vec::new(),
            correct_answer: picked.len().to_string(),
            hint: Some("韩语70%正式词汇是汉字词，听起来很熟悉".to_string()),
            explanation: format!(
                "韩语中的汉字词直接借用汉字的音和义，{}相关的词汇都源于中文",
                root.character
            ),
        };

        Ok(build_level(
            LevelType::Listening,
            root,
            difficulty,
            format!("在韩语中寻找\"{}\"的身影", root.character),
            question,
        ))
    }

    fn dialect_level<R: Rng + ?Sized>(
        &self,
        root: &CharacterRoot,
        difficulty: u8,
        rng: &mut R,
    ) -> Result<Level> {
        let example = self
            .dataset
            .first_dialect_for_root(root.id)
            .ok_or_else(|| insufficient(root, "没有方言数据".to_string()))?;

        let answer = format!("与{}发音相似", example.dialect);
        let mut options = vec![
            answer.clone(),
            "完全不同".to_string(),
            "标准汉语发音".to_string(),
            "现代普通话发音".to_string(),
        ];
        options.shuffle(rng);

        let question = Question {
            id: QuestionId::new(),
            kind: QuestionKind::MultipleChoice,
            content: format!(
                "用你的方言说\"{}\"，会怎么说？\n\n标准汉语：{}\n{}方言：{}",
                example.standard, example.standard, example.dialect_type, example.dialect
            ),
            options,
            correct_answer: answer,
            hint: Some("汉字读音是一部活的迁徙史".to_string()),
            explanation: example.description.clone(),
        };

        Ok(build_level(
            LevelType::Dialect,
            root,
            difficulty,
            format!("探索\"{}\"的方言奥秘", root.character),
            question,
        ))
    }
}

/// Pick `amount` distinct entries uniformly at random, or `None` if there are too few.
///
/// Sampling is without replacement, so it terminates after exactly
/// `amount` draws once the size check has passed.
fn sample_distinct<'v, R: Rng + ?Sized>(
    words: &[&'v Vocabulary],
    amount: usize,
    rng: &mut R,
) -> Option<Vec<&'v Vocabulary>> {
    if words.len() < amount {
        return None;
    }
    Some(
        index::sample(rng, words.len(), amount)
            .into_iter()
            .map(|i| words[i])
            .collect(),
    )
}

fn insufficient(root: &CharacterRoot, reason: String) -> EngineError {
    EngineError::InsufficientData {
        character: root.character,
        reason,
    }
}

fn build_level(
    level_type: LevelType,
    root: &CharacterRoot,
    difficulty: u8,
    description: String,
    question: Question,
) -> Level {
    Level {
        id: LevelId::new(),
        level_type,
        title: level_type.title().to_string(),
        description,
        root_id: root.id,
        difficulty,
        time_limit_secs: level_type.time_limit_secs(),
        questions: vec![question],
        reward: Reward {
            roots: vec![root.id],
            score: level_type.reward_score(),
            achievement: None,
        },
    }
}
