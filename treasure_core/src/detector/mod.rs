//! Root Detector - finds known character roots inside user-supplied words.
//!
//! Detection works in three steps:
//! 1. **Split**: every character that needs more than one UTF-8 byte is a
//!    candidate ideograph; ASCII letters, digits and punctuation are dropped
//! 2. **Match**: each candidate is looked up in the atlas by exact character
//! 3. **Tally**: every word borrowing a detected root is counted per language

mod insight;

pub use insight::*;

use hanzi_atlas::{CharacterRoot, Language, ReferenceDataset, RootId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::info;

use crate::config::{DetectionConfig, EngineConfig};
use crate::error::{EngineError, Result};

/// Word counts per supported language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageBreakdown {
    counts: BTreeMap<Language, usize>,
}

impl LanguageBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one word. Unsupported languages are ignored.
    pub fn record(&mut self, language: &Language) {
        if language.is_supported() {
            *self.counts.entry(language.clone()).or_default() += 1;
        }
    }

    /// Number of words counted for a language.
    pub fn get(&self, language: &Language) -> usize {
        self.counts.get(language).copied().unwrap_or(0)
    }

    /// Sum over all supported languages.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Language, usize)> {
        self.counts.iter().map(|(language, count)| (language, *count))
    }
}

/// Outcome of scanning a list of words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Detected roots, deduplicated, in order of first appearance.
    pub roots: Vec<CharacterRoot>,
    pub breakdown: LanguageBreakdown,
    /// Every word borrowing a detected root, whatever its language.
    pub unlockable_words: usize,
}

impl DetectionResult {
    pub fn root_ids(&self) -> Vec<RootId> {
        self.roots.iter().map(|root| root.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// The full unlock ceremony response: detection plus narrative insights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockReport {
    pub input_words: Vec<String>,
    pub detected_roots: Vec<CharacterRoot>,
    pub root_count: usize,
    pub unlockable_words: usize,
    pub word_breakdown: LanguageBreakdown,
    pub insights: Vec<String>,
}

/// Scans words for roots known to the atlas.
pub struct RootDetector<'a> {
    dataset: &'a ReferenceDataset,
    config: DetectionConfig,
    insights: InsightGenerator,
}

impl<'a> RootDetector<'a> {
    /// Create a detector over the given dataset.
    pub fn new(dataset: &'a ReferenceDataset, config: &EngineConfig) -> Self {
        Self {
            dataset,
            config: config.detection.clone(),
            insights: InsightGenerator::new(config.insights.clone()),
        }
    }

    /// Create a detector with default configuration.
    pub fn with_defaults(dataset: &'a ReferenceDataset) -> Self {
        Self::new(dataset, &EngineConfig::default())
    }

    /// Detect the roots contained in `words`.
    ///
    /// Fails with [`EngineError::InvalidInput`] unless 1 to `max_words`
    /// words are given. Words without any known root are not an error.
    pub fn detect<S: AsRef<str>>(&self, words: &[S]) -> Result<DetectionResult> {
        if words.is_empty() || words.len() > self.config.max_words {
            return Err(EngineError::InvalidInput {
                count: words.len(),
                max: self.config.max_words,
            });
        }

        let mut seen: HashSet<RootId> = HashSet::new();
        let mut roots = Vec::new();

        for character in words.iter().flat_map(|word| ideographs(word.as_ref())) {
            if let Some(root) = self.dataset.root_by_character(character) {
                if seen.insert(root.id) {
                    roots.push(root.clone());
                }
            }
        }

        let mut breakdown = LanguageBreakdown::new();
        let mut unlockable_words = 0;
        for word in self.dataset.vocabulary() {
            if seen.contains(&word.root_id) {
                breakdown.record(&word.language);
                unlockable_words += 1;
            }
        }

        Ok(DetectionResult {
            roots,
            breakdown,
            unlockable_words,
        })
    }

    /// Run the unlock ceremony: detection followed by insight text.
    pub fn unlock<S: AsRef<str>>(&self, words: &[S]) -> Result<UnlockReport> {
        let detection = self.detect(words)?;
        let insights = self.insights.describe(&detection.roots, &detection.breakdown);

        info!(
            words = words.len(),
            roots = detection.roots.len(),
            unlockable = detection.unlockable_words,
            "unlock ceremony complete"
        );

        Ok(UnlockReport {
            input_words: words.iter().map(|word| word.as_ref().to_string()).collect(),
            root_count: detection.roots.len(),
            unlockable_words: detection.unlockable_words,
            detected_roots: detection.roots,
            word_breakdown: detection.breakdown,
            insights,
        })
    }
}

/// Characters of `word` that may be ideographs.
pub fn ideographs(word: &str) -> impl Iterator<Item = char> + '_ {
    word.chars().filter(|character| character.len_utf8() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::builtin().unwrap()
    }

    #[test]
    fn test_ideographs_skip_ascii() {
        let chars: Vec<char> = ideographs("AI电话 call!").collect();
        assert_eq!(chars, vec!['电', '话']);
    }

    #[test]
    fn test_detect_telephone() {
        let dataset = dataset();
        let detector = RootDetector::with_defaults(&dataset);

        let result = detector.detect(&["电话"]).unwrap();

        assert_eq!(result.root_ids(), vec![RootId(1), RootId(2)]);
        assert_eq!(result.unlockable_words, 11);
        assert_eq!(result.breakdown.get(&Language::Japanese), 6);
        assert_eq!(result.breakdown.get(&Language::Korean), 5);
    }

    #[test]
    fn test_detect_deduplicates_roots() {
        let dataset = dataset();
        let detector = RootDetector::with_defaults(&dataset);

        let result = detector.detect(&["电话", "电池", "话"]).unwrap();

        assert_eq!(result.roots.len(), 2);
        assert_eq!(result.unlockable_words, 11);
    }

    #[test]
    fn test_detect_unknown_characters() {
        let dataset = dataset();
        let detector = RootDetector::with_defaults(&dataset);

        let result = detector.detect(&["猫", "hello"]).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.unlockable_words, 0);
        assert_eq!(result.breakdown.total(), 0);
    }

    #[test]
    fn test_detect_rejects_empty_and_oversized_input() {
        let dataset = dataset();
        let detector = RootDetector::with_defaults(&dataset);

        let empty: [&str; 0] = [];
        assert!(matches!(
            detector.detect(&empty),
            Err(EngineError::InvalidInput { count: 0, max: 5 })
        ));
        assert!(matches!(
            detector.detect(&["一", "二", "三", "四", "五", "六"]),
            Err(EngineError::InvalidInput { count: 6, .. })
        ));
    }

    #[test]
    fn test_unlock_report() {
        let dataset = dataset();
        let detector = RootDetector::with_defaults(&dataset);

        let report = detector.unlock(&["电话", "发现", "图书馆"]).unwrap();

        assert_eq!(report.input_words.len(), 3);
        assert_eq!(report.root_count, 7);
        assert_eq!(report.unlockable_words, 11);
        assert!(!report.insights.is_empty());
    }

    #[test]
    fn test_unsupported_language_not_counted() {
        let source = r#"
            [[roots]]
            id = 1
            character = "电"
            pinyin = "diàn"
            difficulty = 1
            tier = 1
            description = ""

            [[vocabulary]]
            id = 1
            root_id = 1
            language = "vi"
            word = "điện"
            pronunciation = "dien"
            meaning = "electricity"
            difficulty = 1
        "#;
        let dataset = ReferenceDataset::from_toml_str(source).unwrap();
        let detector = RootDetector::with_defaults(&dataset);

        let result = detector.detect(&["电"]).unwrap();

        assert_eq!(result.unlockable_words, 1);
        assert_eq!(result.breakdown.total(), 0);
    }

    proptest! {
        #[test]
        fn prop_detect_accepts_one_to_five_words(words in prop::collection::vec(".{0,6}", 1..=5)) {
            let dataset = dataset();
            let detector = RootDetector::with_defaults(&dataset);

            let result = detector.detect(words.as_slice()).unwrap();
            let ids = result.root_ids();
            let unique: HashSet<_> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }

        #[test]
        fn prop_detect_rejects_more_than_five_words(
            words in prop::collection::vec("[a-z电话]{1,4}", 6..12),
        ) {
            let dataset = dataset();
            let detector = RootDetector::with_defaults(&dataset);

            let is_invalid = matches!(
                detector.detect(words.as_slice()),
                Err(EngineError::InvalidInput { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
