//! Insight text for the unlock ceremony.

use hanzi_atlas::{CharacterRoot, Language};

use super::LanguageBreakdown;
use crate::config::InsightConfig;

const CULTURAL_REMARK: &str = "汉字字根是一部活的语言迁徙史，日韩语中的汉字词都源于中国古代汉语";

/// Builds the narrative lines shown after detection.
///
/// Output is template based and deterministic. Lines always appear in the
/// same order: overview, per-language counts, difficulty note, cultural
/// remark, task suggestion. Any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    config: InsightConfig,
}

impl InsightGenerator {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn describe(&self, roots: &[CharacterRoot], breakdown: &LanguageBreakdown) -> Vec<String> {
        let mut insights = Vec::new();
        let japanese = breakdown.get(&Language::Japanese);
        let korean = breakdown.get(&Language::Korean);
        let borrowed = japanese + korean;

        if !roots.is_empty() {
            let characters: String = roots.iter().map(|root| root.character).collect();
            insights.push(format!("你输入的词语中藏着{}个汉字字根：{}！", roots.len(), characters));
            insights.push(format!(
                "这{}个字根能帮你解锁至少{}个日韩语词汇",
                roots.len(),
                borrowed
            ));
        }

        if japanese > 0 {
            insights.push(format!("日语词汇：{}个（包括音读和训读）", japanese));
        }
        if korean > 0 {
            insights.push(format!("韩语词汇：{}个（汉字词）", korean));
        }

        let entry_level = roots.iter().filter(|root| root.is_entry_level()).count();
        if entry_level > 0 {
            insights.push(format!("其中{}个是高频字根，特别适合入门学习", entry_level));
        }

        if roots.len() >= self.config.cultural_threshold {
            insights.push(CULTURAL_REMARK.to_string());
        }

        if borrowed > 0 {
            insights.push(format!(
                "今日任务：通过解谜，解锁其中{}个词汇",
                borrowed.min(self.config.daily_unlock_cap)
            ));
        }

        insights
    }
}
