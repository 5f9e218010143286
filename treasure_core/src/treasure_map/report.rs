//! Text rendering of a treasure map.

use hanzi_atlas::{Language, Vocabulary};

use super::TreasureMap;

const CLOSING_SUGGESTION: &str =
    "基于你已掌握的字根，下一关将解锁更多相关词汇。继续探索汉字的语言网络！";

/// Render the end-of-session report.
///
/// Roots appear in unlock order, each with at most `sample_size` words.
pub fn render_report(map: &TreasureMap, sample_size: usize) -> String {
    let mut report = String::new();

    report.push_str("🎯 15分钟战报\n\n");
    report.push_str(&format!("✅ 已解锁字根：{}个\n", map.stats.unlocked_roots));
    report.push_str(&format!(
        "✅ 已掌握词汇：日语{}个 + 韩语{}个\n",
        map.word_breakdown.get(&Language::Japanese),
        map.word_breakdown.get(&Language::Korean)
    ));
    report.push_str(&format!("✅ 解密准确率：{:.1}%\n", map.stats.accuracy));
    report.push_str(&format!("🔥 解锁成就：{}个\n", map.achievements.len()));
    report.push('\n');

    report.push_str("📊 词根网络预览：\n");
    for root in &map.roots {
        report.push_str(&format!("\n【{}】", root.character));
        report.push_str(&format_sample(map.vocabulary_for(root), sample_size));
        report.push('\n');
    }

    if !map.achievements.is_empty() {
        report.push_str("\n🏆 获得成就：\n");
        for achievement in &map.achievements {
            report.push_str(&format!("• {} - {}\n", achievement.name, achievement.description));
        }
    }

    report.push_str("\n🚀 下一站建议：\n");
    report.push_str(CLOSING_SUGGESTION);

    report
}

/// Tree branch listing the first `sample_size` words and how many were left out.
fn format_sample(words: &[Vocabulary], sample_size: usize) -> String {
    let shown: Vec<String> = words
        .iter()
        .take(sample_size)
        .map(|word| format!("{}（{}）", word.word, word.display_reading()))
        .collect();

    if shown.is_empty() {
        return String::new();
    }

    let mut branch = format!("─┬─ {}", shown.join("\n      ├─ "));
    if words.len() > sample_size {
        branch.push_str(&format!("\n      └─ ...等{}个词汇", words.len() - sample_size));
    }
    branch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionMetrics;
    use crate::session::SessionId;
    use crate::treasure_map::TreasureMapAssembler;
    use hanzi_atlas::{ReferenceDataset, RootId};

    fn report_for(unlocked: &[RootId]) -> String {
        let dataset = ReferenceDataset::builtin().unwrap();
        let assembler = TreasureMapAssembler::with_defaults(&dataset);
        let map = assembler
            .assemble(SessionId::new(), "guest", unlocked, &SessionMetrics::default())
            .unwrap();
        assembler.render_report(&map)
    }

    #[test]
    fn test_report_counts() {
        let report = report_for(&[RootId(1), RootId(2)]);

        assert!(report.starts_with("🎯 15分钟战报"));
        assert!(report.contains("✅ 已解锁字根：2个"));
        assert!(report.contains("✅ 已掌握词汇：日语6个 + 韩语5个"));
        assert!(report.contains("✅ 解密准确率：85.0%"));
        assert!(report.contains("🔥 解锁成就：2个"));
        assert!(report.ends_with(CLOSING_SUGGESTION));
    }

    #[test]
    fn test_report_samples_are_capped() {
        let report = report_for(&[RootId(1), RootId(2)]);

        assert!(report.contains("【电】─┬─ "));
        assert!(report.contains("...等4个词汇"));
        assert!(report.contains("...等1个词汇"));
        assert_eq!(report.matches("├─").count(), 4);
    }

    #[test]
    fn test_report_follows_unlock_order() {
        let report = report_for(&[RootId(2), RootId(1)]);

        let phone = report.find("【话】").unwrap();
        let electric = report.find("【电】").unwrap();
        assert!(phone < electric);
    }

    #[test]
    fn test_report_lists_achievements() {
        let report = report_for(&[RootId(3), RootId(4), RootId(5)]);

        assert!(report.contains("🏆 获得成就："));
        assert!(report.contains("• 汉字侦探见习生 - 解锁3个汉字字根"));
        assert!(report.contains("• 语言学者 - 掌握10个日韩词汇"));
    }

    #[test]
    fn test_root_without_words_has_no_branch() {
        let report = report_for(&[RootId(9)]);

        assert!(report.contains("\n【图】\n"));
        assert!(!report.contains("🏆 获得成就：\n• 汉字侦探见习生"));
    }
}
