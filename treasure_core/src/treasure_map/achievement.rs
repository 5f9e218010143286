//! Achievements unlocked by session statistics.

use serde::{Deserialize, Serialize};

use super::SessionStats;
use crate::config::AchievementThresholds;

/// A badge earned during a session.
///
/// Achievements are rebuilt on every assembly and never deduplicated
/// across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Human readable unlock condition.
    pub condition: String,
    /// Human readable reward.
    pub reward: String,
}

impl Achievement {
    fn new(
        id: &str,
        name: &str,
        description: String,
        icon: &str,
        condition: String,
        reward: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description,
            icon: icon.to_string(),
            condition,
            reward: reward.to_string(),
        }
    }
}

/// Evaluate every threshold independently against `stats`.
///
/// Any subset may fire. Order is fixed: roots, words, accuracy.
pub fn evaluate_achievements(
    stats: &SessionStats,
    thresholds: &AchievementThresholds,
) -> Vec<Achievement> {
    let mut achievements = Vec::new();

    if stats.unlocked_roots >= thresholds.min_roots {
        achievements.push(Achievement::new(
            "explorer_1",
            "汉字侦探见习生",
            format!("解锁{}个汉字字根", thresholds.min_roots),
            "🕵️",
            format!("解锁至少{}个字根", thresholds.min_roots),
            "解锁进阶关卡",
        ));
    }

    if stats.total_words >= thresholds.min_words {
        achievements.push(Achievement::new(
            "scholar_1",
            "语言学者",
            format!("掌握{}个日韩词汇", thresholds.min_words),
            "🎓",
            format!("学习至少{}个词汇", thresholds.min_words),
            "获得词根亲和力加成",
        ));
    }

    if stats.accuracy >= thresholds.min_accuracy {
        achievements.push(Achievement::new(
            "master_1",
            "解谜大师",
            format!("准确率达到{}%", thresholds.min_accuracy),
            "🏆",
            format!("单次会话准确率≥{}%", thresholds.min_accuracy),
            "解锁专家级关卡",
        ));
    }

    achievements
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats(unlocked_roots: usize, total_words: usize, accuracy: f64) -> SessionStats {
        SessionStats {
            total_roots: 13,
            unlocked_roots,
            total_words,
            learned_words: total_words,
            accuracy,
            average_time_secs: 45,
            completion_rate: 100.0,
        }
    }

    fn ids(achievements: &[Achievement]) -> Vec<&str> {
        achievements.iter().map(|achievement| achievement.id.as_str()).collect()
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let thresholds = AchievementThresholds::default();

        let all = evaluate_achievements(&stats(3, 10, 80.0), &thresholds);
        assert_eq!(ids(&all), vec!["explorer_1", "scholar_1", "master_1"]);

        let none = evaluate_achievements(&stats(2, 9, 79.9), &thresholds);
        assert!(none.is_empty());
    }

    #[test]
    fn test_thresholds_fire_independently() {
        let thresholds = AchievementThresholds::default();

        let words_only = evaluate_achievements(&stats(1, 12, 10.0), &thresholds);
        assert_eq!(ids(&words_only), vec!["scholar_1"]);

        let accuracy_only = evaluate_achievements(&stats(0, 0, 95.0), &thresholds);
        assert_eq!(ids(&accuracy_only), vec!["master_1"]);
    }

    #[test]
    fn test_text_follows_configured_thresholds() {
        let thresholds = AchievementThresholds {
            min_roots: 5,
            min_words: 20,
            min_accuracy: 90.0,
        };

        let achievements = evaluate_achievements(&stats(5, 20, 90.0), &thresholds);

        assert_eq!(achievements[0].description, "解锁5个汉字字根");
        assert_eq!(achievements[1].condition, "学习至少20个词汇");
        assert_eq!(achievements[2].description, "准确率达到90%");
        assert_eq!(achievements[2].icon, "🏆");
    }

    proptest! {
        #[test]
        fn prop_achievements_are_monotonic(
            roots in 0usize..20,
            words in 0usize..60,
            accuracy in 0.0f64..100.0,
            extra_roots in 0usize..5,
            extra_words in 0usize..10,
            extra_accuracy in 0.0f64..20.0,
        ) {
            let thresholds = AchievementThresholds::default();
            let before = evaluate_achievements(&stats(roots, words, accuracy), &thresholds);
            let after = evaluate_achievements(
                &stats(roots + extra_roots, words + extra_words, accuracy + extra_accuracy),
                &thresholds,
            );

            for achievement in &before {
                prop_assert!(after.contains(achievement));
            }
        }
    }
}
