//! Summary statistics over the catalog and the learner's progress.
use super::catalog::Catalog;
use super::mastery::{MasteryLevel, mastery_level};
use super::scheduler::due_items;
use super::study_log::StudyLog;
use super::Progress;
use crate::config::SrsConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Studied vs. total items of one catalog category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub studied: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    pub total_items: usize,
    /// Catalog items that have been reviewed at least once.
    pub tracked: usize,
    pub by_mastery: BTreeMap<MasteryLevel, usize>,
    /// In catalog category order.
    pub by_category: Vec<CategoryStats>,
    pub due_now: usize,
    /// Mean of per-item accuracy percentages, over reviewed items.
    pub average_accuracy: f64,
    pub streak: u32,
    pub total_sessions: u32,
}

impl Stats {
    pub fn compute(
        catalog: &Catalog,
        progress: &Progress,
        log: &StudyLog,
        config: &SrsConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let mut by_mastery: BTreeMap<MasteryLevel, usize> =
            MasteryLevel::ALL.iter().map(|&level| (level, 0)).collect();
        let mut accuracy_sum = 0.0;
        let mut accuracy_count = 0usize;

        for item in &catalog.items {
            let state = progress.get(&item.id);
            *by_mastery.entry(mastery_level(state, config)).or_default() += 1;

            if let Some(accuracy) = state.and_then(|s| s.accuracy()) {
                accuracy_sum += accuracy;
                accuracy_count += 1;
            }
        }

        let by_category = catalog
            .categories()
            .into_iter()
            .map(|category| {
                let (studied, total) = catalog.by_category(category).fold(
                    (0, 0),
                    |(studied, total), item| {
                        let seen = progress.contains_key(&item.id) as usize;
                        (studied + seen, total + 1)
                    },
                );
                CategoryStats {
                    category: category.to_string(),
                    studied,
                    total,
                }
            })
            .collect();

        Self {
            total_items: catalog.len(),
            tracked: catalog.items.iter().filter(|i| progress.contains_key(&i.id)).count(),
            by_mastery,
            by_category,
            due_now: due_items(catalog, progress, now).count(),
            average_accuracy: if accuracy_count > 0 {
                accuracy_sum / accuracy_count as f64
            } else {
                0.0
            },
            streak: log.current_streak(now.date_naive()),
            total_sessions: log.total_sessions,
        }
    }

    pub fn count(&self, level: MasteryLevel) -> usize {
        self.by_mastery.get(&level).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::VocabItem;
    use crate::models::scheduler::grade;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_empty_progress() {
        let catalog = Catalog::sample();
        let now = Utc::now();

        let stats = Stats::compute(
            &catalog,
            &Progress::new(),
            &StudyLog::default(),
            &SrsConfig::default(),
            now,
        );

        assert_eq!(stats.tracked, 0);
        assert_eq!(stats.count(MasteryLevel::New), catalog.len());
        assert_eq!(stats.due_now, catalog.len());
        assert_eq!(stats.average_accuracy, 0.0);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_counts_after_reviews() {
        let catalog = Catalog::new(vec![
            VocabItem::new("a", "a", "x"),
            VocabItem::new("b", "b", "y"),
            VocabItem::new("c", "c", "x"),
        ]);
        let config = SrsConfig::default();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut progress = Progress::new();
        let mut log = StudyLog::default();
        log.record_session(start.date_naive());

        grade(&mut progress, "a", 5, start, &config).unwrap();
        grade(&mut progress, "a", 5, start + Duration::days(1), &config).unwrap();
        grade(&mut progress, "b", 1, start, &config).unwrap();

        let stats = Stats::compute(&catalog, &progress, &log, &config, start + Duration::days(1));

        assert_eq!(stats.tracked, 2);
        assert_eq!(stats.count(MasteryLevel::New), 1);
        assert_eq!(stats.count(MasteryLevel::Learning), 1);
        assert_eq!(stats.count(MasteryLevel::Young), 1);
        assert_eq!(stats.count(MasteryLevel::Mature), 0);
        // "c" is unseen, "b" lapsed and is due again on day 1.
        assert_eq!(stats.due_now, 2);
        assert_eq!(stats.average_accuracy, 50.0);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(
            stats.by_category,
            vec![
                CategoryStats {
                    category: "x".to_string(),
                    studied: 1,
                    total: 2,
                },
                CategoryStats {
                    category: "y".to_string(),
                    studied: 1,
                    total: 1,
                },
            ]
        );
    }
}
