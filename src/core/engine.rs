use crate::core::assembler::WeeklyAssembler;
use crate::core::sample::SYNTHESIZED_SLOTS;
use crate::domain::model::{DailyFeed, MenuRecord, MenuSlot, WeeklyFeed};
use crate::domain::ports::{MenuSource, SampleMenuProvider};
use crate::utils::monitor::SystemMonitor;
use chrono::NaiveDate;
use std::fmt;

/// Per-request ingestion states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionState {
    Fetching,
    Parsed,
    FetchFailed,
    Merging,
    Filtering,
    Done,
}

impl fmt::Display for IngestionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IngestionState::Fetching => "Fetching",
            IngestionState::Parsed => "Parsed",
            IngestionState::FetchFailed => "FetchFailed",
            IngestionState::Merging => "Merging",
            IngestionState::Filtering => "Filtering",
            IngestionState::Done => "Done",
        };
        f.write_str(name)
    }
}

/// Runs one ingestion per call: fetch the live source, fall back to sample
/// data for whatever it could not provide, then merge and filter to the week.
pub struct MenuEngine<S: MenuSource, P: SampleMenuProvider> {
    source: S,
    provider: P,
    synthesized_slots: Vec<MenuSlot>,
    monitor: SystemMonitor,
}

impl<S: MenuSource, P: SampleMenuProvider> MenuEngine<S, P> {
    pub fn new(source: S, provider: P) -> Self {
        Self {
            source,
            provider,
            synthesized_slots: SYNTHESIZED_SLOTS.to_vec(),
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn with_synthesized_slots(mut self, slots: Vec<MenuSlot>) -> Self {
        self.synthesized_slots = slots;
        self
    }

    fn enter(&self, state: IngestionState) {
        tracing::debug!("➡️ {}", state);
        self.monitor.log_stats(&state.to_string());
    }

    pub async fn weekly(&self, reference: NaiveDate) -> WeeklyFeed {
        tracing::info!("🚀 Building weekly menu feed for {}", reference);

        let assembler = WeeklyAssembler::new(reference);

        self.enter(IngestionState::Fetching);
        // 只有本週的紀錄才算來源有提供
        let live = assembler.filter(self.fetch_live(reference).await);

        let mut slots = self.synthesized_slots.clone();
        for slot in self.source.slots() {
            if !live.iter().any(|record| record.slot() == slot) {
                tracing::warn!(
                    "⚠️ Source '{}' has no {} {} this week, using sample data",
                    self.source.name(),
                    slot.restaurant,
                    slot.meal_type
                );
                slots.push(slot);
            }
        }

        self.enter(IngestionState::Merging);
        let samples = self.provider.sample_week(reference, &slots);
        let live_count = live.len();
        let merged = match assembler.merge(live, samples) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("❌ {} (Category: {:?})", e, e.category());
                self.enter(IngestionState::Done);
                return WeeklyFeed::failed(e.to_string());
            }
        };

        self.enter(IngestionState::Filtering);
        let records = assembler.filter(merged);

        self.enter(IngestionState::Done);
        self.monitor.log_final_stats();
        tracing::info!(
            "✅ Weekly feed ready: {} records ({} live) for {}..={}",
            records.len(),
            live_count,
            assembler.window().monday,
            assembler.window().friday
        );

        WeeklyFeed::ok(records)
    }

    pub async fn daily(&self, date: NaiveDate) -> DailyFeed {
        DailyFeed::from_weekly(self.weekly(date).await, date)
    }

    async fn fetch_live(&self, reference: NaiveDate) -> Vec<MenuRecord> {
        match self.source.fetch_week(reference).await {
            Ok(records) => {
                self.enter(IngestionState::Parsed);
                tracing::info!(
                    "📋 Source '{}' yielded {} records",
                    self.source.name(),
                    records.len()
                );
                records
            }
            Err(e) => {
                self.enter(IngestionState::FetchFailed);
                // 不向使用者揭露，只留在日誌供監控
                tracing::warn!(
                    "⚠️ Source '{}' failed ({:?}): {}",
                    self.source.name(),
                    e.category(),
                    e
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::RotatingSampleProvider;
    use crate::domain::model::{MealType, MenuItem, Restaurant};
    use crate::utils::error::{MenuError, Result};
    use async_trait::async_trait;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct FixedSource {
        result: fn() -> Result<Vec<MenuRecord>>,
    }

    #[async_trait]
    impl MenuSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn slots(&self) -> Vec<MenuSlot> {
            vec![MenuSlot::new(Restaurant::SeoulStudent, MealType::Lunch)]
        }

        async fn fetch_week(&self, _reference: NaiveDate) -> Result<Vec<MenuRecord>> {
            (self.result)()
        }
    }

    struct BrokenProvider;

    impl SampleMenuProvider for BrokenProvider {
        fn sample_week(&self, _reference: NaiveDate, slots: &[MenuSlot]) -> Vec<MenuRecord> {
            slots
                .iter()
                .map(|slot| MenuRecord::new(date("1999-01-01"), slot.restaurant, slot.meal_type, vec![]))
                .collect()
        }
    }

    fn live_week() -> Result<Vec<MenuRecord>> {
        Ok(vec![
            MenuRecord::new(
                date("2025-03-03"),
                Restaurant::SeoulStudent,
                MealType::Lunch,
                vec![MenuItem::new("잡곡밥").unwrap(), MenuItem::new("된장찌개").unwrap()],
            ),
            MenuRecord::new(
                date("2025-03-10"),
                Restaurant::SeoulStudent,
                MealType::Lunch,
                vec![MenuItem::new("쌀밥").unwrap()],
            ),
        ])
    }

    fn next_week_only() -> Result<Vec<MenuRecord>> {
        Ok(vec![MenuRecord::new(
            date("2025-03-10"),
            Restaurant::SeoulStudent,
            MealType::Lunch,
            vec![MenuItem::new("쌀밥").unwrap()],
        )])
    }

    fn staff_only() -> Result<Vec<MenuRecord>> {
        Ok(vec![MenuRecord::new(
            date("2025-03-04"),
            Restaurant::SeoulFaculty,
            MealType::Lunch,
            vec![MenuItem::new("돈까스").unwrap()],
        )])
    }

    fn unavailable() -> Result<Vec<MenuRecord>> {
        Err(MenuError::SourceUnavailable {
            message: "connection refused".to_string(),
        })
    }

    fn lunches(feed: &WeeklyFeed) -> Vec<&MenuRecord> {
        feed.data
            .iter()
            .filter(|r| r.restaurant() == Restaurant::SeoulStudent && r.meal_type() == MealType::Lunch)
            .collect()
    }

    #[tokio::test]
    async fn test_live_records_replace_sample_lunch() {
        let engine = MenuEngine::new(FixedSource { result: live_week }, RotatingSampleProvider::default());
        let feed = engine.weekly(date("2025-03-05")).await;

        assert!(feed.success);
        // 下週的紀錄被過濾掉
        let lunch = lunches(&feed);
        assert_eq!(lunch.len(), 1);
        assert_eq!(lunch[0].items()[1].name(), "된장찌개");
        assert_eq!(feed.data.len(), 1 + 5 * SYNTHESIZED_SLOTS.len());
    }

    #[tokio::test]
    async fn test_source_failure_degrades_to_sample_data() {
        let engine = MenuEngine::new(FixedSource { result: unavailable }, RotatingSampleProvider::default());
        let feed = engine.weekly(date("2025-03-05")).await;

        assert!(feed.success);
        assert!(feed.error.is_none());
        assert_eq!(lunches(&feed).len(), 5);
        assert_eq!(feed.data.len(), 5 * (SYNTHESIZED_SLOTS.len() + 1));
    }

    #[tokio::test]
    async fn test_empty_source_degrades_to_sample_data() {
        let engine = MenuEngine::new(FixedSource { result: || Ok(vec![]) }, RotatingSampleProvider::default())
            .with_synthesized_slots(vec![]);
        let feed = engine.weekly(date("2025-03-05")).await;

        assert!(feed.success);
        assert_eq!(feed.data.len(), 5);
    }

    #[tokio::test]
    async fn test_out_of_week_records_do_not_cover_lunch() {
        let engine = MenuEngine::new(FixedSource { result: next_week_only }, RotatingSampleProvider::default());
        let feed = engine.weekly(date("2025-03-05")).await;

        assert!(feed.success);
        assert_eq!(lunches(&feed).len(), 5);
        assert_eq!(feed.data.len(), 5 * (SYNTHESIZED_SLOTS.len() + 1));
        assert!(feed.data.iter().all(|r| r.date() < date("2025-03-08")));
    }

    #[tokio::test]
    async fn test_staff_row_alone_keeps_student_lunch_sample() {
        let engine = MenuEngine::new(FixedSource { result: staff_only }, RotatingSampleProvider::default());
        let feed = engine.weekly(date("2025-03-05")).await;

        assert!(feed.success);
        assert_eq!(lunches(&feed).len(), 5);
        assert_eq!(
            feed.data
                .iter()
                .filter(|r| r.restaurant() == Restaurant::SeoulFaculty)
                .count(),
            1
        );
        assert_eq!(feed.data.len(), 1 + 5 * (SYNTHESIZED_SLOTS.len() + 1));
    }

    #[tokio::test]
    async fn test_broken_provider_is_assembly_failure() {
        let engine = MenuEngine::new(FixedSource { result: live_week }, BrokenProvider);
        let feed = engine.weekly(date("2025-03-05")).await;

        assert!(!feed.success);
        assert!(feed.data.is_empty());
        assert!(feed.error.is_some());
    }

    #[test]
    fn test_daily_feed_for_weekend_is_empty() {
        let engine = MenuEngine::new(FixedSource { result: unavailable }, RotatingSampleProvider::default());
        let feed = tokio_test::block_on(engine.daily(date("2025-03-08")));

        assert!(feed.success);
        assert_eq!(feed.date, date("2025-03-08"));
        assert!(feed.menus.is_empty());
    }

    #[test]
    fn test_daily_feed_for_weekday() {
        let engine = MenuEngine::new(FixedSource { result: live_week }, RotatingSampleProvider::default());
        let feed = tokio_test::block_on(engine.daily(date("2025-03-03")));

        assert!(feed.success);
        assert_eq!(feed.menus.len(), 1 + SYNTHESIZED_SLOTS.len());
        assert!(feed.menus.iter().all(|m| m.date() == date("2025-03-03")));
    }
}
