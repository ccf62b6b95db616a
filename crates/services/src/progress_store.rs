use std::sync::Arc;

use fitness_core::Catalog;
use fitness_core::achievement::{AchievementStatus, RoadmapEntry};
use fitness_core::aggregate::{self, DaySummary, WeekSummary};
use fitness_core::model::{
    DayTemplate, MonthInstance, ProfileName, ProgressError, ProgressRecord, TaskId, WeekId,
};
use storage::keys;
use tracing::{debug, warn};

use crate::persistence::WriteBehind;

/// Completion state of the active profile.
///
/// The in-memory record is the source of truth; every toggle queues a write of
/// the whole record. Percentages and totals are recomputed on each read.
pub struct ProgressStore {
    profile: ProfileName,
    key: String,
    record: ProgressRecord,
    catalog: Arc<Catalog>,
    writer: WriteBehind,
}

impl ProgressStore {
    /// Rebuild a profile's store from its persisted blob.
    ///
    /// A missing blob starts empty. A malformed blob is logged and replaced by
    /// an empty record.
    #[must_use]
    pub fn from_persisted(
        profile: ProfileName,
        raw: Option<&str>,
        catalog: Arc<Catalog>,
        writer: WriteBehind,
    ) -> Self {
        let record = raw.map_or_else(ProgressRecord::new, |raw| load_record(&profile, raw));
        Self {
            key: keys::progress(&profile),
            profile,
            record,
            catalog,
            writer,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileName {
        &self.profile
    }

    #[must_use]
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn is_complete(&self, week: &WeekId, task: &TaskId) -> bool {
        self.record.is_complete(week, task)
    }

    /// Flip one task for one week and queue the write. Returns the new value.
    ///
    /// Ids outside the catalog are accepted; they never count toward
    /// percentages.
    pub fn toggle(&mut self, week: &WeekId, task: &TaskId) -> bool {
        let done = self.record.toggle(week, task);
        debug!(profile = %self.profile, week = %week, task = %task, done, "toggled task");
        self.persist();
        done
    }

    /// Encode the current record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if encoding fails.
    pub fn serialize(&self) -> Result<String, ProgressError> {
        self.record.to_json()
    }

    #[must_use]
    pub fn week_percentage(&self, week: &WeekId) -> u8 {
        aggregate::week_percentage(self.catalog.weekly_template(), week, &self.record)
    }

    #[must_use]
    pub fn day_summary(&self, day: &DayTemplate, week: &WeekId) -> DaySummary {
        aggregate::day_summary(day, self.record.week(week))
    }

    #[must_use]
    pub fn month_overview<'a>(&self, month: &'a MonthInstance) -> Vec<WeekSummary<'a>> {
        aggregate::month_overview(self.catalog.weekly_template(), month, &self.record)
    }

    #[must_use]
    pub fn lifetime_total(&self) -> u32 {
        aggregate::lifetime_total(&self.record)
    }

    #[must_use]
    pub fn achievement(&self) -> AchievementStatus<'_> {
        self.catalog.tiers().evaluate(self.lifetime_total())
    }

    #[must_use]
    pub fn roadmap(&self) -> Vec<RoadmapEntry<'_>> {
        self.catalog.tiers().roadmap(self.lifetime_total())
    }

    fn persist(&self) {
        match self.record.to_json() {
            Ok(raw) => self.writer.set(self.key.clone(), raw),
            Err(err) => warn!(profile = %self.profile, error = %err, "failed to encode progress"),
        }
    }
}

/// Decode a progress blob, recovering to an empty record on malformed input.
pub(crate) fn load_record(profile: &ProfileName, raw: &str) -> ProgressRecord {
    ProgressRecord::from_json(raw).unwrap_or_else(|err| {
        warn!(profile = %profile, error = %err, "discarding malformed progress");
        ProgressRecord::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{InMemoryStore, KeyValueStore};

    fn open(store: &InMemoryStore, raw: Option<&str>) -> ProgressStore {
        ProgressStore::from_persisted(
            ProfileName::new("ana").unwrap(),
            raw,
            Arc::new(Catalog::standard()),
            WriteBehind::spawn(Arc::new(store.clone())),
        )
    }

    #[tokio::test]
    async fn fresh_store_is_novice() {
        let progress = open(&InMemoryStore::new(), None);
        let status = progress.achievement();
        assert_eq!(progress.lifetime_total(), 0);
        assert_eq!(status.current.title, "Novice Starter");
        assert_eq!(status.next.map(|t| t.threshold), Some(15));
        assert!(status.progress_to_next_percent.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn toggle_persists_whole_record() {
        let store = InMemoryStore::new();
        let mut progress = open(&store, None);
        let week = WeekId::new("2025-12-w1");

        assert!(progress.toggle(&week, &TaskId::new("m-l-1")));
        assert!(progress.is_complete(&week, &TaskId::new("m-l-1")));
        progress.writer.flush().await;

        let raw = store.get("fitness_progress_ana").await.unwrap().unwrap();
        assert_eq!(ProgressRecord::from_json(&raw).unwrap(), *progress.record());
        assert_eq!(progress.serialize().unwrap(), raw);
    }

    #[tokio::test]
    async fn fifteen_completions_reach_momentum_builder() {
        let mut progress = open(&InMemoryStore::new(), None);
        let tasks: Vec<TaskId> = progress
            .catalog()
            .weekly_template()
            .countable_tasks()
            .take(8)
            .map(|t| t.id().clone())
            .collect();
        for week in ["2025-12-w1", "2026-02-w3"] {
            for task in &tasks {
                if progress.lifetime_total() < 15 {
                    progress.toggle(&WeekId::new(week), task);
                }
            }
        }

        let status = progress.achievement();
        assert_eq!(progress.lifetime_total(), 15);
        assert_eq!(status.current.title, "Momentum Builder");
        assert!(status.progress_to_next_percent.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn malformed_blob_recovers_to_empty() {
        let progress = open(&InMemoryStore::new(), Some("{\"2025-12-w1\": 7"));
        assert!(progress.record().is_empty());
        assert_eq!(progress.lifetime_total(), 0);
        assert_eq!(progress.week_percentage(&WeekId::new("2025-12-w1")), 0);
    }

    #[tokio::test]
    async fn summaries_follow_the_record() {
        let mut progress = open(&InMemoryStore::new(), None);
        let catalog = Arc::new(Catalog::standard());
        let month = &catalog.calendar().months()[0];
        let week = month.weeks()[1].id().clone();
        let tuesday = catalog.weekly_template().days()[1].clone();

        progress.toggle(&week, &TaskId::new("t-w-1"));

        assert_eq!(progress.day_summary(&tuesday, &week).percent, 100);
        assert_eq!(progress.week_percentage(&week), 3);
        let overview = progress.month_overview(month);
        assert_eq!(overview[1].percent, 3);
        assert!(progress.roadmap()[0].unlocked);
        assert!(!progress.roadmap()[1].unlocked);
    }
}
