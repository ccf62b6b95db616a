//! Completion percentages and lifetime totals, recomputed from a progress record.

use crate::model::{
    DayTemplate, MonthInstance, ProgressRecord, WeekId, WeekInstance, WeekProgress,
    WeeklyTemplate,
};

/// Completion of a single day inside a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

/// Completion of one week of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSummary<'a> {
    pub week: &'a WeekInstance,
    pub percent: u8,
}

impl WeekSummary<'_> {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

/// `round(completed / total * 100)`, with an empty set defined as 0%.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = completed.min(total) as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Share of the template's countable tasks completed in `week`.
#[must_use]
pub fn week_percentage(template: &WeeklyTemplate, week: &WeekId, record: &ProgressRecord) -> u8 {
    let flags = record.week(week);
    let mut total = 0;
    let mut completed = 0;
    for task in template.countable_tasks() {
        total += 1;
        if flags.is_complete(task.id()) {
            completed += 1;
        }
    }
    percentage(completed, total)
}

/// Completion of one day's countable tasks.
#[must_use]
pub fn day_summary(day: &DayTemplate, week: WeekProgress<'_>) -> DaySummary {
    let mut total = 0;
    let mut completed = 0;
    for task in day.countable_tasks() {
        total += 1;
        if week.is_complete(task.id()) {
            completed += 1;
        }
    }
    DaySummary {
        completed,
        total,
        percent: percentage(completed, total),
    }
}

#[must_use]
pub fn day_percentage(day: &DayTemplate, week: WeekProgress<'_>) -> u8 {
    day_summary(day, week).percent
}

/// Count of every `true` flag in the record.
///
/// Not filtered by the catalog: flags on weeks or tasks that no longer exist
/// still count.
#[must_use]
pub fn lifetime_total(record: &ProgressRecord) -> u32 {
    record
        .weeks()
        .map(|(_, week)| u32::try_from(week.completed_count()).unwrap_or(u32::MAX))
        .fold(0_u32, u32::saturating_add)
}

/// Percentages for each week of a month, in order.
#[must_use]
pub fn month_overview<'a>(
    template: &WeeklyTemplate,
    month: &'a MonthInstance,
    record: &ProgressRecord,
) -> Vec<WeekSummary<'a>> {
    month
        .weeks()
        .iter()
        .map(|week| WeekSummary {
            week,
            percent: week_percentage(template, week.id(), record),
        })
        .collect()
}
