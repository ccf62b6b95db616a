use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{TaskId, WeekId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("malformed progress data: {0}")]
    Malformed(String),

    #[error("failed to encode progress: {0}")]
    Encode(String),
}

/// Completion flags of one profile, keyed by week then task.
///
/// A missing entry means "not completed". Entries are flipped, never removed.
/// Unknown week or task ids are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    weeks: BTreeMap<WeekId, BTreeMap<TaskId, bool>>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self, week: &WeekId, task: &TaskId) -> bool {
        self.week(week).is_complete(task)
    }

    /// Flip the flag for `(week, task)` and return the new value.
    pub fn toggle(&mut self, week: &WeekId, task: &TaskId) -> bool {
        let flag = self
            .weeks
            .entry(week.clone())
            .or_default()
            .entry(task.clone())
            .or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Overwrite the flag for `(week, task)`.
    pub fn set(&mut self, week: &WeekId, task: &TaskId, done: bool) {
        self.weeks
            .entry(week.clone())
            .or_default()
            .insert(task.clone(), done);
    }

    /// Read-only view of a single week.
    #[must_use]
    pub fn week(&self, week: &WeekId) -> WeekProgress<'_> {
        WeekProgress {
            flags: self.weeks.get(week),
        }
    }

    /// Every stored week, including weeks outside the current calendar.
    pub fn weeks(&self) -> impl Iterator<Item = (&WeekId, WeekProgress<'_>)> {
        self.weeks
            .iter()
            .map(|(id, flags)| (id, WeekProgress { flags: Some(flags) }))
    }

    /// Encode as a nested JSON object `{week: {task: bool}}`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Encode` if serialization fails.
    pub fn to_json(&self) -> Result<String, ProgressError> {
        serde_json::to_string(self).map_err(|err| ProgressError::Encode(err.to_string()))
    }

    /// Decode a record produced by [`ProgressRecord::to_json`].
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Malformed` if `raw` is not a `{week: {task: bool}}` object.
    pub fn from_json(raw: &str) -> Result<Self, ProgressError> {
        serde_json::from_str(raw).map_err(|err| ProgressError::Malformed(err.to_string()))
    }
}

/// Completion flags for one week. Empty when the week was never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekProgress<'a> {
    flags: Option<&'a BTreeMap<TaskId, bool>>,
}

impl WeekProgress<'_> {
    #[must_use]
    pub fn is_complete(&self, task: &TaskId) -> bool {
        self.flags
            .and_then(|flags| flags.get(task))
            .copied()
            .unwrap_or(false)
    }

    /// Number of `true` flags, regardless of task membership.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.flags
            .map_or(0, |flags| flags.values().filter(|done| **done).count())
    }
}
