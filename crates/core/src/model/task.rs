use crate::model::ids::TaskId;

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// What kind of habit a task tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskCategory {
    Diet,
    Workout,
    Protein,
    Other,
}

//
// ─── TASKS ─────────────────────────────────────────────────────────────────────
//

/// A checkable item in the weekly template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTask {
    id: TaskId,
    text: String,
    category: TaskCategory,
    exercise_ref: Option<String>,
}

impl ActionTask {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            id: TaskId::new(id),
            text: text.into(),
            category,
            exercise_ref: None,
        }
    }

    /// Attach the exercise name used for instruction lookups.
    #[must_use]
    pub fn with_exercise(mut self, exercise: impl Into<String>) -> Self {
        self.exercise_ref = Some(exercise.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> TaskCategory {
        self.category
    }

    #[must_use]
    pub fn exercise_ref(&self) -> Option<&str> {
        self.exercise_ref.as_deref()
    }

    /// Exercise name to look up, only for workout tasks that carry one.
    #[must_use]
    pub fn lookup_exercise(&self) -> Option<&str> {
        match self.category {
            TaskCategory::Workout => self.exercise_ref(),
            _ => None,
        }
    }
}

/// An entry in a day bucket: either a label or a countable task.
///
/// Headers keep an id so that renderers have a stable key, but they are never
/// counted toward completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Header { id: TaskId, label: String },
    Action(ActionTask),
}

impl Task {
    #[must_use]
    pub fn header(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Header {
            id: TaskId::new(id),
            label: label.into(),
        }
    }

    #[must_use]
    pub fn diet(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Action(ActionTask::new(id, text, TaskCategory::Diet))
    }

    #[must_use]
    pub fn workout(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Action(ActionTask::new(id, text, TaskCategory::Workout))
    }

    #[must_use]
    pub fn exercise(
        id: impl Into<String>,
        text: impl Into<String>,
        exercise: impl Into<String>,
    ) -> Self {
        Self::Action(ActionTask::new(id, text, TaskCategory::Workout).with_exercise(exercise))
    }

    #[must_use]
    pub fn id(&self) -> &TaskId {
        match self {
            Task::Header { id, .. } => id,
            Task::Action(task) => task.id(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Task::Header { label, .. } => label,
            Task::Action(task) => task.text(),
        }
    }

    #[must_use]
    pub fn as_action(&self) -> Option<&ActionTask> {
        match self {
            Task::Header { .. } => None,
            Task::Action(task) => Some(task),
        }
    }
}
