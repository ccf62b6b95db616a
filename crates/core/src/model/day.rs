use crate::model::ids::TaskId;
use crate::model::task::{ActionTask, Task};

/// Marker used in the template for days without a protein target.
const NO_TARGET: &str = "-";

/// One weekday of the recurring plan.
///
/// Tasks are grouped into lunch, dinner and workout buckets; any bucket may be
/// empty. The protein goal is display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTemplate {
    id: String,
    day_name: String,
    title: String,
    lunch: Vec<Task>,
    dinner: Vec<Task>,
    workout: Vec<Task>,
    protein_goal: String,
}

impl DayTemplate {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        day_name: impl Into<String>,
        title: impl Into<String>,
        protein_goal: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            day_name: day_name.into(),
            title: title.into(),
            lunch: Vec::new(),
            dinner: Vec::new(),
            workout: Vec::new(),
            protein_goal: protein_goal.into(),
        }
    }

    #[must_use]
    pub fn with_lunch(mut self, tasks: Vec<Task>) -> Self {
        self.lunch = tasks;
        self
    }

    #[must_use]
    pub fn with_dinner(mut self, tasks: Vec<Task>) -> Self {
        self.dinner = tasks;
        self
    }

    #[must_use]
    pub fn with_workout(mut self, tasks: Vec<Task>) -> Self {
        self.workout = tasks;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn day_name(&self) -> &str {
        &self.day_name
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn lunch(&self) -> &[Task] {
        &self.lunch
    }

    #[must_use]
    pub fn dinner(&self) -> &[Task] {
        &self.dinner
    }

    #[must_use]
    pub fn workout(&self) -> &[Task] {
        &self.workout
    }

    /// Protein target, or `None` on rest days.
    #[must_use]
    pub fn protein_goal(&self) -> Option<&str> {
        let goal = self.protein_goal.trim();
        (!goal.is_empty() && goal != NO_TARGET).then_some(goal)
    }

    /// Whether the day has any meal entries to show.
    #[must_use]
    pub fn has_diet(&self) -> bool {
        !self.lunch.is_empty() || !self.dinner.is_empty()
    }

    /// All entries in display order: lunch, dinner, workout.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.lunch
            .iter()
            .chain(self.dinner.iter())
            .chain(self.workout.iter())
    }

    /// Tasks that count toward completion (headers excluded).
    pub fn countable_tasks(&self) -> impl Iterator<Item = &ActionTask> {
        self.tasks().filter_map(Task::as_action)
    }
}

/// The seven-day plan that repeats for every week of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyTemplate {
    days: Vec<DayTemplate>,
}

impl WeeklyTemplate {
    #[must_use]
    pub fn new(days: Vec<DayTemplate>) -> Self {
        Self { days }
    }

    #[must_use]
    pub fn days(&self) -> &[DayTemplate] {
        &self.days
    }

    pub fn countable_tasks(&self) -> impl Iterator<Item = &ActionTask> {
        self.days.iter().flat_map(DayTemplate::countable_tasks)
    }

    /// Number of countable tasks in one week.
    #[must_use]
    pub fn countable_count(&self) -> usize {
        self.countable_tasks().count()
    }

    /// Find a countable task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&ActionTask> {
        self.countable_tasks().find(|task| task.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_day() -> DayTemplate {
        DayTemplate::new("tue", "Tue", "Rest", "-")
            .with_workout(vec![Task::header("t-w-header", "Take it easy")])
    }

    #[test]
    fn headers_are_excluded_from_countable_tasks() {
        let day = DayTemplate::new("mon", "Mon", "Upper", "90g")
            .with_lunch(vec![Task::diet("m-l-1", "Chicken")])
            .with_workout(vec![
                Task::header("m-w-header", "Bands"),
                Task::exercise("m-w-1", "Row", "Resistance Band Row"),
            ]);

        let ids: Vec<_> = day.countable_tasks().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["m-l-1", "m-w-1"]);
        assert_eq!(day.tasks().count(), 3);
        assert!(day.has_diet());
    }

    #[test]
    fn rest_day_has_no_protein_goal_or_countable_tasks() {
        let day = rest_day();
        assert_eq!(day.protein_goal(), None);
        assert_eq!(day.countable_tasks().count(), 0);
        assert!(!day.has_diet());
    }

    #[test]
    fn template_finds_tasks_by_id() {
        let template = WeeklyTemplate::new(vec![
            rest_day(),
            DayTemplate::new("wed", "Wed", "Lower", "90g")
                .with_dinner(vec![Task::diet("w-d-1", "Fish")]),
        ]);
        assert_eq!(template.countable_count(), 1);
        assert!(template.task(&TaskId::new("w-d-1")).is_some());
        assert!(template.task(&TaskId::new("t-w-header")).is_none());
    }
}
