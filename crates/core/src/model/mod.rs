mod calendar;
mod day;
mod ids;
mod profile;
mod progress;
mod task;

pub use calendar::{Calendar, MonthInstance, WEEKS_PER_MONTH, WeekInstance};
pub use day::{DayTemplate, WeeklyTemplate};
pub use ids::{MonthId, ParseIdError, TaskId, WeekId};
pub use profile::{ProfileError, ProfileName, ProfileRegistry};
pub use progress::{ProgressError, ProgressRecord, WeekProgress};
pub use task::{ActionTask, Task, TaskCategory};
