use chrono::{Datelike, NaiveDate};

use crate::model::ids::{MonthId, WeekId};

/// Every month is split into this many fixed seven-day weeks.
pub const WEEKS_PER_MONTH: usize = 4;

const DAYS_PER_WEEK: u32 = 7;

/// A seven-day slot within a month (days 1–7, 8–14, 15–21 or 22–28).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekInstance {
    id: WeekId,
    month: MonthId,
    ordinal: u8,
    title: String,
    date_range: String,
}

impl WeekInstance {
    fn new(month: MonthId, ordinal: u8) -> Self {
        let first = first_day_of(ordinal);
        let last = first + DAYS_PER_WEEK - 1;
        let m = month.month();
        Self {
            id: WeekId::for_month(month, ordinal),
            month,
            ordinal,
            title: format!("Week {ordinal}"),
            date_range: format!("{m}/{first} – {m}/{last}"),
        }
    }

    #[must_use]
    pub fn id(&self) -> &WeekId {
        &self.id
    }

    #[must_use]
    pub fn month(&self) -> MonthId {
        self.month
    }

    /// 1-based position within the month.
    #[must_use]
    pub fn ordinal(&self) -> u8 {
        self.ordinal
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn date_range(&self) -> &str {
        &self.date_range
    }

    /// Whether `day` (day of month) falls inside this week.
    #[must_use]
    pub fn covers_day(&self, day: u32) -> bool {
        let first = first_day_of(self.ordinal);
        (first..first + DAYS_PER_WEEK).contains(&day)
    }
}

fn first_day_of(ordinal: u8) -> u32 {
    (u32::from(ordinal) - 1) * DAYS_PER_WEEK + 1
}

/// A calendar month and its four weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthInstance {
    id: MonthId,
    title: String,
    weeks: [WeekInstance; WEEKS_PER_MONTH],
}

impl MonthInstance {
    #[must_use]
    pub fn generate(id: MonthId) -> Self {
        let title = id
            .first_day()
            .map_or_else(|| id.to_string(), |d| d.format("%B %Y").to_string());
        Self {
            id,
            title,
            weeks: [
                WeekInstance::new(id, 1),
                WeekInstance::new(id, 2),
                WeekInstance::new(id, 3),
                WeekInstance::new(id, 4),
            ],
        }
    }

    #[must_use]
    pub fn id(&self) -> MonthId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn weeks(&self) -> &[WeekInstance] {
        &self.weeks
    }
}

/// A contiguous run of months.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    months: Vec<MonthInstance>,
}

impl Calendar {
    /// Build `count` consecutive months starting at `start`.
    #[must_use]
    pub fn generate(start: MonthId, count: usize) -> Self {
        let months = std::iter::successors(Some(start), |m| Some(m.next()))
            .take(count)
            .map(MonthInstance::generate)
            .collect();
        Self { months }
    }

    #[must_use]
    pub fn months(&self) -> &[MonthInstance] {
        &self.months
    }

    pub fn weeks(&self) -> impl Iterator<Item = &WeekInstance> {
        self.months.iter().flat_map(MonthInstance::weeks)
    }

    #[must_use]
    pub fn month(&self, id: MonthId) -> Option<&MonthInstance> {
        self.months.iter().find(|m| m.id() == id)
    }

    #[must_use]
    pub fn week(&self, id: &WeekId) -> Option<&WeekInstance> {
        self.weeks().find(|w| w.id() == id)
    }

    /// The month a week belongs to, if the week is in this calendar.
    #[must_use]
    pub fn month_of_week(&self, id: &WeekId) -> Option<&MonthInstance> {
        self.months
            .iter()
            .find(|m| m.weeks().iter().any(|w| w.id() == id))
    }

    /// The week slot covering `date`. Days 29–31 belong to no week.
    #[must_use]
    pub fn week_for_date(&self, date: NaiveDate) -> Option<&WeekInstance> {
        let month = self.month(MonthId::of_date(date))?;
        month.weeks().iter().find(|w| w.covers_day(date.day()))
    }

    /// The month containing `today`, or the first month when out of range.
    #[must_use]
    pub fn default_month(&self, today: NaiveDate) -> Option<&MonthInstance> {
        self.month(MonthId::of_date(today))
            .or_else(|| self.months.first())
    }
}
