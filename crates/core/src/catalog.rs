//! Static schedule content: the weekly plan, the calendar and the achievement tiers.

use crate::achievement::TierTable;
use crate::model::{ActionTask, Calendar, DayTemplate, MonthId, Task, TaskId, WeeklyTemplate};

/// First month covered by the standard calendar.
pub const CALENDAR_START: (i32, u32) = (2025, 12);

/// Number of months in the standard calendar.
pub const CALENDAR_MONTHS: usize = 13;

/// Read-only configuration shared by every profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    template: WeeklyTemplate,
    calendar: Calendar,
    tiers: TierTable,
}

impl Catalog {
    #[must_use]
    pub fn new(template: WeeklyTemplate, calendar: Calendar, tiers: TierTable) -> Self {
        Self {
            template,
            calendar,
            tiers,
        }
    }

    /// The built-in plan: seven-day band training template, thirteen months
    /// from December 2025, standard achievement tiers.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_template(), standard_calendar(), TierTable::standard())
    }

    #[must_use]
    pub fn weekly_template(&self) -> &WeeklyTemplate {
        &self.template
    }

    #[must_use]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    #[must_use]
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Countable task with `id`, if the template has one.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&ActionTask> {
        self.template.task(id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[must_use]
pub fn standard_calendar() -> Calendar {
    let (year, month) = CALENDAR_START;
    MonthId::new(year, month)
        .map(|start| Calendar::generate(start, CALENDAR_MONTHS))
        .unwrap_or_default()
}

#[must_use]
#[allow(clippy::too_many_lines)]
pub fn standard_template() -> WeeklyTemplate {
    WeeklyTemplate::new(vec![
        DayTemplate::new("mon", "週一 (Mon)", "上半身肌力日 (Upper Body Strength)", "90–100g")
            .with_lunch(vec![
                Task::diet("m-l-1", "高蛋白主菜（雞腿/雞胸）"),
                Task::diet("m-l-2", "飯至少半碗"),
                Task::diet("m-l-3", "補 1 顆蛋/豆干（必要時）"),
            ])
            .with_dinner(vec![
                Task::diet("m-d-1", "高蛋白主菜 30–35g"),
                Task::diet("m-d-2", "澱粉至少一份"),
            ])
            .with_workout(vec![
                Task::header("m-w-header", "彈力帶上半身（20–25 分）"),
                Task::exercise("m-w-1", "划船 (Row) 3×12–15", "Resistance Band Row"),
                Task::exercise(
                    "m-w-2",
                    "胸推 (Chest Press) 3×12–15",
                    "Resistance Band Chest Press",
                ),
                Task::exercise(
                    "m-w-3",
                    "肩推 (Shoulder Press) 2–3×10–12",
                    "Resistance Band Shoulder Press",
                ),
                Task::exercise(
                    "m-w-4",
                    "二頭彎舉 (Bicep Curl) 2×12–15",
                    "Resistance Band Bicep Curl",
                ),
                Task::exercise(
                    "m-w-5",
                    "三頭伸展 (Tricep Ext) 2×12–15",
                    "Resistance Band Tricep Extension",
                ),
            ]),
        DayTemplate::new("tue", "週二 (Tue)", "休息／走路 (Rest/Walk)", "-").with_workout(vec![
            Task::exercise("t-w-1", "伸展 5 分鐘（可略）", "Full Body Stretching"),
        ]),
        DayTemplate::new("wed", "週三 (Wed)", "下半身肌力日 (Lower Body Strength)", "90–100g")
            .with_lunch(vec![
                Task::diet("w-l-1", "高蛋白便當（目標 30g）"),
                Task::diet("w-l-2", "飯至少半碗"),
            ])
            .with_dinner(vec![Task::diet("w-d-1", "高蛋白主菜＋澱粉")])
            .with_workout(vec![
                Task::header("w-w-header", "彈力帶下半身（20–25 分）"),
                Task::exercise("w-w-1", "深蹲 (Squat) 3×15", "Resistance Band Squat"),
                Task::exercise("w-w-2", "弓箭步 (Lunge) 3×12/側", "Resistance Band Lunge"),
                Task::exercise(
                    "w-w-3",
                    "側步走 (Side Walk) 3×20 步",
                    "Resistance Band Side Walk",
                ),
                Task::exercise(
                    "w-w-4",
                    "彈力帶硬舉 (Deadlift) 3×12–15",
                    "Resistance Band Deadlift",
                ),
                Task::exercise("w-w-5", "臀橋 (Glute Bridge) 3×15", "Glute Bridge"),
            ]),
        DayTemplate::new("thu", "週四 (Thu)", "全身日 (Full Body)", "90–100g")
            .with_lunch(vec![Task::diet("th-l-1", "高蛋白便當")])
            .with_dinner(vec![Task::diet("th-d-1", "高蛋白主菜＋澱粉")])
            .with_workout(vec![
                Task::header("th-w-header", "彈力帶全身（20–25 分）"),
                Task::exercise(
                    "th-w-1",
                    "下拉 (Lat Pulldown) 3×12–15",
                    "Resistance Band Lat Pulldown",
                ),
                Task::exercise("th-w-2", "胸飛鳥 (Fly) 3×12–15", "Resistance Band Chest Fly"),
                Task::exercise(
                    "th-w-3",
                    "深蹲＋肩推 (Thruster) 3×10–12",
                    "Resistance Band Thruster",
                ),
                Task::exercise("th-w-4", "捲腹 (Crunch) 3×12", "Crunch"),
                Task::exercise("th-w-5", "平板 (Plank) 30–45 秒×2", "Plank"),
            ]),
        DayTemplate::new("fri", "週五 (Fri)", "休息／走路 (Rest/Walk)", "-").with_workout(vec![
            Task::exercise("f-w-1", "伸展 5 分鐘（可略）", "Stretching"),
        ]),
        DayTemplate::new("sat", "週六 (Sat)", "恢復日 (Recovery)", "90g")
            .with_lunch(vec![Task::diet("sa-l-1", "高蛋白便當")])
            .with_dinner(vec![Task::diet("sa-d-1", "高蛋白主菜")])
            .with_workout(vec![
                Task::header("sa-w-header", "恢復訓練（選一 10–15 分）"),
                Task::exercise("sa-w-1", "基礎瑜珈 10 分", "Basic Yoga Flow"),
                Task::exercise("sa-w-2", "彈力帶伸展 10 分", "Resistance Band Stretching"),
                Task::exercise("sa-w-3", "輕度徒手循環", "Light Bodyweight Circuit"),
            ]),
        DayTemplate::new("sun", "週日 (Sun)", "恢復日／自由日 (Free/Recovery)", "90g")
            .with_lunch(vec![Task::diet("su-l-1", "高蛋白便當")])
            .with_dinner(vec![Task::diet("su-d-1", "高蛋白主菜")])
            .with_workout(vec![
                Task::header("su-w-header", "輕鬆日"),
                Task::workout("su-w-1", "走路 / 伸展 / 休息"),
            ]),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn standard_template_has_seven_days() {
        let template = standard_template();
        assert_eq!(template.days().len(), 7);
        assert_eq!(template.days()[0].id(), "mon");
        assert_eq!(template.days()[6].id(), "sun");
    }

    #[test]
    fn standard_template_counts_only_action_tasks() {
        let template = standard_template();
        // mon 10, tue 1, wed 8, thu 7, fri 1, sat 5, sun 3
        assert_eq!(template.countable_count(), 35);
        assert!(template.task(&TaskId::new("m-w-header")).is_none());
    }

    #[test]
    fn task_ids_are_unique() {
        let template = standard_template();
        let mut seen = HashSet::new();
        for day in template.days() {
            for task in day.tasks() {
                assert!(seen.insert(task.id().clone()), "duplicate {:?}", task.id());
            }
        }
    }

    #[test]
    fn catalog_finds_action_tasks_only() {
        let catalog = Catalog::standard();
        let squat = catalog.task(&TaskId::new("w-w-1")).unwrap();
        assert_eq!(squat.lookup_exercise(), Some("Resistance Band Squat"));
        assert!(catalog.task(&TaskId::new("w-w-header")).is_none());
        assert!(catalog.task(&TaskId::new("retired")).is_none());
    }

    #[test]
    fn standard_calendar_spans_thirteen_months() {
        let catalog = Catalog::standard();
        let months = catalog.calendar().months();
        assert_eq!(months.len(), CALENDAR_MONTHS);
        assert_eq!(months[0].title(), "December 2025");
        assert_eq!(months[12].title(), "December 2026");
    }
}
