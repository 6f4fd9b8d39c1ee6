//! Activity calendar
//!
//! Colors each day by whether its logged calories stayed within the goal.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::goals::meets_calorie_goal;
use crate::models::DailyEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    Selected,
    UnderGoal,
    OverGoal,
    Unclassified,
}

impl DayClass {
    pub fn color_class(&self) -> &'static str {
        match self {
            DayClass::Selected => "selected",
            DayClass::UnderGoal => "bg-green-200",
            DayClass::OverGoal => "bg-red-200",
            DayClass::Unclassified => "",
        }
    }
}

/// Classify one date. A selected date wins over any goal coloring.
pub fn classify_day(
    date: NaiveDate,
    selected: Option<NaiveDate>,
    entries: &[DailyEntry],
    calorie_goal: u32,
) -> DayClass {
    if selected == Some(date) {
        return DayClass::Selected;
    }
    match entries.iter().find(|e| e.date == date) {
        Some(entry) if meets_calorie_goal(entry.total_calories, calorie_goal) => DayClass::UnderGoal,
        Some(_) => DayClass::OverGoal,
        None => DayClass::Unclassified,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub classification: DayClass,
    pub color_class: &'static str,
    pub total_calories: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub calorie_goal: u32,
    pub selected: Option<NaiveDate>,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// Every day of the month with its classification. `None` for an invalid month.
    pub fn build(
        year: i32,
        month: u32,
        selected: Option<NaiveDate>,
        entries: &[DailyEntry],
        calorie_goal: u32,
    ) -> Option<Self> {
        let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let mut days = Vec::with_capacity(31);

        while date.month() == month {
            let classification = classify_day(date, selected, entries, calorie_goal);
            days.push(CalendarDay {
                date,
                classification,
                color_class: classification.color_class(),
                total_calories: entries
                    .iter()
                    .find(|e| e.date == date)
                    .map(|e| e.total_calories),
            });
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        Some(Self {
            year,
            month,
            calorie_goal,
            selected,
            days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn entry(date: NaiveDate, total_calories: u32) -> DailyEntry {
        let mut entry = DailyEntry::empty(date);
        entry.total_calories = total_calories;
        entry
    }

    #[test]
    fn test_goal_classification() {
        let entries = vec![entry(date(6, 1), 2500), entry(date(6, 2), 1500)];

        assert_eq!(classify_day(date(6, 1), None, &entries, 2000), DayClass::OverGoal);
        assert_eq!(classify_day(date(6, 2), None, &entries, 2000), DayClass::UnderGoal);
        assert_eq!(classify_day(date(6, 3), None, &entries, 2000), DayClass::Unclassified);
    }

    #[test]
    fn test_no_entries_means_unclassified() {
        assert_eq!(classify_day(date(6, 1), None, &[], 2000), DayClass::Unclassified);
    }

    #[test]
    fn test_selected_takes_precedence() {
        let entries = vec![entry(date(6, 1), 2500)];
        assert_eq!(
            classify_day(date(6, 1), Some(date(6, 1)), &entries, 2000),
            DayClass::Selected
        );
        assert_eq!(
            classify_day(date(6, 9), Some(date(6, 9)), &entries, 2000),
            DayClass::Selected
        );
    }

    #[test]
    fn test_month_layout() {
        let entries = vec![entry(date(2, 10), 1900), entry(date(2, 11), 2100)];
        let month = CalendarMonth::build(2024, 2, Some(date(2, 29)), &entries, 2000).unwrap();

        assert_eq!(month.days.len(), 29);
        assert_eq!(month.days[9].color_class, "bg-green-200");
        assert_eq!(month.days[9].total_calories, Some(1900));
        assert_eq!(month.days[10].color_class, "bg-red-200");
        assert_eq!(month.days[0].classification, DayClass::Unclassified);
        assert_eq!(month.days[0].total_calories, None);
        assert_eq!(month.days[28].classification, DayClass::Selected);
    }

    #[test]
    fn test_invalid_month() {
        assert!(CalendarMonth::build(2024, 13, None, &[], 2000).is_none());
    }
}
