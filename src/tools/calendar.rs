//! Calendar Tool

use super::parse_date;
use crate::diary::{CalendarMonth, DiaryStore, GoalTracker};

/// Render one month of the activity calendar
pub fn calendar_month(
    store: &DiaryStore,
    goals: &GoalTracker,
    year: i32,
    month: u32,
    selected_date: Option<&str>,
) -> Result<CalendarMonth, String> {
    let selected = selected_date.map(parse_date).transpose()?;
    CalendarMonth::build(year, month, selected, store.entries(), goals.goals().calorie_goal)
        .ok_or_else(|| format!("Invalid month: {}-{:02}", year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::diary::DayClass;
    use crate::models::{FoodItem, MealType};
    use crate::nutrition::scale_portion;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_month_reflects_goal_changes() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = DiaryStore::load(storage.clone()).unwrap();
        let mut goals = GoalTracker::load(storage).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
        let salmon = FoodItem::new("Łosoś", 20.0, 13.0, 0.0, 208);
        store
            .add_meal(date, MealType::Dinner, scale_portion(&salmon, 1000.0).unwrap())
            .unwrap();

        let month = calendar_month(&store, &goals, 2024, 9, None).unwrap();
        assert_eq!(month.days.len(), 30);
        assert_eq!(month.days[14].classification, DayClass::OverGoal);

        goals.set_calorie_goal(2500).unwrap();
        let month = calendar_month(&store, &goals, 2024, 9, Some("2024-09-01")).unwrap();
        assert_eq!(month.days[14].classification, DayClass::UnderGoal);
        assert_eq!(month.days[0].classification, DayClass::Selected);

        assert!(calendar_month(&store, &goals, 2024, 0, None).is_err());
    }
}
