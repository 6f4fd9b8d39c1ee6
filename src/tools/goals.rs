//! Goal Tools
//!
//! Reading and changing targets, and comparing a day against them.

use chrono::NaiveDate;
use serde::Serialize;

use super::parse_date;
use crate::diary::{DiaryStore, GoalStatus, GoalTracker, MacroProgress};
use crate::models::{Goals, MacroGoals, Nutrition};

/// Response for goal_summary
#[derive(Debug, Serialize)]
pub struct GoalSummaryResponse {
    pub date: NaiveDate,
    pub goals: Goals,
    pub status: GoalStatus,
    pub nutrition_total: Nutrition,
    pub progress: MacroProgress,
}

pub fn get_goals(goals: &GoalTracker) -> Goals {
    *goals.goals()
}

pub fn set_calorie_goal(goals: &mut GoalTracker, calorie_goal: u32) -> Result<Goals, String> {
    if calorie_goal == 0 {
        return Err("Calorie goal must be greater than 0".to_string());
    }
    goals
        .set_calorie_goal(calorie_goal)
        .map_err(|e| format!("Failed to save calorie goal: {}", e))?;
    Ok(*goals.goals())
}

pub fn set_macro_goals(goals: &mut GoalTracker, macro_goals: MacroGoals) -> Result<Goals, String> {
    for (name, value) in [
        ("protein", macro_goals.protein),
        ("carbs", macro_goals.carbs),
        ("fat", macro_goals.fat),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{} goal must be a non-negative number", name));
        }
    }
    goals
        .set_macro_goals(macro_goals)
        .map_err(|e| format!("Failed to save macro goals: {}", e))?;
    Ok(*goals.goals())
}

/// Compare one day against the calorie and macro goals
pub fn goal_summary(store: &DiaryStore, goals: &GoalTracker, date: &str) -> Result<GoalSummaryResponse, String> {
    let date = parse_date(date)?;
    let entry = store.get_entry(date);
    let nutrition_total = entry.nutrition_total().rounded();

    Ok(GoalSummaryResponse {
        date,
        goals: *goals.goals(),
        status: goals.status(&entry),
        progress: goals.macro_progress(&nutrition_total),
        nutrition_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::{FoodItem, MealType};
    use crate::nutrition::scale_portion;
    use crate::storage::MemoryStorage;

    fn setup() -> (DiaryStore, GoalTracker) {
        let storage = Arc::new(MemoryStorage::default());
        (
            DiaryStore::load(storage.clone()).unwrap(),
            GoalTracker::load(storage).unwrap(),
        )
    }

    #[test]
    fn test_goal_validation() {
        let (_, mut goals) = setup();

        assert!(set_calorie_goal(&mut goals, 0).is_err());
        assert_eq!(set_calorie_goal(&mut goals, 1700).unwrap().calorie_goal, 1700);

        let bad = MacroGoals { protein: -1.0, carbs: 100.0, fat: 50.0 };
        assert!(set_macro_goals(&mut goals, bad).is_err());

        let good = MacroGoals { protein: 100.0, carbs: 200.0, fat: 50.0 };
        assert_eq!(set_macro_goals(&mut goals, good).unwrap().macro_goals, good);
        assert_eq!(get_goals(&goals).calorie_goal, 1700);
    }

    #[test]
    fn test_summary_for_logged_day() {
        let (mut store, goals) = setup();
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let chicken = FoodItem::new("Pierś z kurczaka", 31.0, 3.6, 0.0, 165);
        store
            .add_meal(date, MealType::Lunch, scale_portion(&chicken, 300.0).unwrap())
            .unwrap();

        let summary = goal_summary(&store, &goals, "2024-08-01").unwrap();
        assert_eq!(summary.status.total_calories, 495);
        assert!(summary.status.meets_calorie_goal);
        assert_eq!(summary.nutrition_total.protein, 93.0);
        assert!((summary.progress.protein.percent - 62.0).abs() < 1e-9);
        assert_eq!(summary.progress.carbs.display_percent, 0.0);
    }
}
