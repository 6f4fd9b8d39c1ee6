//! Diary Entry Tools
//!
//! Tools for reading days and logging meals.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::parse_date;
use crate::diary::{DiaryStore, GoalStatus, GoalTracker};
use crate::models::{DailyEntry, FoodItem, LoggedMeal, MealType, Nutrition};
use crate::nutrition::scale_portion;

/// One meal type's list with its rounded sum
#[derive(Debug, Serialize)]
pub struct MealSection {
    pub meals: Vec<LoggedMeal>,
    pub total: Nutrition,
}

/// Day with meals for detailed view
#[derive(Debug, Serialize)]
pub struct EntryDetail {
    pub date: NaiveDate,
    /// false when nothing has been logged on this date yet
    pub persisted: bool,
    pub breakfast: MealSection,
    pub lunch: MealSection,
    pub dinner: MealSection,
    pub total_calories: u32,
    pub nutrition_total: Nutrition,
    pub goal: GoalStatus,
}

/// Response for log_meal
#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub date: NaiveDate,
    pub meal_type: String,
    pub meal: LoggedMeal,
    pub total_calories: u32,
    pub meal_count: usize,
    pub goal: GoalStatus,
}

/// Day summary for listing
#[derive(Debug, Serialize)]
pub struct EntrySummary {
    pub date: NaiveDate,
    pub total_calories: u32,
    pub meal_count: usize,
    pub meets_calorie_goal: bool,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
}

/// Response for list_entries
#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub entries: Vec<EntrySummary>,
    pub total: usize,
}

fn section(entry: &DailyEntry, meal_type: MealType) -> MealSection {
    MealSection {
        meals: entry.meals.get(meal_type).to_vec(),
        total: entry.nutrition_for(meal_type).rounded(),
    }
}

/// Get a day with its meals, or an empty day if nothing was logged
pub fn get_entry(store: &DiaryStore, goals: &GoalTracker, date: &str) -> Result<EntryDetail, String> {
    let date = parse_date(date)?;
    let persisted = store.find_entry(date).is_some();
    let entry = store.get_entry(date);

    Ok(EntryDetail {
        date,
        persisted,
        breakfast: section(&entry, MealType::Breakfast),
        lunch: section(&entry, MealType::Lunch),
        dinner: section(&entry, MealType::Dinner),
        total_calories: entry.total_calories,
        nutrition_total: entry.nutrition_total().rounded(),
        goal: goals.status(&entry),
    })
}

/// Scale a food to the eaten weight and log it
pub fn log_meal(
    store: &mut DiaryStore,
    goals: &GoalTracker,
    date: &str,
    meal_type: &str,
    food: &FoodItem,
    weight: f64,
) -> Result<LogMealResponse, String> {
    let date = parse_date(date)?;
    let meal_type = MealType::from_str(meal_type)?;
    let meal = scale_portion(food, weight).map_err(|e| e.to_string())?;

    let entry = store
        .add_meal(date, meal_type, meal.clone())
        .map_err(|e| format!("Failed to save meal: {}", e))?;

    Ok(LogMealResponse {
        date,
        meal_type: meal_type.as_str().to_string(),
        meal,
        total_calories: entry.total_calories,
        meal_count: entry.meal_count(),
        goal: goals.status(&entry),
    })
}

/// List logged days with optional inclusive date range
pub fn list_entries(
    store: &DiaryStore,
    goals: &GoalTracker,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<ListEntriesResponse, String> {
    let start = start_date.map(parse_date).transpose()?;
    let end = end_date.map(parse_date).transpose()?;

    let entries: Vec<EntrySummary> = store
        .entries_in_range(start, end)
        .into_iter()
        .map(|entry| {
            let nutrition = entry.nutrition_total().rounded();
            EntrySummary {
                date: entry.date,
                total_calories: entry.total_calories,
                meal_count: entry.meal_count(),
                meets_calorie_goal: goals.status(entry).meets_calorie_goal,
                total_protein: nutrition.protein,
                total_carbs: nutrition.carbs,
                total_fat: nutrition.fat,
            }
        })
        .collect();

    Ok(ListEntriesResponse {
        total: entries.len(),
        entries,
    })
}
