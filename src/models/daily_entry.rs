//! Daily Entry model
//!
//! One calendar day's meal log, split into breakfast, lunch and dinner.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{LoggedMeal, Nutrition};

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(format!(
                "Unknown meal type '{}', expected breakfast, lunch or dinner",
                other
            )),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meals organized by type, each list in the order it was logged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMeals {
    pub breakfast: Vec<LoggedMeal>,
    pub lunch: Vec<LoggedMeal>,
    pub dinner: Vec<LoggedMeal>,
}

impl DailyMeals {
    pub fn get(&self, meal_type: MealType) -> &[LoggedMeal] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    fn get_mut(&mut self, meal_type: MealType) -> &mut Vec<LoggedMeal> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    /// Every logged meal, breakfast first
    pub fn iter(&self) -> impl Iterator<Item = &LoggedMeal> {
        self.breakfast.iter().chain(self.lunch.iter()).chain(self.dinner.iter())
    }
}

/// A single day in the diary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub meals: DailyMeals,
    pub total_calories: u32,
}

impl DailyEntry {
    /// A zero-valued entry for a day with nothing logged yet
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            meals: DailyMeals::default(),
            total_calories: 0,
        }
    }

    /// Append a meal and keep the running calorie total in step
    pub fn push_meal(&mut self, meal_type: MealType, meal: LoggedMeal) {
        self.total_calories = self.total_calories.saturating_add(meal.calories);
        self.meals.get_mut(meal_type).push(meal);
    }

    pub fn meal_count(&self) -> usize {
        self.meals.iter().count()
    }

    /// Unrounded nutrition total for a single meal type
    pub fn nutrition_for(&self, meal_type: MealType) -> Nutrition {
        self.meals.get(meal_type).iter().map(LoggedMeal::nutrition).sum()
    }

    /// Unrounded nutrition total for the whole day
    pub fn nutrition_total(&self) -> Nutrition {
        self.meals.iter().map(LoggedMeal::nutrition).sum()
    }
}
