//! Data models
//!
//! Rust structs for the food catalog, logged meals, daily entries and goals.
//! Field names serialize in camelCase to match the persisted diary format.

mod daily_entry;
mod food_item;
mod goals;
mod logged_meal;
mod nutrition;

pub use daily_entry::{DailyEntry, DailyMeals, MealType};
pub use food_item::FoodItem;
pub use goals::{Goals, MacroGoals, DEFAULT_CALORIE_GOAL};
pub use logged_meal::LoggedMeal;
pub use nutrition::Nutrition;
