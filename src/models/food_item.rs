//! Food Item model
//!
//! Reference nutrition data for a food, always expressed per 100 grams.

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// A food item with nutrient values per 100g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub protein: f64,  // grams per 100g
    pub fat: f64,      // grams per 100g
    pub carbs: f64,    // grams per 100g
    pub calories: u32, // kcal per 100g
}

impl FoodItem {
    pub fn new(name: impl Into<String>, protein: f64, fat: f64, carbs: f64, calories: u32) -> Self {
        Self {
            name: name.into(),
            protein,
            fat,
            carbs,
            calories,
        }
    }

    /// Nutrition for a 100g reference portion
    pub fn per_100g(&self) -> Nutrition {
        Nutrition {
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            calories: f64::from(self.calories),
        }
    }
}
