//! Logged Meal model
//!
//! A food portion that was actually eaten, with nutrients already scaled to
//! the logged weight.

use serde::{Deserialize, Serialize};

use super::Nutrition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    pub name: String,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub calories: u32,
    /// Weight eaten, in grams
    pub weight: f64,
}

impl LoggedMeal {
    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            calories: f64::from(self.calories),
        }
    }
}
