//! Shared nutrition data structure
//!
//! Used for per-100g reference values, meal list sums and daily totals.

use serde::{Deserialize, Serialize};

use crate::nutrition::round_to_tenth;

/// Macronutrients and energy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub protein: f64,  // grams
    pub fat: f64,      // grams
    pub carbs: f64,    // grams
    pub calories: f64, // kcal
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            protein: self.protein * multiplier,
            fat: self.fat * multiplier,
            carbs: self.carbs * multiplier,
            calories: self.calories * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
            calories: self.calories + other.calories,
        }
    }

    /// Display form: macros to one decimal place, calories to a whole number
    pub fn rounded(&self) -> Self {
        Self {
            protein: round_to_tenth(self.protein),
            fat: round_to_tenth(self.fat),
            carbs: round_to_tenth(self.carbs),
            calories: self.calories.round(),
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}
