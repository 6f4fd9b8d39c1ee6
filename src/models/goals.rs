//! Goals model
//!
//! Daily calorie and macronutrient targets.

use serde::{Deserialize, Serialize};

/// Calorie goal used until the user sets one
pub const DEFAULT_CALORIE_GOAL: u32 = 2000;

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroGoals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for MacroGoals {
    fn default() -> Self {
        Self {
            protein: 150.0,
            carbs: 250.0,
            fat: 70.0,
        }
    }
}

/// All user-configured targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    pub calorie_goal: u32,
    pub macro_goals: MacroGoals,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calorie_goal: DEFAULT_CALORIE_GOAL,
            macro_goals: MacroGoals::default(),
        }
    }
}
