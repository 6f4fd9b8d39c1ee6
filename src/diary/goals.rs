//! Goal tracking
//!
//! Holds the calorie and macro targets and compares them against a day's totals.

use std::sync::Arc;

use serde::Serialize;

use crate::models::{DailyEntry, Goals, MacroGoals, Nutrition, DEFAULT_CALORIE_GOAL};
use crate::storage::{
    load_json, save_json, Storage, StorageError, StorageResult, CALORY_GOAL_KEY, MACRO_GOALS_KEY,
};

/// Shown when the day is at or below the calorie goal.
///
/// The wording reads as the opposite of the comparison it sits on; it is kept
/// exactly as the diary has always displayed it.
pub const AT_OR_BELOW_GOAL_LABEL: &str = "Zjedzono za mało kalorii!";
/// Shown when the day is above the calorie goal
pub const ABOVE_GOAL_LABEL: &str = "Osiągnięto cel!";

/// A day meets its calorie goal when it stays at or below it
pub fn meets_calorie_goal(total_calories: u32, calorie_goal: u32) -> bool {
    total_calories <= calorie_goal
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalStatus {
    pub total_calories: u32,
    pub calorie_goal: u32,
    pub meets_calorie_goal: bool,
    pub label: &'static str,
}

/// Progress toward one target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub current: f64,
    pub goal: f64,
    /// Uncapped percentage, may exceed 100
    pub percent: f64,
    /// Percentage for progress bars, never above 100
    pub display_percent: f64,
}

impl Progress {
    pub fn new(current: f64, goal: f64) -> Self {
        // No meaningful ratio against an unset or zero target
        let percent = if goal > 0.0 { current / goal * 100.0 } else { 0.0 };
        Self {
            current,
            goal,
            percent,
            display_percent: percent.min(100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProgress {
    pub calories: Progress,
    pub protein: Progress,
    pub carbs: Progress,
    pub fat: Progress,
}

pub struct GoalTracker {
    storage: Arc<dyn Storage>,
    goals: Goals,
}

impl GoalTracker {
    /// Load goals from storage, falling back to defaults for missing keys
    pub fn load(storage: Arc<dyn Storage>) -> StorageResult<Self> {
        let calorie_goal = match storage.get(CALORY_GOAL_KEY)? {
            Some(raw) => parse_calorie_goal(&raw)?,
            None => DEFAULT_CALORIE_GOAL,
        };
        let macro_goals: MacroGoals =
            load_json(storage.as_ref(), MACRO_GOALS_KEY)?.unwrap_or_default();

        tracing::info!(calorie_goal, "Loaded goals");
        Ok(Self {
            storage,
            goals: Goals { calorie_goal, macro_goals },
        })
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn set_calorie_goal(&mut self, calorie_goal: u32) -> StorageResult<()> {
        self.storage.set(CALORY_GOAL_KEY, &calorie_goal.to_string())?;
        self.goals.calorie_goal = calorie_goal;
        tracing::info!(calorie_goal, "Calorie goal updated");
        Ok(())
    }

    pub fn set_macro_goals(&mut self, macro_goals: MacroGoals) -> StorageResult<()> {
        save_json(self.storage.as_ref(), MACRO_GOALS_KEY, &macro_goals)?;
        self.goals.macro_goals = macro_goals;
        tracing::info!(
            protein = macro_goals.protein,
            carbs = macro_goals.carbs,
            fat = macro_goals.fat,
            "Macro goals updated"
        );
        Ok(())
    }

    pub fn status(&self, entry: &DailyEntry) -> GoalStatus {
        let meets = meets_calorie_goal(entry.total_calories, self.goals.calorie_goal);
        GoalStatus {
            total_calories: entry.total_calories,
            calorie_goal: self.goals.calorie_goal,
            meets_calorie_goal: meets,
            label: if meets { AT_OR_BELOW_GOAL_LABEL } else { ABOVE_GOAL_LABEL },
        }
    }

    pub fn macro_progress(&self, totals: &Nutrition) -> MacroProgress {
        let macros = &self.goals.macro_goals;
        MacroProgress {
            calories: Progress::new(totals.calories, f64::from(self.goals.calorie_goal)),
            protein: Progress::new(totals.protein, macros.protein),
            carbs: Progress::new(totals.carbs, macros.carbs),
            fat: Progress::new(totals.fat, macros.fat),
        }
    }
}

/// The goal is stored as a stringified number; whole-number floats are accepted too
fn parse_calorie_goal(raw: &str) -> StorageResult<u32> {
    let trimmed = raw.trim();
    if let Ok(goal) = trimmed.parse::<u32>() {
        return Ok(goal);
    }
    match trimmed.parse::<f64>() {
        Ok(goal) if goal.is_finite() && goal >= 0.0 && goal <= f64::from(u32::MAX) => {
            Ok(goal.round() as u32)
        }
        _ => Err(StorageError::Corrupt {
            key: CALORY_GOAL_KEY.to_string(),
            reason: format!("'{}' is not a calorie amount", raw),
        }),
    }
}
