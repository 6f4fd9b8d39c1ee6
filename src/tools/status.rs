//! Food Diary Status Tool
//!
//! Provides runtime status information about the service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Meal logging instructions for AI assistants
pub const DIARY_INSTRUCTIONS: &str = r#"
# Food Diary Instructions

## Overview

The diary stores meals per calendar day, split into breakfast, lunch and dinner.
All food data is per 100 grams; you log the weight actually eaten and the diary
scales protein, fat, carbs and calories for you.

## Logging a Meal

1. Find the food: `list_predefined_foods` shows the built-in table,
   `search_food` looks a name up in the configured catalog (pass `weight` to
   preview the portion). `suggest_foods` offers Polish/English name hints.
2. Call `log_meal` with:
   - `date` in YYYY-MM-DD
   - `meal_type`: breakfast, lunch or dinner
   - `food_name`: exactly as returned by the catalog
   - `weight`: grams eaten, greater than 0
3. The response contains the scaled meal and the day's new calorie total.

Rounding: macros to one decimal place, calories to whole kcal.

## Reading the Diary

- `get_entry` returns one day (an empty day if nothing is logged yet)
- `list_entries` summarizes logged days, optionally within a date range
- `goal_summary` compares a day with the calorie and macro goals
- `calendar_month` colors each day of a month:
  - green (`bg-green-200`): at or below the calorie goal
  - red (`bg-red-200`): above the calorie goal
  - `selected`: the date passed as `selected_date`

## Goals

- `get_goals`, `set_calorie_goal` (kcal), `set_macro_goals` (grams)
- Defaults: 2000 kcal, protein 150 g, carbs 250 g, fat 70 g

## Accounts

`register`, `login`, `logout`, `session_status`. When the server runs with
FOOD_DIARY_REQUIRE_AUTH=true, diary tools refuse to run until `login` succeeds.

## Notes

- Meals cannot be edited or removed once logged
- The status label reads "Zjedzono za mało kalorii!" ("too few calories
  eaten") when a day is at or below the goal and "Osiągnięto cel!" ("goal
  reached") above it; use meets_calorie_goal for the actual comparison
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct DiaryStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: Option<i32>,
    pub needs_migration: Option<bool>,

    /// Diary information
    pub catalog_source: &'static str,
    pub entry_count: usize,
    pub authenticated: bool,
    pub auth_required: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Diary-side values the tracker cannot see on its own
#[derive(Debug, Clone, Copy)]
pub struct DiarySnapshot {
    pub catalog_source: &'static str,
    pub entry_count: usize,
    pub authenticated: bool,
    pub auth_required: bool,
    pub schema_version: Option<i32>,
    pub needs_migration: Option<bool>,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, diary: DiarySnapshot) -> DiaryStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        DiaryStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version: diary.schema_version,
            needs_migration: diary.needs_migration,
            catalog_source: diary.catalog_source,
            entry_count: diary.entry_count,
            authenticated: diary.authenticated,
            auth_required: diary.auth_required,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
