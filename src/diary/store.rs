//! Diary store
//!
//! Holds every daily entry in memory and writes the whole list back to the
//! persistence port after each change.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{DailyEntry, LoggedMeal, MealType};
use crate::storage::{load_json, save_json, Storage, StorageResult, DIARY_ENTRIES_KEY};

pub struct DiaryStore {
    storage: Arc<dyn Storage>,
    entries: Vec<DailyEntry>,
}

impl DiaryStore {
    /// Load entries from storage, starting empty when nothing was saved yet
    pub fn load(storage: Arc<dyn Storage>) -> StorageResult<Self> {
        let entries: Vec<DailyEntry> =
            load_json(storage.as_ref(), DIARY_ENTRIES_KEY)?.unwrap_or_default();
        tracing::info!(entries = entries.len(), "Loaded diary");
        Ok(Self { storage, entries })
    }

    /// Stored entry for a date, if any meal was ever logged on it
    pub fn find_entry(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Entry for a date, or an empty one that is not persisted until a meal is added
    pub fn get_entry(&self, date: NaiveDate) -> DailyEntry {
        self.find_entry(date)
            .cloned()
            .unwrap_or_else(|| DailyEntry::empty(date))
    }

    /// Append a meal to a day and persist the diary.
    ///
    /// The updated entry replaces any previous one for the same date and moves
    /// to the end of the list. In-memory state only changes once the write
    /// succeeded.
    pub fn add_meal(&mut self, date: NaiveDate, meal_type: MealType, meal: LoggedMeal) -> StorageResult<DailyEntry> {
        let mut entry = self.get_entry(date);
        let calories = meal.calories;
        entry.push_meal(meal_type, meal);

        let mut entries: Vec<DailyEntry> = self
            .entries
            .iter()
            .filter(|e| e.date != date)
            .cloned()
            .collect();
        entries.push(entry.clone());

        save_json(self.storage.as_ref(), DIARY_ENTRIES_KEY, &entries)?;
        self.entries = entries;

        tracing::info!(
            %date,
            meal_type = meal_type.as_str(),
            calories,
            total_calories = entry.total_calories,
            "Meal added"
        );
        Ok(entry)
    }

    /// All entries in storage order
    pub fn entries(&self) -> &[DailyEntry] {
        &self.entries
    }

    /// Entries within an inclusive date range, oldest first
    pub fn entries_in_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<&DailyEntry> {
        let mut selected: Vec<&DailyEntry> = self
            .entries
            .iter()
            .filter(|e| start.map_or(true, |s| e.date >= s))
            .filter(|e| end.map_or(true, |en| e.date <= en))
            .collect();
        selected.sort_by_key(|e| e.date);
        selected
    }
}
