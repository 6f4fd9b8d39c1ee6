//! Persistence port
//!
//! Diary state is stored as string values under a handful of well-known keys,
//! the same layout a browser's local storage would hold.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

/// JSON array of daily entries
pub const DIARY_ENTRIES_KEY: &str = "diaryEntries";
/// Stringified calorie goal
pub const CALORY_GOAL_KEY: &str = "caloryGoal";
/// JSON object with protein/carbs/fat targets
pub const MACRO_GOALS_KEY: &str = "macroGoals";
/// Opaque session token from the user backend
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Stored value under '{key}' is malformed: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value persistence
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Read and decode a JSON value, `None` when the key was never written
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> StorageResult<Option<T>> {
    match storage.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Encode a value as JSON and write it
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MacroGoals;

    #[test]
    fn test_json_helpers() {
        let storage = MemoryStorage::default();
        assert_eq!(load_json::<MacroGoals>(&storage, MACRO_GOALS_KEY).unwrap(), None);

        let goals = MacroGoals { protein: 120.0, carbs: 200.0, fat: 60.0 };
        save_json(&storage, MACRO_GOALS_KEY, &goals).unwrap();
        assert_eq!(load_json::<MacroGoals>(&storage, MACRO_GOALS_KEY).unwrap(), Some(goals));
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let storage = MemoryStorage::default();
        storage.set(MACRO_GOALS_KEY, "{not json").unwrap();

        let err = load_json::<MacroGoals>(&storage, MACRO_GOALS_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == MACRO_GOALS_KEY));
    }
}
