//! Runtime configuration
//!
//! Everything is read from environment variables once at startup.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:8081";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Where food lookups go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Predefined,
    Remote,
}

impl FromStr for CatalogSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "predefined" => Ok(CatalogSource::Predefined),
            "remote" => Ok(CatalogSource::Remote),
            other => Err(format!("unknown catalog '{}', expected predefined or remote", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub api_url: String,
    pub catalog: CatalogSource,
    /// Diary tools refuse to run without a stored session token
    pub require_auth: bool,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: env::var("FOOD_DIARY_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            api_url: env::var("FOOD_DIARY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            catalog: try_load("FOOD_DIARY_CATALOG", CatalogSource::Predefined),
            require_auth: try_load("FOOD_DIARY_REQUIRE_AUTH", false),
            http_timeout: Duration::from_secs(try_load(
                "FOOD_DIARY_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
        }
    }
}

/// Parse an optional variable, keeping `default` when it is unset or invalid
fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => {
            info!("{key} not set, using default: {default:?}");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value '{raw}': {e}, using default: {default:?}");
        default
    })
}

/// `<project>/data/food_diary.db`, found relative to the running binary
fn default_database_path() -> PathBuf {
    let mut path = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("food_diary.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_source_parse() {
        assert_eq!("Remote".parse::<CatalogSource>(), Ok(CatalogSource::Remote));
        assert_eq!("predefined".parse::<CatalogSource>(), Ok(CatalogSource::Predefined));
        assert!("usda".parse::<CatalogSource>().is_err());
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert!(parse_or("FOOD_DIARY_REQUIRE_AUTH", "true", false));
        assert!(!parse_or("FOOD_DIARY_REQUIRE_AUTH", "yes please", false));
        assert_eq!(parse_or("FOOD_DIARY_HTTP_TIMEOUT_SECS", " 30 ", 10u64), 30);
        assert_eq!(
            parse_or("FOOD_DIARY_CATALOG", "nope", CatalogSource::Predefined),
            CatalogSource::Predefined
        );
    }

    #[test]
    fn test_default_database_path_shape() {
        let path = default_database_path();
        assert!(path.ends_with("data/food_diary.db"));
    }
}
