//! Food Diary Tools module
//!
//! Tool implementations behind the MCP server. Each returns a serializable
//! response or a single user-facing error message.

pub mod auth;
pub mod calendar;
pub mod days;
pub mod foods;
pub mod goals;
pub mod status;

use chrono::NaiveDate;

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date))
}
