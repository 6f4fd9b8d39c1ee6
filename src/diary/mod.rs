//! Diary state
//!
//! The date-keyed meal store, goal tracking and the calendar view built on them.

pub mod calendar;
pub mod goals;
pub mod store;

pub use calendar::{classify_day, CalendarDay, CalendarMonth, DayClass};
pub use goals::{GoalStatus, GoalTracker, MacroProgress, Progress};
pub use store::DiaryStore;
