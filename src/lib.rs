//! Food Diary Library
//!
//! Meal logging against per-100g food data, daily calorie and macro goals,
//! and a goal-colored activity calendar.

pub mod api;
pub mod auth;
pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod diary;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod storage;
pub mod tools;
