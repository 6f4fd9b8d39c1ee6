//! Nutrition calculation module
//!
//! Portion scaling from per-100g reference values.

pub mod portion;

pub use portion::{round_to_tenth, scale_portion, PortionError, REFERENCE_WEIGHT_GRAMS};
