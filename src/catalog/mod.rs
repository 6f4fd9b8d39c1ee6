//! Meal catalog
//!
//! Sources of per-100g food data: the built-in table or the remote search service.

mod predefined;
mod remote;
pub mod translations;

pub use predefined::PredefinedCatalog;
pub use remote::RemoteCatalog;

use async_trait::async_trait;

use crate::api::ApiError;
use crate::models::FoodItem;

#[async_trait]
pub trait MealCatalog: Send + Sync {
    /// Short name of the source, for status output
    fn source(&self) -> &'static str;

    /// Look a food up by name. `Ok(None)` when the source has no such food.
    async fn find(&self, name: &str) -> Result<Option<FoodItem>, ApiError>;
}
