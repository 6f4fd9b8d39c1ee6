//! Built-in food table

use async_trait::async_trait;

use super::MealCatalog;
use crate::api::ApiError;
use crate::models::FoodItem;

#[derive(Debug, Clone)]
pub struct PredefinedCatalog {
    items: Vec<FoodItem>,
}

impl PredefinedCatalog {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Case-insensitive exact name match
    pub fn get(&self, name: &str) -> Option<&FoodItem> {
        let wanted = name.trim().to_lowercase();
        self.items.iter().find(|item| item.name.to_lowercase() == wanted)
    }
}

impl Default for PredefinedCatalog {
    fn default() -> Self {
        Self::new(vec![
            FoodItem::new("Jajecznica", 13.0, 11.0, 1.0, 156),
            FoodItem::new("Owsianka", 13.0, 5.0, 67.0, 371),
            FoodItem::new("Pierś z kurczaka", 31.0, 3.6, 0.0, 165),
            FoodItem::new("Łosoś", 20.0, 13.0, 0.0, 208),
            FoodItem::new("Sałatka grecka", 2.5, 16.0, 4.0, 168),
        ])
    }
}

#[async_trait]
impl MealCatalog for PredefinedCatalog {
    fn source(&self) -> &'static str {
        "predefined"
    }

    async fn find(&self, name: &str) -> Result<Option<FoodItem>, ApiError> {
        Ok(self.get(name).cloned())
    }
}
