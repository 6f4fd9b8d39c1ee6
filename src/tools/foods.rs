//! Food lookup tools

use serde::Serialize;

use crate::catalog::translations::{suggestions, to_english, translate_food};
use crate::catalog::{MealCatalog, PredefinedCatalog};
use crate::models::{FoodItem, LoggedMeal};
use crate::nutrition::scale_portion;

pub const SEARCH_FAILED_MESSAGE: &str = "Food search failed";

/// Response for list_predefined_foods
#[derive(Debug, Serialize)]
pub struct ListFoodsResponse {
    pub items: Vec<FoodItem>,
    pub total: usize,
}

/// Response for search_food
#[derive(Debug, Serialize)]
pub struct SearchFoodResponse {
    pub query: String,
    pub source: &'static str,
    pub found: bool,
    pub item: Option<FoodItem>,
    /// Polish name of the result when the translation table knows it
    pub translated_name: Option<String>,
    /// Portion preview for the requested weight
    pub portion: Option<LoggedMeal>,
}

/// Response for suggest_foods
#[derive(Debug, Serialize)]
pub struct SuggestFoodsResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

pub fn list_predefined_foods(catalog: &PredefinedCatalog) -> ListFoodsResponse {
    ListFoodsResponse {
        items: catalog.items().to_vec(),
        total: catalog.items().len(),
    }
}

/// Resolve a food name to per-100g data, or an error message.
///
/// A name the catalog does not know is retried under its translation: Polish
/// names under English for the search backend, English names under Polish for
/// the built-in table.
pub async fn resolve_food(catalog: &dyn MealCatalog, name: &str) -> Result<Option<FoodItem>, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Food name must not be empty".to_string());
    }

    let polish = translate_food(name);
    let mut candidates = vec![name.to_string()];
    for alternative in [to_english(name).map(str::to_string), Some(polish)].into_iter().flatten() {
        if !candidates.iter().any(|c| c.to_lowercase() == alternative.to_lowercase()) {
            candidates.push(alternative);
        }
    }

    for candidate in &candidates {
        let found = catalog.find(candidate).await.map_err(|e| {
            tracing::warn!(source = catalog.source(), food = %candidate, error = %e, "Food lookup failed");
            e.user_message(SEARCH_FAILED_MESSAGE)
        })?;
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

/// Search a food by name, optionally previewing a portion
pub async fn search_food(
    catalog: &dyn MealCatalog,
    query: &str,
    weight: Option<f64>,
) -> Result<SearchFoodResponse, String> {
    let item = resolve_food(catalog, query).await?;

    let portion = match (&item, weight) {
        (Some(item), Some(weight)) => Some(scale_portion(item, weight).map_err(|e| e.to_string())?),
        _ => None,
    };
    let translated_name = item.as_ref().and_then(|item| {
        let translated = translate_food(&item.name);
        (translated != item.name).then_some(translated)
    });

    Ok(SearchFoodResponse {
        query: query.to_string(),
        source: catalog.source(),
        found: item.is_some(),
        item,
        translated_name,
        portion,
    })
}

pub fn suggest_foods(query: &str) -> SuggestFoodsResponse {
    SuggestFoodsResponse {
        query: query.to_string(),
        suggestions: suggestions(query),
    }
}
