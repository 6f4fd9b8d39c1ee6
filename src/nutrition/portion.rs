//! Portion scaling
//!
//! Turns per-100g food data into a logged meal for an actual weight.

use thiserror::Error;

use crate::models::{FoodItem, LoggedMeal};

/// Weight that all catalog nutrient values refer to
pub const REFERENCE_WEIGHT_GRAMS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortionError {
    #[error("Weight must be greater than 0 grams, got {0}")]
    NonPositiveWeight(f64),

    #[error("Weight must be a finite number")]
    NonFiniteWeight,
}

/// Round to one decimal place, the precision macros are shown with
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scale a food item to `weight` grams.
///
/// Protein, fat and carbs are rounded to one decimal place, calories to the
/// nearest whole kcal. The weight is kept as given.
pub fn scale_portion(item: &FoodItem, weight: f64) -> Result<LoggedMeal, PortionError> {
    if !weight.is_finite() {
        return Err(PortionError::NonFiniteWeight);
    }
    if weight <= 0.0 {
        return Err(PortionError::NonPositiveWeight(weight));
    }

    let factor = weight / REFERENCE_WEIGHT_GRAMS;

    Ok(LoggedMeal {
        name: item.name.clone(),
        protein: round_to_tenth(item.protein * factor),
        fat: round_to_tenth(item.fat * factor),
        carbs: round_to_tenth(item.carbs * factor),
        calories: (f64::from(item.calories) * factor).round() as u32,
        weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chicken() -> FoodItem {
        FoodItem::new("Pierś z kurczaka", 31.0, 3.6, 0.0, 165)
    }

    #[test]
    fn test_reference_weight_is_identity() {
        let meal = scale_portion(&chicken(), 100.0).unwrap();
        assert_eq!(meal.protein, 31.0);
        assert_eq!(meal.fat, 3.6);
        assert_eq!(meal.carbs, 0.0);
        assert_eq!(meal.calories, 165);
        assert_eq!(meal.weight, 100.0);
        assert_eq!(meal.name, "Pierś z kurczaka");
    }

    #[test]
    fn test_scaled_and_rounded() {
        // 150g: 46.5g protein, 5.4g fat, 247.5 kcal rounds up
        let meal = scale_portion(&chicken(), 150.0).unwrap();
        assert_eq!(meal.protein, 46.5);
        assert_eq!(meal.fat, 5.4);
        assert_eq!(meal.calories, 248);

        // 33g of oats: 371 * 0.33 = 122.43
        let oats = FoodItem::new("Owsianka", 13.0, 5.0, 67.0, 371);
        let meal = scale_portion(&oats, 33.0).unwrap();
        assert_eq!(meal.calories, 122);
        assert_eq!(meal.protein, 4.3);
        assert_eq!(meal.carbs, 22.1);
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert_eq!(
            scale_portion(&chicken(), 0.0),
            Err(PortionError::NonPositiveWeight(0.0))
        );
        assert_eq!(
            scale_portion(&chicken(), -20.0),
            Err(PortionError::NonPositiveWeight(-20.0))
        );
        assert_eq!(
            scale_portion(&chicken(), f64::NAN),
            Err(PortionError::NonFiniteWeight)
        );
    }

    proptest! {
        #[test]
        fn prop_calories_follow_weight(calories in 0u32..2000, weight in 0.1f64..5000.0) {
            let item = FoodItem::new("x", 1.0, 1.0, 1.0, calories);
            let meal = scale_portion(&item, weight).unwrap();
            let expected = (f64::from(calories) * (weight / 100.0)).round() as u32;
            prop_assert_eq!(meal.calories, expected);
        }

        #[test]
        fn prop_macros_have_one_decimal(protein in 0.0f64..100.0, weight in 1.0f64..1000.0) {
            let item = FoodItem::new("x", protein, 0.0, 0.0, 0);
            let meal = scale_portion(&item, weight).unwrap();
            let tenths = meal.protein * 10.0;
            prop_assert!((tenths - tenths.round()).abs() < 1e-6);
        }
    }
}
