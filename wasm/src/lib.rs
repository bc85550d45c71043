//! Diabetes Risk WASM Module
//!
//! WebAssembly bindings for the calculations the browser front-end runs
//! while the user is still typing: live BMI, its category, and meal
//! scaling for the recommendation view.

use diabetes_risk_shared::{
    bmi_reading, classify_bmi, is_diabetic_label, recommendations, ActivityLevel, ValidationError,
};
use wasm_bindgen::prelude::*;

/// Live BMI from height (cm) and weight (kg), rounded to one decimal and
/// capped for display. `None` until both inputs are usable.
#[wasm_bindgen(js_name = calculateBmi)]
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    bmi_reading(Some(height_cm), Some(weight_kg)).map(|reading| reading.value)
}

/// Category label for a BMI value
#[wasm_bindgen(js_name = bmiCategory)]
pub fn bmi_category(bmi: f64) -> String {
    classify_bmi(bmi).label().to_string()
}

/// Scale a nutrient amount from a plan's base calories to a target.
/// Missing or non-positive inputs return the value unchanged.
#[wasm_bindgen(js_name = scaleNutrient)]
pub fn scale_nutrient(value: f64, target_calories: f64, base_calories: f64) -> f64 {
    if !(target_calories > 0.0 && base_calories > 0.0) {
        return value;
    }
    (value * target_calories / base_calories).round()
}

/// Whether a prediction label counts as diabetic
#[wasm_bindgen(js_name = isDiabeticLabel)]
pub fn diabetic_label(label: &str) -> bool {
    is_diabetic_label(label)
}

/// Personalised weekly meal plan as JSON
#[wasm_bindgen(js_name = mealPlanJson)]
pub fn meal_plan_json(energy: f64, activity_level: &str) -> Result<String, JsValue> {
    let level: ActivityLevel = activity_level
        .parse()
        .map_err(|e: ValidationError| JsValue::from_str(&e.user_message()))?;
    let energy = (energy > 0.0).then_some(energy);
    let plan = recommendations::personalized_meal_plan(energy, level);
    serde_json::to_string(&plan).map_err(|e| JsValue::from_str(&e.to_string()))
}
