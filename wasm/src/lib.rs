//! WebAssembly module for the TAP Grading Platform
//!
//! Provides client-side computation for:
//! - Deduction calculations (offline preview before submitting)
//! - Condition percentage calculations
//! - Input validation

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Grade a sample from JSON counts and return the full result as JSON
#[wasm_bindgen]
pub fn calculate_grading(counts_json: &str, total_janjang: i32) -> Result<String, JsValue> {
    let counts: BunchCounts = serde_json::from_str(counts_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid counts JSON: {}", e)))?;

    let result = GradingResult::compute(total_janjang, &counts)
        .map_err(|e| JsValue::from_str(e))?;

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Total deduction for a sample, rounded for display
#[wasm_bindgen]
pub fn calculate_total_potongan(counts_json: &str, total_janjang: i32) -> Result<f64, JsValue> {
    let counts: BunchCounts = serde_json::from_str(counts_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid counts JSON: {}", e)))?;

    let result = GradingResult::compute(total_janjang, &counts)
        .map_err(|e| JsValue::from_str(e))?;

    Ok(result
        .total_deduction_display()
        .to_f64()
        .unwrap_or(0.0))
}

/// Deduction for a single condition at the given percentage
///
/// Accepts the form labels, including revision variants like "Tikus >50%"
/// and "Parteno". Returns 0 for informational conditions.
#[wasm_bindgen]
pub fn condition_potongan(condition_label: &str, percentage: f64) -> Result<f64, JsValue> {
    let condition = FruitCondition::from_label(condition_label)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown condition: {}", condition_label)))?;

    let pct = Decimal::try_from(percentage).unwrap_or(Decimal::ZERO);
    Ok(condition_deduction(condition, pct)
        .and_then(|d| d.round_dp(2).to_f64())
        .unwrap_or(0.0))
}

/// Whether the total sample size is valid for grading
#[wasm_bindgen]
pub fn is_valid_total_sample(total_janjang: i32) -> bool {
    validate_total_sample(total_janjang).is_ok()
}
