//! WebAssembly module for the Crop Management Portal
//!
//! Provides browser-side form affordances for:
//! - Closed option lists backing the selection widgets
//! - Client-side validation of a manual crop entry
//! - Table view column headers

use crop_shared::{
    validate_new_record, CropName, GrowthStage, NewCropRecord, PestControlMeasure,
    BULK_INSERT_PRESETS, DISPLAY_COLUMNS,
};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use crop_shared::models::*;
pub use crop_shared::types::*;

fn to_js_array<'a>(values: impl IntoIterator<Item = &'a str>) -> js_sys::Array {
    values.into_iter().map(JsValue::from_str).collect()
}

/// Crop names for the crop selection widget
#[wasm_bindgen]
pub fn crop_name_options() -> js_sys::Array {
    to_js_array(CropName::ALL.iter().map(|c| c.as_str()))
}

/// Growth stages for the stage selection widget
#[wasm_bindgen]
pub fn growth_stage_options() -> js_sys::Array {
    to_js_array(GrowthStage::ALL.iter().map(|s| s.as_str()))
}

/// Pest control measures for the measure selection widget
#[wasm_bindgen]
pub fn pest_control_options() -> js_sys::Array {
    to_js_array(PestControlMeasure::ALL.iter().map(|m| m.as_str()))
}

/// Record counts offered for bulk insertion
#[wasm_bindgen]
pub fn bulk_insert_presets() -> js_sys::Array {
    BULK_INSERT_PRESETS
        .iter()
        .map(|n| JsValue::from_f64(*n as f64))
        .collect()
}

/// Column headers of the table view
#[wasm_bindgen]
pub fn display_columns() -> js_sys::Array {
    to_js_array(DISPLAY_COLUMNS)
}

/// Parse and check a manual entry before it is submitted
pub fn check_crop_entry(entry_json: &str) -> Result<NewCropRecord, String> {
    let entry: NewCropRecord =
        serde_json::from_str(entry_json).map_err(|e| format!("Invalid crop entry: {}", e))?;
    validate_new_record(&entry).map_err(|(field, message)| format!("{}: {}", field, message))?;
    Ok(entry)
}

/// Validate a manual entry; throws a message naming the offending field
#[wasm_bindgen]
pub fn validate_crop_entry(entry_json: &str) -> Result<(), JsValue> {
    check_crop_entry(entry_json)
        .map(|_| ())
        .map_err(|msg| JsValue::from_str(&msg))
}

/// Days from planting to harvest for two ISO dates, if both parse
#[wasm_bindgen]
pub fn growing_days(planting_date: &str, harvest_date: &str) -> Option<i32> {
    let planting = chrono::NaiveDate::parse_from_str(planting_date, "%Y-%m-%d").ok()?;
    let harvest = chrono::NaiveDate::parse_from_str(harvest_date, "%Y-%m-%d").ok()?;
    i32::try_from((harvest - planting).num_days()).ok()
}
