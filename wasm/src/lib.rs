//! WebAssembly module for the POS Back Office dashboard
//!
//! Provides client-side computation for:
//! - Stock report reconciliation
//! - Stock report summaries
//! - Upstream payload validation

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::reconciliation::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Rebuild a stock report from an inventory snapshot and a movement list.
///
/// Both arguments are JSON arrays; the result is `{ report, summary }` JSON.
/// Invalid products and movements are skipped. Fails if the figures overflow.
#[wasm_bindgen]
pub fn reconcile_stock(products_json: &str, movements_json: &str) -> Result<String, JsValue> {
    let products: Vec<Product> = serde_json::from_str(products_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid products JSON: {}", e)))?;
    let movements: Vec<StockMovement> = serde_json::from_str(movements_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid movements JSON: {}", e)))?;

    let products: Vec<Product> = products
        .into_iter()
        .filter(|p| validate_product(p).is_ok())
        .collect();
    let movements: Vec<StockMovement> = movements
        .into_iter()
        .filter(|m| validate_movement(m).is_ok())
        .collect();

    let report = build_stock_report(&products, &movements)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&report)
}

/// Sum a JSON array of report lines into a summary
#[wasm_bindgen]
pub fn summarize_stock(lines_json: &str) -> Result<String, JsValue> {
    let lines: Vec<StockReportLine> = serde_json::from_str(lines_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid report lines JSON: {}", e)))?;

    let summary = summarize(&lines).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&summary)
}
