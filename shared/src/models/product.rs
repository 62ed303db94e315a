//! Inventory product models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the current inventory snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub barcode: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    /// On hand right now, not scoped to any reporting window
    pub current_quantity: Decimal,
}
