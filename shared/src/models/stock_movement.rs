//! Stock movement history models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recorded inventory event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    #[serde(default)]
    pub id: Option<String>,
    pub product_id: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    /// Magnitude; the direction comes from `movement_type`
    pub quantity: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
}

/// Types of stock movements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Goods received
    In,
    /// Goods sold or issued
    Out,
    Adjustment,
    Return,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Adjustment => "adjustment",
            MovementType::Return => "return",
        }
    }

    /// Whether the movement counts towards consumption in a stock report
    pub fn is_consumption(&self) -> bool {
        matches!(self, MovementType::Out | MovementType::Adjustment)
    }
}
