//! Validation utilities for upstream payloads
//!
//! Records coming from the inventory and stock-history services are checked
//! here before they reach the reconciliation engine.

use rust_decimal::Decimal;

use crate::models::{Product, StockMovement};
use crate::types::DateRange;

/// Largest quantity magnitude accepted from upstream (10^12)
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(3567587328, 232, 0, false, 0);

/// Largest unit price accepted from upstream (10^12)
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(3567587328, 232, 0, false, 0);

// ============================================================================
// Inventory Validations
// ============================================================================

/// Validate a product from the inventory snapshot
///
/// A negative on-hand quantity is allowed; reconciliation floors what it
/// derives from it.
pub fn validate_product(product: &Product) -> Result<(), &'static str> {
    if product.id.trim().is_empty() {
        return Err("Product id must not be empty");
    }
    if product.name.trim().is_empty() {
        return Err("Product name must not be empty");
    }
    if product.cost_price < Decimal::ZERO {
        return Err("Cost price cannot be negative");
    }
    if product.selling_price < Decimal::ZERO {
        return Err("Selling price cannot be negative");
    }
    if product.cost_price > MAX_UNIT_PRICE || product.selling_price > MAX_UNIT_PRICE {
        return Err("Unit price is out of range");
    }
    if product.current_quantity.abs() > MAX_QUANTITY {
        return Err("On-hand quantity is out of range");
    }
    Ok(())
}

/// Validate a stock movement from the movement history
pub fn validate_movement(movement: &StockMovement) -> Result<(), &'static str> {
    if movement.product_id.trim().is_empty() {
        return Err("Movement product id must not be empty");
    }
    if movement.quantity.abs() > MAX_QUANTITY {
        return Err("Movement quantity is out of range");
    }
    Ok(())
}

// ============================================================================
// Report Parameter Validations
// ============================================================================

/// Validate that a reporting window does not end before it starts
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if range.from > range.to {
        return Err("Report start date must not be after end date");
    }
    Ok(())
}
