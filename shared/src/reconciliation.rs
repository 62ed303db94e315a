//! Stock reconciliation
//!
//! Rebuilds a per-product stock ledger for a reporting window from the
//! current on-hand quantities and the movements recorded in that window.
//! Used when the reporting service cannot supply its own report.
//!
//! Opening stock is back-solved from the identity
//! `opening + purchases - consumption = closing`, with closing taken as the
//! quantity on hand right now. Both `out` and `adjustment` movements count as
//! consumption and are valued at selling price; `return` movements are not
//! part of the ledger.

use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    MovementType, Product, QtyAmount, StockMovement, StockReport, StockReportLine,
    StockReportSummary,
};
use crate::types::DateRange;

/// Reconciliation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Stock figures for product {0} overflow")]
    ProductOverflow(String),

    #[error("Stock report totals overflow")]
    SummaryOverflow,
}

/// Purchase and consumption totals for a single product
#[derive(Debug, Default, Clone, Copy)]
struct MovementTotals {
    purchases: Decimal,
    consumption: Decimal,
}

impl MovementTotals {
    fn checked_apply(self, movement: &StockMovement) -> Option<Self> {
        let mut next = self;
        match movement.movement_type {
            MovementType::In => next.purchases = self.purchases.checked_add(movement.quantity)?,
            MovementType::Out | MovementType::Adjustment => {
                next.consumption = self.consumption.checked_add(movement.quantity.abs())?
            }
            MovementType::Return => {}
        }
        Some(next)
    }
}

/// Derive one report line per product, in the order of `products`.
///
/// `movements` must already be restricted to the reporting window. Fails
/// only when a product's figures exceed the `Decimal` range.
pub fn reconcile(
    products: &[Product],
    movements: &[StockMovement],
) -> Result<Vec<StockReportLine>, ReconcileError> {
    // `None` marks a product whose movement totals overflowed
    let mut totals: HashMap<&str, Option<MovementTotals>> = HashMap::new();
    for movement in movements {
        let entry = totals
            .entry(movement.product_id.as_str())
            .or_insert(Some(MovementTotals::default()));
        *entry = entry.and_then(|t| t.checked_apply(movement));
    }

    products
        .iter()
        .map(|product| {
            let totals = match totals.get(product.id.as_str()) {
                Some(Some(totals)) => *totals,
                Some(None) => return Err(ReconcileError::ProductOverflow(product.id.clone())),
                None => MovementTotals::default(),
            };
            reconcile_product(product, totals)
                .ok_or_else(|| ReconcileError::ProductOverflow(product.id.clone()))
        })
        .collect()
}

fn reconcile_product(product: &Product, totals: MovementTotals) -> Option<StockReportLine> {
    let closing_qty = product.current_quantity;
    let opening_qty = closing_qty
        .checked_sub(totals.purchases)?
        .checked_add(totals.consumption)?
        .max(Decimal::ZERO);
    let balance_qty = opening_qty
        .checked_add(totals.purchases)?
        .max(Decimal::ZERO);

    Some(StockReportLine {
        product_id: product.id.clone(),
        barcode: product.barcode.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        opening_stock: QtyAmount::priced(opening_qty, product.cost_price)?,
        purchases: QtyAmount::priced(totals.purchases, product.cost_price)?,
        balance: QtyAmount::priced(balance_qty, product.cost_price)?,
        consumption: QtyAmount::priced(totals.consumption, product.selling_price)?,
        closing_stock: QtyAmount::priced(closing_qty, product.cost_price)?,
    })
}

/// Sum every line field-wise. An empty slice gives an all-zero summary.
pub fn summarize(lines: &[StockReportLine]) -> Result<StockReportSummary, ReconcileError> {
    lines
        .iter()
        .try_fold(StockReportSummary::default(), |summary, line| {
            summary.checked_add_line(line)
        })
        .ok_or(ReconcileError::SummaryOverflow)
}

/// Reconcile and summarize in one step
pub fn build_stock_report(
    products: &[Product],
    movements: &[StockMovement],
) -> Result<StockReport, ReconcileError> {
    let report = reconcile(products, movements)?;
    let summary = summarize(&report)?;
    Ok(StockReport { report, summary })
}

/// Keep only the movements whose timestamp falls inside `range`
pub fn movements_in_range(movements: Vec<StockMovement>, range: &DateRange) -> Vec<StockMovement> {
    movements
        .into_iter()
        .filter(|m| range.contains(&m.timestamp))
        .collect()
}
