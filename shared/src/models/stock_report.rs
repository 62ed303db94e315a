//! Stock report models
//!
//! These mirror the payload of the reporting service, so a server-computed
//! report and a locally reconciled one are interchangeable. Quantities and
//! amounts go over the wire as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A quantity and its monetary value
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QtyAmount {
    #[serde(with = "rust_decimal::serde::float")]
    pub qty: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl QtyAmount {
    pub const ZERO: QtyAmount = QtyAmount {
        qty: Decimal::ZERO,
        amount: Decimal::ZERO,
    };

    /// Value `qty` at `unit_price`, or `None` if the amount overflows
    pub fn priced(qty: Decimal, unit_price: Decimal) -> Option<Self> {
        Some(Self {
            qty,
            amount: qty.checked_mul(unit_price)?,
        })
    }

    pub fn checked_add(&self, rhs: &QtyAmount) -> Option<QtyAmount> {
        Some(QtyAmount {
            qty: self.qty.checked_add(rhs.qty)?,
            amount: self.amount.checked_add(rhs.amount)?,
        })
    }
}

/// One product's stock ledger for a reporting window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockReportLine {
    pub product_id: String,
    #[serde(default)]
    pub barcode: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub opening_stock: QtyAmount,
    pub purchases: QtyAmount,
    /// Opening stock plus purchases, before consumption
    pub balance: QtyAmount,
    pub consumption: QtyAmount,
    pub closing_stock: QtyAmount,
}

/// Field-wise totals across every line of a report
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockReportSummary {
    pub opening_stock: QtyAmount,
    pub purchases: QtyAmount,
    pub balance: QtyAmount,
    pub consumption: QtyAmount,
    pub closing_stock: QtyAmount,
}

impl StockReportSummary {
    /// Totals with one more line folded in, or `None` on overflow
    pub fn checked_add_line(&self, line: &StockReportLine) -> Option<Self> {
        Some(Self {
            opening_stock: self.opening_stock.checked_add(&line.opening_stock)?,
            purchases: self.purchases.checked_add(&line.purchases)?,
            balance: self.balance.checked_add(&line.balance)?,
            consumption: self.consumption.checked_add(&line.consumption)?,
            closing_stock: self.closing_stock.checked_add(&line.closing_stock)?,
        })
    }
}

/// Complete stock report as served to the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StockReport {
    pub report: Vec<StockReportLine>,
    pub summary: StockReportSummary,
}

impl StockReport {
    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }
}
