//! HTTP handlers for the POS Back Office API

pub mod health;
pub mod stock_report;

pub use health::health_check;
pub use stock_report::get_stock_report;
