//! Domain models for the POS Back Office

mod product;
mod stock_movement;
mod stock_report;

pub use product::*;
pub use stock_movement::*;
pub use stock_report::*;
