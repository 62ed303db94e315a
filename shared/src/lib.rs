//! Shared types and models for the POS Back Office
//!
//! This crate contains the wire models, boundary validation and the stock
//! reconciliation engine shared between the backend and the dashboard
//! (via WASM).

pub mod models;
pub mod reconciliation;
pub mod types;
pub mod validation;

pub use models::*;
pub use reconciliation::*;
pub use types::*;
pub use validation::*;
