//! Models for the POS Back Office service
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
pub use shared::types::DateRange;
