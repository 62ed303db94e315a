//! Route definitions for the POS Back Office API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Stock reporting
        .nest("/reports", report_routes())
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new().route("/stock", get(handlers::get_stock_report))
}
