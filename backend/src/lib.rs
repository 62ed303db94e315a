//! POS Back Office - stock report service
//!
//! Serves the back-office dashboard's stock report, falling back to local
//! reconciliation over the inventory and stock-history endpoints when the
//! reporting endpoint is unavailable.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;

use external::BackofficeClient;
use services::StockReportService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stock_reports: StockReportService<BackofficeClient>,
}

impl AppState {
    /// Build the state and its upstream client from configuration
    pub fn from_config(config: Config) -> error::AppResult<Self> {
        let client = BackofficeClient::new(
            config.upstream.base_url.clone(),
            config.upstream.timeout(),
        )?;
        Ok(Self {
            config: Arc::new(config),
            stock_reports: StockReportService::new(client),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "POS Back Office API v1.0"
}
