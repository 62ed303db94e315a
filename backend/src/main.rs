//! POS Back Office - Backend Server
//!
//! Stock reporting for the pharmacy/retail point-of-sale back office.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pos_backoffice::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pos_backoffice_server=debug,pos_backoffice=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting POS Back Office Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Upstream: {}", config.upstream.base_url);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = AppState::from_config(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
