use anyhow::{Context, Result};
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use vendor_portal_gateway::{create_app, AppState};
use vendor_portal_utils::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging
    init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }
    info!(sap = %config.sap.service_root(), "Starting vendor portal gateway");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server.host/server.port")?;

    let state = AppState::new(config)?;
    let app = create_app(state);

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    info!("Vendor portal gateway listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}
