//! Vendor Portal API Gateway
//!
//! axum service that fronts the SAP vendor portal OData service for the
//! dashboard frontend.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use vendor_portal_utils::{AppConfig, PortalError, PortalResult};

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod sap_client;

use handlers::{health_check, metrics_handler};
use metrics::GatewayMetrics;
use middleware::*;
use sap_client::SapClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sap: SapClient,
    pub metrics: GatewayMetrics,
}

impl AppState {
    pub fn new(config: AppConfig) -> PortalResult<Self> {
        let metrics = GatewayMetrics::new()
            .map_err(|e| PortalError::internal(format!("failed to register metrics: {}", e)))?;
        let sap = SapClient::new(&config.sap, metrics.clone())?;

        Ok(Self {
            config: Arc::new(config),
            sap,
            metrics,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server.max_request_size;

    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))

        // API routes
        .nest("/api", routes::create_api_routes())

        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                )
                .layer(DefaultBodyLimit::max(max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(axum::middleware::from_fn(error_handling_middleware)),
        )

        // Application state
        .with_state(state)
}
