use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "vendor-portal-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /api/health/detailed
pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let mut health_status = json!({
        "status": "healthy",
        "service": "vendor-portal-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    // Any HTTP answer proves reachability; auth or routing errors still
    // degrade the overall status.
    let sap_status = match state.sap.ping().await {
        Ok(status) if status.is_success() => {
            json!({"status": "healthy", "message": format!("HTTP {}", status.as_u16())})
        }
        Ok(status) => json!({
            "status": "degraded",
            "message": format!("HTTP {}", status.as_u16())
        }),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    health_status["checks"]["sap"] = sap_status;

    let all_healthy = health_status["checks"]
        .as_object()
        .map(|checks| checks.values().all(|check| check["status"] == "healthy"))
        .unwrap_or(false);

    if !all_healthy {
        health_status["status"] = json!("degraded");
    }

    Json(health_status)
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.render() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error encoding metrics: {}", e),
        ),
    }
}
