use axum::{
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};

/// Log failed responses once, inside the request span.
pub async fn error_handling_middleware(
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), "Request failed");
    } else if status.is_client_error() {
        warn!(%method, %path, status = status.as_u16(), "Request rejected");
    }

    response
}
