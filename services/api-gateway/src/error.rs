use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use vendor_portal_utils::{ErrorResponse, PortalError};

/// Handler error: a [`PortalError`] plus optional extra body fields.
#[derive(Debug)]
pub struct ApiError {
    pub error: PortalError,
    reason: Option<String>,
    details: Option<Value>,
}

impl ApiError {
    /// Sets the `error` field of the body, e.g. `"SAP Status: FAILED"`.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<PortalError> for ApiError {
    fn from(error: PortalError) -> Self {
        Self {
            error,
            reason: None,
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::from(&self.error);
        if let Some(reason) = self.reason {
            body = body.with_error(reason);
        }
        if let Some(details) = self.details {
            body = body.with_details(details);
        }
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
