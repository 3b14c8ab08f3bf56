use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortalError {
    #[error("Missing required identifier: {field}")]
    MissingIdentifier { field: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    Authentication { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Network error: no response from SAP ({message})")]
    UpstreamUnreachable { message: String },

    #[error("SAP Error: {message}")]
    Upstream { status: u16, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl PortalError {
    pub fn missing_identifier(field: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            field: field.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn upstream_unreachable(message: impl Into<String>) -> Self {
        Self::UpstreamUnreachable {
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingIdentifier { .. } => "MISSING_IDENTIFIER",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::UpstreamUnreachable { .. } => "UPSTREAM_UNREACHABLE",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    /// SAP's own status is relayed for upstream application errors; anything
    /// outside the error range falls back to 502.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingIdentifier { .. } => 400,
            Self::Validation { .. } => 400,
            Self::Authentication { .. } => 401,
            Self::NotFound { .. } => 404,
            Self::UpstreamUnreachable { .. } => 500,
            Self::Upstream { status, .. } if (400..=599).contains(status) => *status,
            Self::Upstream { .. } => 502,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type PortalResult<T> = Result<T, PortalError>;

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&PortalError> for ErrorResponse {
    fn from(error: &PortalError) -> Self {
        Self {
            success: false,
            code: error.error_code().to_string(),
            message: error.to_string(),
            error: None,
            details: None,
        }
    }
}

impl From<PortalError> for ErrorResponse {
    fn from(error: PortalError) -> Self {
        Self::from(&error)
    }
}

// Conversion from common error types
impl From<reqwest::Error> for PortalError {
    fn from(error: reqwest::Error) -> Self {
        let status = error.status();
        let message = error.without_url().to_string();
        match status {
            Some(status) => Self::upstream(status.as_u16(), message),
            None => Self::upstream_unreachable(message),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
