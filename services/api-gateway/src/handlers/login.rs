//! Login Handler
//!
//! Vendor credentials are checked by reading the composite-key entity
//! `ZLOGIN_AUTHSet(VendorId,VendorPwd)` as Atom XML and inspecting its
//! `Status` and `Message` properties.

use axum::{extract::State, response::Json};
use quick_xml::{events::Event, Reader};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use validator::Validate;
use vendor_portal_models::{odata, EntitySet};
use vendor_portal_utils::{not_blank, validate_model, PortalError};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

const DEFAULT_SUCCESS_MESSAGE: &str = "Login successful.";
const DEFAULT_FAILURE_MESSAGE: &str = "SAP login failed. Invalid credentials or unknown error.";

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[validate(custom = "not_blank")]
    pub vendor_id: String,
    #[validate(custom = "not_blank")]
    pub vendor_password: String,
}

/// `Status`/`Message` pair read from the login entity.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        self.status
            .as_deref()
            .map(|status| status.trim().eq_ignore_ascii_case("SUCCESS"))
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Property {
    Status,
    Message,
}

/// Extract `Status` and `Message` from `m:properties`, ignoring namespace
/// prefixes. Empty elements read as absent.
pub fn parse_login_response(xml: &str) -> Result<LoginOutcome, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut outcome = LoginOutcome::default();
    let mut in_properties = false;
    let mut current: Option<Property> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"properties" => in_properties = true,
                b"Status" if in_properties => current = Some(Property::Status),
                b"Message" if in_properties => current = Some(Property::Message),
                _ => current = None,
            },
            Event::Text(e) => {
                if let Some(property) = current {
                    let text = e.unescape()?.trim().to_string();
                    if !text.is_empty() {
                        match property {
                            Property::Status => outcome.status = Some(text),
                            Property::Message => outcome.message = Some(text),
                        }
                    }
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"properties" {
                    in_properties = false;
                }
                current = None;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(outcome)
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    validate_model(&request)
        .map_err(|_| PortalError::missing_identifier("vendorId and vendorPassword"))?;
    let vendor_id = request.vendor_id.trim();

    let path = odata::entity_path(
        EntitySet::LoginAuth,
        &[
            ("VendorId", vendor_id),
            ("VendorPwd", request.vendor_password.as_str()),
        ],
    );
    let xml = state.sap.fetch_xml(EntitySet::LoginAuth, &path).await?;

    let outcome = parse_login_response(&xml).map_err(|e| {
        warn!(error = %e, "Unparsable SAP login response");
        PortalError::internal(format!("unexpected SAP login response: {}", e))
    })?;

    if outcome.is_success() {
        info!(vendor_id = %vendor_id, "Vendor login succeeded");
        return Ok(Json(json!({
            "success": true,
            "data": {
                "vendorId": vendor_id,
                "message": outcome.message.as_deref().unwrap_or(DEFAULT_SUCCESS_MESSAGE),
            }
        })));
    }

    warn!(
        vendor_id = %vendor_id,
        sap_status = ?outcome.status,
        "Vendor login rejected"
    );
    let message = outcome
        .message
        .clone()
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
    let reason = format!(
        "SAP Status: {}",
        outcome.status.as_deref().unwrap_or("Not provided")
    );
    Err(ApiError::from(PortalError::authentication(message)).with_reason(reason))
}
