use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use vendor_portal_models::{odata, EntitySet};
use vendor_portal_utils::{require_identifier, PortalError};

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/profile/:vendor_id
///
/// The vendor id is forwarded as supplied; SAP resolves both padded and bare
/// forms for this entity set.
pub async fn get_vendor_profile(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let vendor_id = require_identifier("vendorId", Some(&vendor_id))?;

    let path = format!(
        "{}?$format=json",
        odata::entity_path(EntitySet::VendorProfile, &[("VendorId", vendor_id.as_str())])
    );
    let rows = state.sap.fetch_rows(EntitySet::VendorProfile, &path).await?;

    let profile = rows
        .into_iter()
        .next()
        .ok_or_else(|| PortalError::not_found(format!("No vendor profile found for {}.", vendor_id)))?;

    Ok(Json(json!({
        "success": true,
        "data": profile,
    })))
}
