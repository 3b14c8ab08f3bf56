//! Procurement Handlers
//!
//! RFQ lines, purchase orders and goods receipts for one vendor.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use vendor_portal_models::{EntitySet, VendorId};
use vendor_portal_utils::{require_identifier, AccessConfig, PortalError, PortalResult};

use super::{fetch_vendor_rows, ListQuery};
use crate::error::ApiResult;
use crate::AppState;

// ===== RFQs =====

/// GET /api/rfq/:lifnr
pub async fn get_rfqs(
    State(state): State<AppState>,
    Path(lifnr): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Value>> {
    let lifnr = require_identifier("lifnr", Some(&lifnr))?;
    let rows = fetch_vendor_rows(&state, EntitySet::Rfqs, &lifnr).await?;
    let rows = query.apply(EntitySet::Rfqs, rows)?;

    Ok(Json(json!({
        "success": true,
        "data": rows,
    })))
}

// ===== Purchase Orders =====

/// GET /api/purchase-orders/:lifnr
///
/// An empty result is still a success.
pub async fn get_purchase_orders(
    State(state): State<AppState>,
    Path(lifnr): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Value>> {
    let lifnr = require_identifier("lifnr", Some(&lifnr))?;
    let rows = fetch_vendor_rows(&state, EntitySet::PurchaseOrders, &lifnr).await?;

    if rows.is_empty() {
        info!(lifnr = %lifnr, "No purchase orders returned by SAP");
        return Ok(Json(json!({
            "success": true,
            "data": [],
            "message": format!("No PO data found for {}.", lifnr),
        })));
    }

    let rows = query.apply(EntitySet::PurchaseOrders, rows)?;
    Ok(Json(json!({
        "success": true,
        "data": rows,
        "message": format!("PO data for {} retrieved.", lifnr),
    })))
}

// ===== Goods Receipts =====

#[derive(Debug, Default, Deserialize)]
pub struct GoodsReceiptQuery {
    pub lifnr: Option<String>,
    #[serde(flatten)]
    pub list: ListQuery,
}

/// Reject vendors other than the configured one, comparing canonical forms.
pub fn check_goods_receipt_access(access: &AccessConfig, vendor: &VendorId) -> PortalResult<()> {
    match &access.goods_receipt_vendor {
        Some(allowed) if !vendor.same_vendor(&VendorId::from(allowed.as_str())) => {
            Err(PortalError::not_found(
                "SAP data not found for this vendor ID. Access denied.",
            ))
        }
        _ => Ok(()),
    }
}

/// GET /api/goods-receipt?lifnr=
///
/// SAP only matches the zero-padded vendor key here, and an empty result is
/// reported as not found.
pub async fn get_goods_receipts(
    State(state): State<AppState>,
    Query(query): Query<GoodsReceiptQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let vendor = VendorId::new(require_identifier("lifnr", query.lifnr.as_deref())?);
    check_goods_receipt_access(&state.config.access, &vendor)?;

    let sap_key = vendor.sap_key();
    let rows = fetch_vendor_rows(&state, EntitySet::GoodsReceipts, &sap_key).await?;
    if rows.is_empty() {
        info!(lifnr = %sap_key, "No goods receipts returned by SAP");
        return Err(PortalError::not_found(
            "No goods receipts found for the specified vendor ID.",
        )
        .into());
    }

    Ok(Json(query.list.apply(EntitySet::GoodsReceipts, rows)?))
}
