//! Finance Handlers
//!
//! Invoices, invoice PDFs, payment aging and credit/debit memos. The list
//! endpoints return bare arrays and treat an empty result as success.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::{info, warn};
use vendor_portal_models::{odata, EntitySet, VendorId};
use vendor_portal_utils::{require_identifier, PortalError};

use super::{fetch_vendor_rows, ListQuery};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

// ===== Invoices =====

/// GET /api/invoice/:lifnr
pub async fn get_invoices(
    State(state): State<AppState>,
    Path(lifnr): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let lifnr = require_identifier("lifnr", Some(&lifnr))?;
    let rows = fetch_vendor_rows(&state, EntitySet::Invoices, &lifnr).await?;
    Ok(Json(query.apply(EntitySet::Invoices, rows)?))
}

/// Decode the base64 `XPdf` payload. Undecodable data degrades to an empty
/// document.
pub fn decode_pdf(encoded: &str) -> Vec<u8> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "XPdf payload is not valid base64, sending an empty document");
            Vec::new()
        }
    }
}

/// GET /api/invoicepdf/:lifnr/:belnr
///
/// Both keys are zero-padded to the SAP key width before the lookup.
pub async fn get_invoice_pdf(
    State(state): State<AppState>,
    Path((lifnr, belnr)): Path<(String, String)>,
) -> ApiResult<Response> {
    let lifnr = VendorId::new(require_identifier("lifnr", Some(&lifnr))?).sap_key();
    let belnr = VendorId::new(require_identifier("belnr", Some(&belnr))?).sap_key();

    let path = format!(
        "{}?$format=json",
        odata::entity_path(
            EntitySet::InvoicePdf,
            &[("Lifnr", lifnr.as_str()), ("Belnr", belnr.as_str())],
        )
    );
    let rows = state.sap.fetch_rows(EntitySet::InvoicePdf, &path).await?;

    let Some(encoded) = rows
        .first()
        .and_then(|row| row.get("XPdf"))
        .and_then(Value::as_str)
    else {
        warn!(lifnr = %lifnr, belnr = %belnr, "SAP PDF response has no XPdf field");
        return Err(ApiError::from(PortalError::internal("Failed to retrieve PDF data"))
            .with_details(json!("XPdf field was missing in the SAP response.")));
    };

    let pdf = decode_pdf(encoded);
    info!(belnr = %belnr, bytes = pdf.len(), "Invoice PDF retrieved");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"invoice_{}.pdf\"", belnr),
            ),
        ],
        pdf,
    )
        .into_response())
}

// ===== Payment Aging =====

/// GET /api/payage/aging/:lifnr
pub async fn get_payment_aging(
    State(state): State<AppState>,
    Path(lifnr): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let lifnr = require_identifier("lifnr", Some(&lifnr))?;
    let rows = fetch_vendor_rows(&state, EntitySet::PaymentAging, &lifnr).await?;
    Ok(Json(query.apply(EntitySet::PaymentAging, rows)?))
}

// ===== Credit / Debit Memos =====

/// GET /api/memo/:lifnr
pub async fn get_vendor_memos(
    State(state): State<AppState>,
    Path(lifnr): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let lifnr = require_identifier("lifnr", Some(&lifnr))?;
    let rows = fetch_vendor_rows(&state, EntitySet::Memos, &lifnr).await?;
    Ok(Json(query.apply(EntitySet::Memos, rows)?))
}

/// GET /api/memo
pub async fn get_all_memos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let path = odata::collection_path(EntitySet::Memos, None);
    let rows = state.sap.fetch_rows(EntitySet::Memos, &path).await?;
    Ok(Json(query.apply(EntitySet::Memos, rows)?))
}
