//! Dashboard Handler
//!
//! Summary cards and chart series for one vendor, built from six concurrent
//! SAP reads. A read that fails leaves its section empty and is listed in
//! `unavailable`.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use tracing::warn;
use vendor_portal_models::{
    EntitySet, GoodsReceipt, Invoice, Memo, PaymentAging, PurchaseOrder, RfqLine, SapRecord,
    VendorId,
};
use vendor_portal_utils::listing::{DashboardSources, DashboardSummary};
use vendor_portal_utils::{require_identifier, PortalResult};

use super::fetch_vendor_rows;
use super::procurement::check_goods_receipt_access;
use crate::error::ApiResult;
use crate::AppState;

fn into_views<T>(
    set: EntitySet,
    result: PortalResult<Vec<Value>>,
    unavailable: &mut Vec<String>,
    view: fn(&SapRecord) -> T,
) -> Vec<T> {
    match result {
        Ok(rows) => rows
            .into_iter()
            .map(SapRecord::from_value)
            .map(|record| view(&record))
            .collect(),
        Err(e) => {
            warn!(entity_set = %set, error = %e, "Dashboard source unavailable");
            unavailable.push(set.name().to_string());
            Vec::new()
        }
    }
}

async fn fetch_goods_receipts(state: &AppState, vendor: &VendorId) -> PortalResult<Vec<Value>> {
    check_goods_receipt_access(&state.config.access, vendor)?;
    fetch_vendor_rows(state, EntitySet::GoodsReceipts, &vendor.sap_key()).await
}

/// GET /api/dashboard/:lifnr
pub async fn get_dashboard_summary(
    State(state): State<AppState>,
    Path(lifnr): Path<String>,
) -> ApiResult<Json<DashboardSummary>> {
    let lifnr = require_identifier("lifnr", Some(&lifnr))?;
    let vendor = VendorId::new(lifnr.clone());

    let (rfqs, purchase_orders, goods_receipts, invoices, payments, memos) = tokio::join!(
        fetch_vendor_rows(&state, EntitySet::Rfqs, &lifnr),
        fetch_vendor_rows(&state, EntitySet::PurchaseOrders, &lifnr),
        fetch_goods_receipts(&state, &vendor),
        fetch_vendor_rows(&state, EntitySet::Invoices, &lifnr),
        fetch_vendor_rows(&state, EntitySet::PaymentAging, &lifnr),
        fetch_vendor_rows(&state, EntitySet::Memos, &lifnr),
    );

    let mut unavailable = Vec::new();
    let rfqs = into_views(EntitySet::Rfqs, rfqs, &mut unavailable, RfqLine::from_record);
    let purchase_orders = into_views(
        EntitySet::PurchaseOrders,
        purchase_orders,
        &mut unavailable,
        PurchaseOrder::from_record,
    );
    let goods_receipts = into_views(
        EntitySet::GoodsReceipts,
        goods_receipts,
        &mut unavailable,
        GoodsReceipt::from_record,
    );
    let invoices = into_views(EntitySet::Invoices, invoices, &mut unavailable, Invoice::from_record);
    let payments = into_views(
        EntitySet::PaymentAging,
        payments,
        &mut unavailable,
        PaymentAging::from_record,
    );
    let memos = into_views(EntitySet::Memos, memos, &mut unavailable, Memo::from_record);

    let sources = DashboardSources {
        rfqs,
        purchase_orders,
        goods_receipts,
        invoices,
        payments,
        memos,
        unavailable,
    };
    Ok(Json(DashboardSummary::build(lifnr, sources)))
}
