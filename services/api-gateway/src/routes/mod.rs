use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/health/detailed", get(detailed_health_check))
        .route("/login", post(login))
        .route("/profile/:vendor_id", get(get_vendor_profile))
        .route("/rfq/:lifnr", get(get_rfqs))
        .route("/purchase-orders/:lifnr", get(get_purchase_orders))
        .route("/goods-receipt", get(get_goods_receipts))
        .route("/invoice/:lifnr", get(get_invoices))
        .route("/invoicepdf/:lifnr/:belnr", get(get_invoice_pdf))
        .route("/payage/aging/:lifnr", get(get_payment_aging))
        .route("/memo", get(get_all_memos))
        .route("/memo/:lifnr", get(get_vendor_memos))
        .route("/dashboard/:lifnr", get(get_dashboard_summary))
}
