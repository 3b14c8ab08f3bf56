//! End-to-end tests of the gateway router against a mocked SAP service.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vendor_portal_gateway::{create_app, AppState};
use vendor_portal_utils::{AccessConfig, AppConfig, SapConfig, DEFAULT_SERVICE_PATH};
use wiremock::{
    matchers::{method, path, path_regex, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn set_path(set: &str) -> String {
    format!("{}/{}", DEFAULT_SERVICE_PATH, set)
}

fn app_for(base_url: &str, access: AccessConfig) -> Router {
    let config = AppConfig {
        sap: SapConfig {
            base_url: base_url.to_string(),
            ..SapConfig::default()
        },
        access,
        ..AppConfig::default()
    };
    create_app(AppState::new(config).unwrap())
}

fn app(server: &MockServer) -> Router {
    app_for(&server.uri(), AccessConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn results(rows: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "d": { "results": rows } }))
}

#[tokio::test]
async fn test_goods_receipts_use_padded_vendor_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_GOODSRECSet")))
        .and(query_param("$filter", "Lifnr eq '0000100000'"))
        .and(query_param("$format", "json"))
        .respond_with(results(json!([
            {"Mblnr": "5000000001", "Lifnr": "0000100000", "Budat": "/Date(1748822400000)/"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/goods-receipt?lifnr=100000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["Mblnr"], "5000000001");
}

#[tokio::test]
async fn test_empty_goods_receipts_are_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_GOODSRECSet")))
        .and(query_param("$filter", "Lifnr eq '0000100000'"))
        .respond_with(results(json!([])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/goods-receipt?lifnr=0000100000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(
        body["message"],
        "No goods receipts found for the specified vendor ID."
    );
}

#[tokio::test]
async fn test_goods_receipt_access_restriction() {
    let server = MockServer::start().await;
    let access = AccessConfig {
        goods_receipt_vendor: Some("100000".to_string()),
    };

    let (status, body) = get_json(
        app_for(&server.uri(), access),
        "/api/goods-receipt?lifnr=200000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "SAP data not found for this vendor ID. Access denied."
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_goods_receipt_vendor() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app(&server), "/api/goods-receipt?lifnr=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_IDENTIFIER");
}

#[tokio::test]
async fn test_empty_purchase_orders_are_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_POSet")))
        .and(query_param("$filter", "Lifnr eq '100000'"))
        .respond_with(results(json!([])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/purchase-orders/100000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], "No PO data found for 100000.");
}

#[tokio::test]
async fn test_upstream_error_message_is_relayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_POSet")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": "ZMM/001", "message": {"lang": "en", "value": "Vendor is blocked"}}
        })))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/purchase-orders/100000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert_eq!(body["message"], "SAP Error: Vendor is blocked");
}

#[tokio::test]
async fn test_unreachable_sap_is_internal_error() {
    let app = app_for("http://127.0.0.1:9", AccessConfig::default());
    let (status, body) = get_json(app, "/api/rfq/100000").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_UNREACHABLE");
}

#[tokio::test]
async fn test_invoice_list_search_and_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_INVOICESet")))
        .respond_with(results(json!([
            {"Belnr": "5105600002", "Bldat": "/Date(1748822400000)/", "Vgart": "RE"},
            {"Belnr": "5105600001", "Bldat": "/Date(1735689600000)/", "Vgart": "RE"},
            {"Belnr": "5105600003", "Bldat": "/Date(1751328000000)/", "Vgart": "WE"}
        ])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/invoice/100000?search=re&sort=Belnr").await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["Belnr"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["5105600001", "5105600002"]);

    let (status, body) = get_json(app(&server), "/api/invoice/100000?date_from=2025-13-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invoice_pdf_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"ZVEN_INVOICEPDFSet\(Lifnr='0000100000',Belnr='0000000042'\)$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"Lifnr": "0000100000", "Belnr": "0000000042", "XPdf": "JVBERi0xLjQ="}
        })))
        .mount(&server)
        .await;

    let request = Request::builder()
        .uri("/api/invoicepdf/100000/42")
        .body(Body::empty())
        .unwrap();
    let response = app(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"invoice_0000000042.pdf\""
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"%PDF-1.4");
}

#[tokio::test]
async fn test_invoice_pdf_without_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex("ZVEN_INVOICEPDFSet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"d": {"Belnr": "42"}})))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/invoicepdf/100000/42").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "XPdf field was missing in the SAP response.");
}

const LOGIN_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<entry xmlns="http://www.w3.org/2005/Atom"
       xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata"
       xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices">
  <content type="application/xml">
    <m:properties>
      <d:VendorId>100000</d:VendorId>
      <d:Status>{status}</d:Status>
      <d:Message>{message}</d:Message>
    </m:properties>
  </content>
</entry>"#;

async fn login_server(status: &str, message: &str) -> MockServer {
    let server = MockServer::start().await;
    let xml = LOGIN_XML
        .replace("{status}", status)
        .replace("{message}", message);
    Mock::given(method("GET"))
        .and(path_regex(r"ZLOGIN_AUTHSet\(VendorId='100000',VendorPwd='secret'\)$"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(xml, "application/atom+xml"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_login_success() {
    let server = login_server("SUCCESS", "Login successful").await;
    let (status, body) = post_json(
        app(&server),
        "/api/login",
        json!({"vendorId": "100000", "vendorPassword": "secret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["vendorId"], "100000");
    assert_eq!(body["data"]["message"], "Login successful");
}

#[tokio::test]
async fn test_login_rejected() {
    let server = login_server("FAILED", "Invalid password").await;
    let (status, body) = post_json(
        app(&server),
        "/api/login",
        json!({"vendorId": "100000", "vendorPassword": "secret"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid password");
    assert_eq!(body["error"], "SAP Status: FAILED");
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let server = MockServer::start().await;
    let (status, body) = post_json(app(&server), "/api/login", json!({"vendorId": "100000"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_IDENTIFIER");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_trims_vendor_and_rejects_blank_password() {
    let server = login_server("SUCCESS", "Login successful").await;
    let (status, body) = post_json(
        app(&server),
        "/api/login",
        json!({"vendorId": " 100000 ", "vendorPassword": "secret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vendorId"], "100000");

    let server = MockServer::start().await;
    let (status, body) = post_json(
        app(&server),
        "/api/login",
        json!({"vendorId": "100000", "vendorPassword": "   "}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_IDENTIFIER");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rfqs_wrapped_in_success_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_RFQSet")))
        .and(query_param("$filter", "Lifnr eq '100000'"))
        .and(query_param("$format", "json"))
        .respond_with(results(json!([
            {"Ebeln": "6000000001", "Lifnr": "100000", "Txz01": "Steel plate"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/rfq/100000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"][0]["Ebeln"], "6000000001");
}

#[tokio::test]
async fn test_empty_rfqs_are_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_RFQSet")))
        .respond_with(results(json!([])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/rfq/100000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));
}

#[tokio::test]
async fn test_finance_lists_are_bare_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_PAYAGESet")))
        .and(query_param("$filter", "Lifnr eq '100000'"))
        .respond_with(results(json!([
            {"Belnr": "5105600001", "Aging": "45", "Status": "Open"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(set_path("ZVEN_CDMEMOSet")))
        .and(query_param("$filter", "Lifnr eq '100000'"))
        .respond_with(results(json!([
            {"Belnr": "1700000001", "Shkzg": "H", "Dmbtr": "120.00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/payage/aging/100000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"Belnr": "5105600001", "Aging": "45", "Status": "Open"}]));

    let (status, body) = get_json(app(&server), "/api/memo/100000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["Belnr"], "1700000001");
}

#[tokio::test]
async fn test_empty_finance_lists_are_success() {
    let server = MockServer::start().await;
    for set in ["VEN_INVOICESet", "VEN_PAYAGESet", "ZVEN_CDMEMOSet"] {
        Mock::given(method("GET"))
            .and(path(set_path(set)))
            .respond_with(results(json!([])))
            .mount(&server)
            .await;
    }

    for uri in [
        "/api/invoice/100000",
        "/api/payage/aging/100000",
        "/api/memo/100000",
        "/api/memo",
    ] {
        let (status, body) = get_json(app(&server), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}

#[tokio::test]
async fn test_all_memos_are_unfiltered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("ZVEN_CDMEMOSet")))
        .and(query_param("$format", "json"))
        .respond_with(results(json!([
            {"Belnr": "1700000001", "Lifnr": "100000"},
            {"Belnr": "1700000002", "Lifnr": "200000"}
        ])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/memo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query_pairs()
        .all(|(key, _)| key != "$filter"));
}

#[tokio::test]
async fn test_profile_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"ZVEN_PROFILESet\(VendorId='100000'\)$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/profile/100000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_dashboard_reports_unavailable_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_GOODSRECSet")))
        .respond_with(results(json!([
            {"Mblnr": "5000000001", "Budat": "/Date(1748822400000)/"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(set_path("VEN_POSet")))
        .respond_with(results(json!([
            {"Ebeln": "4500000001", "Statu": "Open"},
            {"Ebeln": "4500000002", "Statu": "Open"}
        ])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/dashboard/100000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vendorId"], "100000");
    assert_eq!(body["counts"]["purchaseOrders"], 2);
    assert_eq!(body["counts"]["goodsReceipts"], 1);
    assert_eq!(body["monthlyReceipts"], json!([{"name": "Jun '25", "value": 1}]));
    assert_eq!(
        body["unavailable"],
        json!(["VEN_RFQSet", "VEN_INVOICESet", "VEN_PAYAGESet", "ZVEN_CDMEMOSet"])
    );
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-123");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(&server).oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[test]
fn test_app_state_builds_from_defaults() {
    let state = tokio_test::block_on(async { AppState::new(AppConfig::default()) });
    tokio_test::assert_ok!(state);
}
