// tests/reports_api.rs
//
// Exercita o Router completo sobre o InMemoryStore, sem abrir socket.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use taller_backend::{
    config::AppState,
    db::{Dataset, InMemoryStore},
    models::{
        crm::Client,
        finance::{Invoice, InvoiceStatus},
        inventory::Part,
        operations::{WorkOrder, WorkOrderStatus},
        staff::{Employee, EmployeeRole},
    },
    routes,
    services::PdfRenderer,
};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
}

fn client(id: i64) -> Client {
    Client {
        id,
        first_name: format!("Cliente{id}"),
        last_name: "Teste".into(),
        document_id: None,
        phone: None,
        email: None,
        address: None,
        is_active: true,
        created_at: at(2026, 1, 1, 8),
    }
}

fn order(id: i64, client_id: i64, employee: Option<i64>, status: WorkOrderStatus, intake: NaiveDateTime, total: i64) -> WorkOrder {
    WorkOrder {
        id,
        client_id,
        vehicle_id: 1,
        assigned_employee_id: employee,
        status,
        intake_date: intake,
        total_amount: Decimal::from(total),
        is_active: true,
    }
}

fn paid(id: i64, issued_at: NaiveDateTime, total: i64) -> Invoice {
    Invoice {
        id,
        work_order_id: None,
        status: InvoiceStatus::Paid,
        issued_at,
        total_amount: Decimal::from(total),
    }
}

fn part(id: i64, stock: i32, minimum: i32, active: bool) -> Part {
    Part {
        id,
        code: format!("P{id:03}"),
        name: format!("Peça {id}"),
        brand: None,
        unit_cost: Decimal::from(5),
        unit_price: Decimal::from(8),
        current_stock: stock,
        minimum_stock: minimum,
        maximum_stock: 10,
        is_active: active,
    }
}

fn workshop() -> Dataset {
    Dataset {
        clients: vec![client(1), client(2)],
        vehicles: Vec::new(),
        employees: vec![Employee {
            id: 1,
            first_name: "Pedro".into(),
            last_name: "Martínez".into(),
            document_id: None,
            role: EmployeeRole::Mechanic,
            specialty: Some("Motor".into()),
            hourly_rate: Decimal::from(15),
            commission_pct: Decimal::ZERO,
            is_active: true,
        }],
        work_orders: vec![
            order(1, 1, Some(1), WorkOrderStatus::Completed, at(2026, 10, 16, 9), 100),
            order(2, 1, None, WorkOrderStatus::Pending, at(2026, 10, 17, 9), 50),
            order(3, 2, Some(1), WorkOrderStatus::InProgress, at(2026, 10, 10, 9), 70),
        ],
        invoices: vec![
            paid(1, at(2026, 10, 2, 10), 120),
            paid(2, at(2026, 10, 2, 16), 30),
            paid(3, at(2026, 10, 5, 10), 50),
        ],
        parts: vec![part(1, 4, 5, true), part(2, 3, 5, false), part(3, 9, 5, true)],
    }
}

fn app_with_fonts(fonts_dir: &str, family: &str) -> Router {
    let store = Arc::new(InMemoryStore::with_dataset(workshop()));
    let renderer = Arc::new(PdfRenderer::new(fonts_dir, family, "Oficina Teste"));
    routes::router(AppState::new(store, renderer))
}

fn app() -> Router {
    app_with_fonts("./fonts-inexistentes", "Roboto")
}

const FIXTURE_FONTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fonts");

async fn send(router: Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, headers, body)
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
    let (status, headers, body) = send(app(), uri).await;
    (status, body, header_value(&headers, header::CONTENT_TYPE))
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_check_responds_ok() {
    let (status, body, _) = get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn dashboard_uses_the_pinned_reference_instant() {
    let (status, json) = get_json("/api/dashboard?asOf=2026-10-17T18:00:00").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ordersToday"], 1);
    assert_eq!(json["pendingOrders"], 1);
    assert_eq!(json["inProgressOrders"], 1);
    assert_eq!(json["totalClients"], 2);
    assert_eq!(json["lowStockParts"], 1);
    assert_eq!(json["revenueThisMonth"].as_f64(), Some(200.0));
    assert_eq!(json["revenueGrowth"].as_f64(), Some(0.0));
    assert_eq!(json["mechanicWorkloads"][0]["employeeName"], "Pedro Martínez");
    assert_eq!(json["mechanicWorkloads"][0]["activeOrders"], 1);
    assert_eq!(json["mechanicWorkloads"][0]["completedOrders"], 1);
}

#[tokio::test]
async fn sales_report_groups_paid_invoices_by_day() {
    let (status, json) = get_json("/api/reports/sales?start=2026-10-01&end=2026-10-31").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["dailyTotals"][0]["date"], "2026-10-02");
    assert_eq!(json["dailyTotals"][0]["total"].as_f64(), Some(150.0));
    assert_eq!(json["dailyTotals"][1]["date"], "2026-10-05");
    assert_eq!(json["grandTotal"].as_f64(), Some(200.0));
}

#[tokio::test]
async fn sales_report_rejects_inverted_range() {
    let (status, json) = get_json("/api/reports/sales?start=2026-10-31&end=2026-10-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("2026-10-31"));
}

#[tokio::test]
async fn critical_inventory_lists_inactive_parts_too() {
    let (status, json) = get_json("/api/reports/inventory/critical").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = json.as_array().unwrap().iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn productivity_report_includes_current_load() {
    let (status, json) = get_json(
        "/api/reports/employees/productivity?start=2026-10-01&end=2026-10-31&asOf=2026-10-17T18:00:00",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["start"], "2026-10-01");
    assert_eq!(json["entries"][0]["completedCount"], 1);
    assert_eq!(json["entries"][0]["activeCount"], 1);
    assert_eq!(json["entries"][0]["revenueGenerated"].as_f64(), Some(100.0));
}

#[tokio::test]
async fn orders_by_status_uses_camel_case_partitions() {
    let (status, json) = get_json("/api/reports/orders/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pending"], 1);
    assert_eq!(json["inProgress"], 1);
    assert_eq!(json["completed"], 1);
    assert_eq!(json["delivered"], 0);
    assert_eq!(json["cancelled"], 0);
}

#[tokio::test]
async fn frequent_clients_defaults_to_twenty() {
    let (status, json) = get_json("/api/reports/clients/frequent").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["limit"], 20);
    assert_eq!(json["entries"][0]["client"]["id"], 1);
    assert_eq!(json["entries"][0]["totalOrders"], 2);
    assert_eq!(json["entries"][0]["totalSpent"].as_f64(), Some(100.0));
    assert_eq!(json["entries"][1]["client"]["id"], 2);
}

#[tokio::test]
async fn frequent_clients_rejects_zero_limit() {
    let (status, json) = get_json("/api/reports/clients/frequent?limit=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["details"]["limit"].is_array());
}

#[tokio::test]
async fn pdf_with_invalid_range_fails_before_rendering() {
    let (status, _, _) = get("/api/reports/sales/pdf?start=2026-10-31&end=2026-10-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pdf_render_failure_is_reported_as_server_error() {
    let (status, json) = get_json("/api/reports/orders/status/pdf").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn frequent_clients_pdf_is_dated_by_the_pinned_instant() {
    let router = app_with_fonts(FIXTURE_FONTS, "DejaVuSans");
    let (status, headers, body) =
        send(router, "/api/reports/clients/frequent/pdf?limit=5&asOf=2026-10-17T18:00:00").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(header_value(&headers, header::CONTENT_TYPE).as_deref(), Some("application/pdf"));
    let disposition = header_value(&headers, header::CONTENT_DISPOSITION).unwrap();
    assert!(disposition.contains("frequent_clients_20261017.pdf"), "{disposition}");
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn every_pdf_endpoint_renders_with_available_fonts() {
    let uris = [
        "/api/dashboard/pdf?asOf=2026-10-17T18:00:00",
        "/api/reports/sales/pdf?start=2026-10-01&end=2026-10-31",
        "/api/reports/sales/pdf?start=2020-01-01&end=2020-01-31",
        "/api/reports/inventory/critical/pdf",
        "/api/reports/employees/productivity/pdf?asOf=2026-10-17T18:00:00",
        "/api/reports/orders/status/pdf",
        "/api/reports/clients/frequent/pdf",
    ];

    for uri in uris {
        let (status, headers, body) = send(app_with_fonts(FIXTURE_FONTS, "DejaVuSans"), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(header_value(&headers, header::CONTENT_TYPE).as_deref(), Some("application/pdf"));
        assert!(body.starts_with(b"%PDF"), "{uri}");
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, json) = get_json("/api/docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/reports/sales"].is_object());
}
