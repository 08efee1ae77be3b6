// src/routes.rs

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn router(app_state: AppState) -> Router {
    let report_routes = Router::new()
        .route("/sales", get(handlers::reports::sales_by_period))
        .route("/sales/pdf", get(handlers::documents::sales_pdf))
        .route("/inventory/critical", get(handlers::reports::critical_inventory))
        .route("/inventory/critical/pdf", get(handlers::documents::critical_inventory_pdf))
        .route("/employees/productivity", get(handlers::reports::employee_productivity))
        .route("/employees/productivity/pdf", get(handlers::documents::productivity_pdf))
        .route("/orders/status", get(handlers::reports::orders_by_status))
        .route("/orders/status/pdf", get(handlers::documents::orders_by_status_pdf))
        .route("/clients/frequent", get(handlers::reports::frequent_clients))
        .route("/clients/frequent/pdf", get(handlers::documents::frequent_clients_pdf));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/dashboard/pdf", get(handlers::documents::dashboard_pdf))
        .nest("/api/reports", report_routes)
        .with_state(app_state)
}
