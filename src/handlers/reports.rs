// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::reference_instant,
    models::{
        inventory::Part,
        reports::{EmployeeProductivityReport, FrequentClientsReport, OrderStatusCounts, SalesByPeriodReport},
    },
    services::report_service::DEFAULT_FREQUENT_CLIENTS_LIMIT,
};

// ---
// Parâmetros de consulta
// ---

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SalesQuery {
    /// Primeiro dia (inclusivo)
    #[param(value_type = String, format = Date, example = "2026-10-01")]
    pub start: NaiveDate,
    /// Último dia (inclusivo)
    #[param(value_type = String, format = Date, example = "2026-10-31")]
    pub end: NaiveDate,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductivityQuery {
    /// Padrão: 30 dias antes de `asOf`
    #[param(value_type = Option<String>, format = Date)]
    pub start: Option<NaiveDate>,
    /// Padrão: até `asOf`
    #[param(value_type = Option<String>, format = Date)]
    pub end: Option<NaiveDate>,
    #[param(value_type = Option<String>, example = "2026-10-17T18:00:00")]
    pub as_of: Option<NaiveDateTime>,
}

fn default_limit() -> i64 {
    DEFAULT_FREQUENT_CLIENTS_LIMIT
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FrequentClientsQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "O limite deve ser maior que zero."))]
    #[param(minimum = 1, default = 20)]
    pub limit: i64,
    /// Data de geração do PDF (padrão: agora)
    #[param(value_type = Option<String>, example = "2026-10-17T18:00:00")]
    pub as_of: Option<NaiveDateTime>,
}

// ---
// Handlers
// ---

// GET /api/reports/sales
#[utoipa::path(
    get,
    path = "/api/reports/sales",
    tag = "Reports",
    params(SalesQuery),
    responses(
        (status = 200, description = "Faturas pagas por dia no período", body = SalesByPeriodReport),
        (status = 400, description = "Data inicial posterior à final")
    )
)]
pub async fn sales_by_period(
    State(app_state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.report_service.sales_by_period(query.start, query.end).await?;
    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/inventory/critical
#[utoipa::path(
    get,
    path = "/api/reports/inventory/critical",
    tag = "Reports",
    responses(
        (status = 200, description = "Peças no estoque mínimo ou abaixo (ativas ou não)", body = Vec<Part>)
    )
)]
pub async fn critical_inventory(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let parts = app_state.report_service.critical_inventory().await?;
    Ok((StatusCode::OK, Json(parts)))
}

// GET /api/reports/employees/productivity
#[utoipa::path(
    get,
    path = "/api/reports/employees/productivity",
    tag = "Reports",
    params(ProductivityQuery),
    responses(
        (status = 200, description = "Produtividade de todos os funcionários", body = EmployeeProductivityReport),
        (status = 400, description = "Período inválido")
    )
)]
pub async fn employee_productivity(
    State(app_state): State<AppState>,
    Query(query): Query<ProductivityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .report_service
        .employee_productivity(query.start, query.end, reference_instant(query.as_of))
        .await?;
    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/orders/status
#[utoipa::path(
    get,
    path = "/api/reports/orders/status",
    tag = "Reports",
    responses(
        (status = 200, description = "Total de ordens por situação", body = OrderStatusCounts)
    )
)]
pub async fn orders_by_status(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let counts = app_state.report_service.orders_by_status().await?;
    Ok((StatusCode::OK, Json(counts)))
}

// GET /api/reports/clients/frequent
#[utoipa::path(
    get,
    path = "/api/reports/clients/frequent",
    tag = "Reports",
    params(FrequentClientsQuery),
    responses(
        (status = 200, description = "Clientes com mais ordens de serviço", body = FrequentClientsReport),
        (status = 400, description = "Limite inválido")
    )
)]
pub async fn frequent_clients(
    State(app_state): State<AppState>,
    Query(query): Query<FrequentClientsQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let report = app_state.report_service.frequent_clients(query.limit).await?;
    Ok((StatusCode::OK, Json(report)))
}
