// src/handlers/documents.rs

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{
        dashboard::AsOfQuery,
        reference_instant,
        reports::{FrequentClientsQuery, ProductivityQuery, SalesQuery},
    },
    models::reports::ReportDocument,
    services::RenderedReport,
};

// Headers para o navegador baixar ou mostrar o PDF
fn pdf_response(rendered: RenderedReport) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    (headers, rendered.bytes).into_response()
}

// genpdf lê as fontes do disco e diagrama de forma síncrona: roda fora das threads do runtime
async fn render(app_state: &AppState, document: ReportDocument) -> Result<Response, AppError> {
    let document_service = app_state.document_service.clone();
    let rendered = tokio::task::spawn_blocking(move || document_service.render(&document))
        .await
        .map_err(|e| AppError::RenderError(format!("Tarefa de renderização interrompida: {}", e)))??;

    Ok(pdf_response(rendered))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/pdf",
    tag = "Documents",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Resumo operacional em PDF"),
        (status = 500, description = "Falha ao gerar o documento")
    )
)]
pub async fn dashboard_pdf(
    State(app_state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Response, AppError> {
    let snapshot = app_state
        .metrics_service
        .compute_dashboard(reference_instant(query.as_of))
        .await?;

    render(&app_state, ReportDocument::Dashboard(snapshot)).await
}

#[utoipa::path(
    get,
    path = "/api/reports/sales/pdf",
    tag = "Documents",
    params(SalesQuery),
    responses(
        (status = 200, description = "Vendas por período em PDF"),
        (status = 400, description = "Data inicial posterior à final")
    )
)]
pub async fn sales_pdf(
    State(app_state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<Response, AppError> {
    let report = app_state.report_service.sales_by_period(query.start, query.end).await?;
    render(&app_state, ReportDocument::SalesByPeriod(report)).await
}

#[utoipa::path(
    get,
    path = "/api/reports/inventory/critical/pdf",
    tag = "Documents",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Estoque crítico em PDF")
    )
)]
pub async fn critical_inventory_pdf(
    State(app_state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Response, AppError> {
    let parts = app_state.report_service.critical_inventory().await?;
    render(&app_state, ReportDocument::CriticalInventory {
        generated_at: reference_instant(query.as_of),
        parts,
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/reports/employees/productivity/pdf",
    tag = "Documents",
    params(ProductivityQuery),
    responses(
        (status = 200, description = "Produtividade em PDF"),
        (status = 400, description = "Período inválido")
    )
)]
pub async fn productivity_pdf(
    State(app_state): State<AppState>,
    Query(query): Query<ProductivityQuery>,
) -> Result<Response, AppError> {
    let report = app_state
        .report_service
        .employee_productivity(query.start, query.end, reference_instant(query.as_of))
        .await?;
    render(&app_state, ReportDocument::EmployeeProductivity(report)).await
}

#[utoipa::path(
    get,
    path = "/api/reports/orders/status/pdf",
    tag = "Documents",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Ordens por situação em PDF")
    )
)]
pub async fn orders_by_status_pdf(
    State(app_state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Response, AppError> {
    let counts = app_state.report_service.orders_by_status().await?;
    render(&app_state, ReportDocument::OrdersByStatus {
        generated_at: reference_instant(query.as_of),
        counts,
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/reports/clients/frequent/pdf",
    tag = "Documents",
    params(FrequentClientsQuery),
    responses(
        (status = 200, description = "Clientes frequentes em PDF"),
        (status = 400, description = "Limite inválido")
    )
)]
pub async fn frequent_clients_pdf(
    State(app_state): State<AppState>,
    Query(query): Query<FrequentClientsQuery>,
) -> Result<Response, AppError> {
    query.validate()?;

    let report = app_state.report_service.frequent_clients(query.limit).await?;
    render(&app_state, ReportDocument::FrequentClients {
        generated_at: reference_instant(query.as_of),
        report,
    })
    .await
}
