// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::reference_instant,
    // Importamos os models para referenciar no Swagger
    models::dashboard::DashboardSnapshot,
};

/// Fixa o instante de referência (padrão: agora).
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AsOfQuery {
    #[param(value_type = Option<String>, example = "2026-10-17T18:00:00")]
    pub as_of: Option<NaiveDateTime>,
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Indicadores operacionais no instante de referência", body = DashboardSnapshot),
        (status = 503, description = "Camada de dados indisponível")
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state
        .metrics_service
        .compute_dashboard(reference_instant(query.as_of))
        .await?;

    Ok((StatusCode::OK, Json(snapshot)))
}
