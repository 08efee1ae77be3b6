// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Tipo de erro único da aplicação, com `thiserror` para a ergonomia do `?`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Período invertido, limite não positivo... Detectado antes de qualquer consulta.
    #[error("Parâmetros inválidos: {0}")]
    InvalidParameters(String),

    // Falha de acesso aos dados (banco fora do ar, timeout do pool, consulta cancelada).
    // Nunca deve ser convertida em "zero resultados".
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Falha ao gerar o documento: {0}")]
    RenderError(String),

    // `anyhow::Error` captura o contexto de qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidParameters(message.into())
    }

    pub fn is_data_access(&self) -> bool {
        matches!(self, AppError::DatabaseError(_))
    }

    pub fn is_render_failure(&self) -> bool {
        matches!(self, AppError::FontNotFound(_) | AppError::RenderError(_))
    }

    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, AppError::InvalidParameters(_) | AppError::ValidationError(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolve os detalhes da validação campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais parâmetros são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidParameters(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::DatabaseError(ref e) => {
                tracing::error!("Falha de acesso aos dados: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "Não foi possível consultar os dados. Tente novamente.")
            }
            AppError::FontNotFound(ref e) | AppError::RenderError(ref e) => {
                tracing::error!("Falha ao renderizar relatório: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Não foi possível gerar o documento do relatório.")
            }
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
