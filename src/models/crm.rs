// src/models/crm.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Juan")]
    pub first_name: String,
    #[schema(example = "Pérez")]
    pub last_name: String,
    // Único entre os clientes ativos (garantido pelo índice parcial da migração)
    #[schema(example = "1234567890")]
    pub document_id: Option<String>,
    #[schema(example = "555-1234")]
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub client_id: i64,
    // Única entre os veículos ativos
    #[schema(example = "ABC-123")]
    pub plate: String,
    #[schema(example = "Toyota")]
    pub make: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 2018)]
    pub year: i32,
    pub color: Option<String>,
    #[schema(example = 75000)]
    pub odometer_km: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}
