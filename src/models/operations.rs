// src/models/operations.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "work_order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Pending,    // Aguardando início
    InProgress, // Em execução na oficina
    Completed,  // Serviço concluído
    Delivered,  // Veículo entregue ao cliente
    Cancelled,
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: i64,
    pub client_id: i64,
    pub vehicle_id: i64,
    pub assigned_employee_id: Option<i64>,
    pub status: WorkOrderStatus,
    pub intake_date: NaiveDateTime,
    // Nunca negativo (CHECK na migração)
    #[schema(example = "150.50")]
    pub total_amount: Decimal,
    pub is_active: bool,
}
