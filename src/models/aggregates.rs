// src/models/aggregates.rs
//
// Linhas devolvidas pelas consultas agrupadas da camada de dados.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::models::{crm::Client, operations::WorkOrderStatus};

// Uma linha por funcionário, mesmo quando nenhuma ordem casa com o filtro (contagem 0, soma 0).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EmployeeOrderTotals {
    pub employee_id: i64,
    pub employee_name: String,
    pub order_count: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ClientOrderStats {
    #[sqlx(flatten)]
    pub client: Client,
    pub total_orders: i64,
    pub last_visit: Option<NaiveDateTime>,
    // Soma apenas das ordens concluídas
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct StatusCount {
    pub status: WorkOrderStatus,
    pub count: i64,
}
