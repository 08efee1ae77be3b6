// src/models/dashboard.rs

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Snapshot completo (Cards + Gráficos)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub as_of: NaiveDateTime,

    // Cadastros ativos
    pub total_clients: i64,
    pub total_vehicles: i64,
    pub total_employees: i64,

    // Ordens de serviço ativas
    pub orders_today: i64,
    pub pending_orders: i64,
    pub in_progress_orders: i64,

    // Faturas pagas
    pub revenue_this_month: Decimal,
    pub revenue_last_month: Decimal,
    #[schema(example = "12.5")]
    pub revenue_growth: Decimal, // Percentual, 0 quando o mês anterior não tem receita

    pub low_stock_parts: i64,

    pub sales_last_7_days: Vec<DailySales>,
    pub mechanic_workloads: Vec<MechanicWorkload>,
    pub critical_parts: Vec<CriticalPartEntry>,
}

// 2. Total diário de faturas pagas (gráfico do dashboard e relatório de vendas)
// Dias sem fatura paga não aparecem na série.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    #[schema(value_type = String, format = Date, example = "2026-10-17")]
    pub date: NaiveDate,
    pub total: Decimal,
}

// 3. Carga de trabalho dos mecânicos ativos
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MechanicWorkload {
    pub employee_id: i64,
    pub employee_name: String,
    pub active_orders: i64,
    pub completed_orders: i64,
}

// 4. Peças com menor estoque
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPartEntry {
    pub part_id: i64,
    pub code: String,
    pub name: String,
    pub current_stock: i32,
    pub minimum_stock: i32,
}
