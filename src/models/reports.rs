// src/models/reports.rs

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    crm::Client,
    dashboard::{DailySales, DashboardSnapshot},
    inventory::Part,
};

// --- Vendas por período ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesByPeriodReport {
    #[schema(value_type = String, format = Date)]
    pub start: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end: NaiveDate,
    pub daily_totals: Vec<DailySales>,
    // Sempre igual à soma de `daily_totals`
    pub grand_total: Decimal,
}

// --- Produtividade ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProductivityEntry {
    pub employee_id: i64,
    pub employee_name: String,
    pub completed_count: i64,
    pub active_count: i64,
    pub revenue_generated: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProductivityReport {
    // Primeiro e último dia civil cobertos pelo período
    #[schema(value_type = String, format = Date)]
    pub start: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end: NaiveDate,
    pub entries: Vec<EmployeeProductivityEntry>,
}

// --- Ordens por situação (todas as ordens, sem filtro) ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub delivered: i64,
    pub cancelled: i64,
}

// --- Clientes frequentes ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequentClientEntry {
    pub client: Client,
    pub total_orders: i64,
    pub last_visit_date: Option<NaiveDateTime>,
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequentClientsReport {
    pub limit: i64,
    pub entries: Vec<FrequentClientEntry>,
}

// --- Documento entregue ao renderizador ---

/// Um dos seis formatos de resultado, com os parâmetros do relatório.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportDocument {
    Dashboard(DashboardSnapshot),
    SalesByPeriod(SalesByPeriodReport),
    CriticalInventory { generated_at: NaiveDateTime, parts: Vec<Part> },
    EmployeeProductivity(EmployeeProductivityReport),
    OrdersByStatus { generated_at: NaiveDateTime, counts: OrderStatusCounts },
    FrequentClients { generated_at: NaiveDateTime, report: FrequentClientsReport },
}

impl ReportDocument {
    pub fn title(&self) -> &'static str {
        match self {
            ReportDocument::Dashboard(_) => "Resumo Operacional",
            ReportDocument::SalesByPeriod(_) => "Relatório de Vendas por Período",
            ReportDocument::CriticalInventory { .. } => "Relatório de Estoque Crítico",
            ReportDocument::EmployeeProductivity(_) => "Relatório de Produtividade dos Funcionários",
            ReportDocument::OrdersByStatus { .. } => "Ordens de Serviço por Situação",
            ReportDocument::FrequentClients { .. } => "Relatório de Clientes Frequentes",
        }
    }

    /// Nome do anexo: tipo do relatório + período (ou data de geração).
    pub fn file_name(&self) -> String {
        let fmt = |d: NaiveDate| d.format("%Y%m%d").to_string();
        match self {
            ReportDocument::Dashboard(s) => format!("dashboard_{}.pdf", fmt(s.as_of.date())),
            ReportDocument::SalesByPeriod(r) => format!("sales_{}_{}.pdf", fmt(r.start), fmt(r.end)),
            ReportDocument::CriticalInventory { generated_at, .. } => {
                format!("inventory_{}.pdf", fmt(generated_at.date()))
            }
            ReportDocument::EmployeeProductivity(r) => {
                format!("productivity_{}_{}.pdf", fmt(r.start), fmt(r.end))
            }
            ReportDocument::OrdersByStatus { generated_at, .. } => {
                format!("orders_by_status_{}.pdf", fmt(generated_at.date()))
            }
            ReportDocument::FrequentClients { generated_at, .. } => {
                format!("frequent_clients_{}.pdf", fmt(generated_at.date()))
            }
        }
    }
}
