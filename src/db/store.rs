// src/db/store.rs

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::filters::{EmployeeFilter, InvoiceFilter, PartFilter, WorkOrderFilter},
    models::{
        aggregates::{ClientOrderStats, EmployeeOrderTotals, StatusCount},
        dashboard::DailySales,
        inventory::Part,
    },
};

/// Camada de consulta do domínio: contagens, somas e agrupamentos filtrados.
///
/// As agregações só leem. Qualquer falha (banco indisponível, timeout, consulta
/// cancelada) volta como `AppError::DatabaseError`; uma implementação nunca pode
/// responder "zero" no lugar de um erro.
#[async_trait]
pub trait WorkshopStore: Send + Sync {
    /// `active = None` conta todos os registros.
    async fn count_clients(&self, active: Option<bool>) -> Result<i64, AppError>;

    async fn count_vehicles(&self, active: Option<bool>) -> Result<i64, AppError>;

    async fn count_employees(&self, filter: &EmployeeFilter) -> Result<i64, AppError>;

    async fn count_work_orders(&self, filter: &WorkOrderFilter) -> Result<i64, AppError>;

    /// Contagem agrupada por situação. Situações sem ordens podem ser omitidas.
    async fn count_work_orders_by_status(
        &self,
        filter: &WorkOrderFilter,
    ) -> Result<Vec<StatusCount>, AppError>;

    /// Soma de `total_amount`; zero quando nenhuma fatura casa com o filtro.
    async fn sum_invoices(&self, filter: &InvoiceFilter) -> Result<Decimal, AppError>;

    /// Soma agrupada pelo dia civil da emissão, em ordem crescente de data.
    /// Só aparecem os dias com pelo menos uma fatura.
    async fn sum_invoices_by_day(&self, filter: &InvoiceFilter) -> Result<Vec<DailySales>, AppError>;

    async fn count_parts(&self, filter: &PartFilter) -> Result<i64, AppError>;

    /// Peças em ordem crescente de estoque atual; empates na ordem do catálogo (id).
    async fn list_parts_by_stock(
        &self,
        filter: &PartFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Part>, AppError>;

    /// Uma linha por funcionário que casa com `employees` (ordenado por id), com a
    /// contagem e a soma das ordens atribuídas a ele que casam com `orders`.
    async fn work_order_totals_by_employee(
        &self,
        employees: &EmployeeFilter,
        orders: &WorkOrderFilter,
    ) -> Result<Vec<EmployeeOrderTotals>, AppError>;

    /// Estatísticas de ordens por cliente, sem filtro de ativo. Clientes sem
    /// nenhuma ordem podem ser omitidos.
    async fn work_order_stats_by_client(&self) -> Result<Vec<ClientOrderStats>, AppError>;
}
