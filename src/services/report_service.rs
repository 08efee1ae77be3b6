// src/services/report_service.rs

use std::{cmp::Reverse, sync::Arc};

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    common::{
        aggregation::{pair_employee_totals, sum_decimals, top_n_descending},
        error::AppError,
        time_window::{resolve_period, TimeWindow},
    },
    db::{
        filters::{EmployeeFilter, InvoiceFilter, PartFilter, WorkOrderFilter},
        WorkshopStore,
    },
    models::{
        inventory::Part,
        operations::WorkOrderStatus,
        reports::{
            EmployeeProductivityEntry, EmployeeProductivityReport, FrequentClientEntry,
            FrequentClientsReport, OrderStatusCounts, SalesByPeriodReport,
        },
    },
};

pub const DEFAULT_FREQUENT_CLIENTS_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn WorkshopStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn WorkshopStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    //  VENDAS POR PERÍODO
    // =========================================================================

    /// Faturas pagas agrupadas por dia de emissão, datas inclusivas.
    pub async fn sales_by_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SalesByPeriodReport, AppError> {
        // Período invertido falha aqui, antes de qualquer consulta
        let window = TimeWindow::dates(start, end)?;

        let daily_totals = self
            .store
            .sum_invoices_by_day(&InvoiceFilter::paid().issued_within(window))
            .await
            .inspect_err(|e| tracing::error!("Falha no relatório de vendas: {}", e))?;

        let grand_total = sum_decimals(daily_totals.iter().map(|d| d.total));

        tracing::info!(
            "Relatório de vendas {} a {}: {} dias com venda, total {}",
            start,
            end,
            daily_totals.len(),
            grand_total
        );

        Ok(SalesByPeriodReport { start, end, daily_totals, grand_total })
    }

    // =========================================================================
    //  ESTOQUE CRÍTICO
    // =========================================================================

    /// Todas as peças no mínimo ou abaixo dele, ativas ou não.
    /// O contador do dashboard considera só as ativas; aqui a lista é de manutenção.
    pub async fn critical_inventory(&self) -> Result<Vec<Part>, AppError> {
        let parts = self
            .store
            .list_parts_by_stock(&PartFilter::all().critical(), None)
            .await
            .inspect_err(|e| tracing::error!("Falha no relatório de estoque crítico: {}", e))?;

        tracing::info!("Estoque crítico: {} peças", parts.len());
        Ok(parts)
    }

    // =========================================================================
    //  PRODUTIVIDADE
    // =========================================================================

    /// Produtividade de todos os funcionários (qualquer cargo).
    ///
    /// Concluídas e receita respeitam o período; a carga atual (em andamento) não.
    pub async fn employee_productivity(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        as_of: NaiveDateTime,
    ) -> Result<EmployeeProductivityReport, AppError> {
        let window = resolve_period(start, end, as_of)?;

        let everyone = EmployeeFilter::all();
        let completed = WorkOrderFilter::all()
            .with_status(WorkOrderStatus::Completed)
            .intake_within(window);
        let in_progress = WorkOrderFilter::all().with_status(WorkOrderStatus::InProgress);

        let (completed_rows, active_rows) = tokio::try_join!(
            self.store.work_order_totals_by_employee(&everyone, &completed),
            self.store.work_order_totals_by_employee(&everyone, &in_progress),
        )
        .inspect_err(|e| tracing::error!("Falha no relatório de produtividade: {}", e))?;

        let entries: Vec<EmployeeProductivityEntry> = pair_employee_totals(completed_rows, active_rows)
            .into_iter()
            .map(|p| EmployeeProductivityEntry {
                employee_id: p.employee_id,
                employee_name: p.employee_name,
                completed_count: p.first_count,
                active_count: p.second_count,
                revenue_generated: p.first_total,
            })
            .collect();

        tracing::info!(
            "Produtividade {} a {}: {} funcionários",
            window.first_date(),
            window.last_date(),
            entries.len()
        );

        Ok(EmployeeProductivityReport {
            start: window.first_date(),
            end: window.last_date(),
            entries,
        })
    }

    // =========================================================================
    //  ORDENS POR SITUAÇÃO
    // =========================================================================

    /// Contagem de todas as ordens já registradas, por situação.
    pub async fn orders_by_status(&self) -> Result<OrderStatusCounts, AppError> {
        let rows = self
            .store
            .count_work_orders_by_status(&WorkOrderFilter::all())
            .await
            .inspect_err(|e| tracing::error!("Falha no relatório de ordens por situação: {}", e))?;

        let counts = rows.into_iter().fold(OrderStatusCounts::default(), |mut acc, row| {
            match row.status {
                WorkOrderStatus::Pending => acc.pending += row.count,
                WorkOrderStatus::InProgress => acc.in_progress += row.count,
                WorkOrderStatus::Completed => acc.completed += row.count,
                WorkOrderStatus::Delivered => acc.delivered += row.count,
                WorkOrderStatus::Cancelled => acc.cancelled += row.count,
            }
            acc
        });

        tracing::info!("Ordens por situação: {:?}", counts);
        Ok(counts)
    }

    // =========================================================================
    //  CLIENTES FREQUENTES
    // =========================================================================

    /// Ranking por número de ordens (decrescente). Empate: menor id primeiro.
    pub async fn frequent_clients(&self, limit: i64) -> Result<FrequentClientsReport, AppError> {
        if limit <= 0 {
            return Err(AppError::invalid(format!(
                "O limite deve ser positivo (recebido: {}).",
                limit
            )));
        }

        let stats = self
            .store
            .work_order_stats_by_client()
            .await
            .inspect_err(|e| tracing::error!("Falha no relatório de clientes frequentes: {}", e))?;

        let with_orders: Vec<_> = stats.into_iter().filter(|s| s.total_orders > 0).collect();
        let cut = usize::try_from(limit).unwrap_or(usize::MAX);

        let entries: Vec<FrequentClientEntry> =
            top_n_descending(with_orders, cut, |s| (s.total_orders, Reverse(s.client.id)))
                .into_iter()
                .map(|s| FrequentClientEntry {
                    client: s.client,
                    total_orders: s.total_orders,
                    last_visit_date: s.last_visit,
                    total_spent: s.total_spent,
                })
                .collect();

        tracing::info!("Clientes frequentes: {} de no máximo {}", entries.len(), limit);
        Ok(FrequentClientsReport { limit, entries })
    }
}
