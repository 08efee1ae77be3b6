// src/db/memory_store.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::{
    common::{aggregation::sum_decimals, error::AppError},
    db::{
        filters::{EmployeeFilter, InvoiceFilter, PartFilter, WorkOrderFilter},
        store::WorkshopStore,
    },
    models::{
        aggregates::{ClientOrderStats, EmployeeOrderTotals, StatusCount},
        crm::{Client, Vehicle},
        dashboard::DailySales,
        finance::Invoice,
        inventory::Part,
        operations::{WorkOrder, WorkOrderStatus},
        staff::Employee,
    },
};

/// Conteúdo do store em memória. A ordem dos vetores é a ordem de inserção (catálogo).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub clients: Vec<Client>,
    pub vehicles: Vec<Vehicle>,
    pub employees: Vec<Employee>,
    pub work_orders: Vec<WorkOrder>,
    pub invoices: Vec<Invoice>,
    pub parts: Vec<Part>,
}

/// Implementação em processo da camada de consulta (testes e demonstrações locais).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<Dataset>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self { data: RwLock::new(dataset) }
    }

    pub async fn insert_client(&self, client: Client) {
        self.data.write().await.clients.push(client);
    }

    pub async fn insert_vehicle(&self, vehicle: Vehicle) {
        self.data.write().await.vehicles.push(vehicle);
    }

    pub async fn insert_employee(&self, employee: Employee) {
        self.data.write().await.employees.push(employee);
    }

    pub async fn insert_work_order(&self, order: WorkOrder) {
        self.data.write().await.work_orders.push(order);
    }

    pub async fn insert_invoice(&self, invoice: Invoice) {
        self.data.write().await.invoices.push(invoice);
    }

    pub async fn insert_part(&self, part: Part) {
        self.data.write().await.parts.push(part);
    }

    /// Exclusão lógica (ou reativação) de uma peça. Devolve `false` se o id não existe.
    pub async fn set_part_active(&self, part_id: i64, active: bool) -> bool {
        let mut data = self.data.write().await;
        match data.parts.iter_mut().find(|p| p.id == part_id) {
            Some(part) => {
                part.is_active = active;
                true
            }
            None => false,
        }
    }
}

fn count_where<T>(items: &[T], keep: impl Fn(&T) -> bool) -> i64 {
    items.iter().filter(|item| keep(item)).count() as i64
}

#[async_trait]
impl WorkshopStore for InMemoryStore {
    async fn count_clients(&self, active: Option<bool>) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(count_where(&data.clients, |c| active.is_none_or(|a| c.is_active == a)))
    }

    async fn count_vehicles(&self, active: Option<bool>) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(count_where(&data.vehicles, |v| active.is_none_or(|a| v.is_active == a)))
    }

    async fn count_employees(&self, filter: &EmployeeFilter) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(count_where(&data.employees, |e| filter.matches(e)))
    }

    async fn count_work_orders(&self, filter: &WorkOrderFilter) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(count_where(&data.work_orders, |o| filter.matches(o)))
    }

    async fn count_work_orders_by_status(
        &self,
        filter: &WorkOrderFilter,
    ) -> Result<Vec<StatusCount>, AppError> {
        let data = self.data.read().await;
        let mut counts: BTreeMap<WorkOrderStatus, i64> = BTreeMap::new();
        for order in data.work_orders.iter().filter(|o| filter.matches(o)) {
            *counts.entry(order.status).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }

    async fn sum_invoices(&self, filter: &InvoiceFilter) -> Result<Decimal, AppError> {
        let data = self.data.read().await;
        Ok(sum_decimals(
            data.invoices.iter().filter(|i| filter.matches(i)).map(|i| i.total_amount),
        ))
    }

    async fn sum_invoices_by_day(&self, filter: &InvoiceFilter) -> Result<Vec<DailySales>, AppError> {
        let data = self.data.read().await;
        let mut by_day = BTreeMap::new();
        for invoice in data.invoices.iter().filter(|i| filter.matches(i)) {
            *by_day.entry(invoice.issued_at.date()).or_insert(Decimal::ZERO) += invoice.total_amount;
        }
        Ok(by_day
            .into_iter()
            .map(|(date, total)| DailySales { date, total })
            .collect())
    }

    async fn count_parts(&self, filter: &PartFilter) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(count_where(&data.parts, |p| filter.matches(p)))
    }

    async fn list_parts_by_stock(
        &self,
        filter: &PartFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Part>, AppError> {
        let data = self.data.read().await;
        let mut parts: Vec<Part> = data.parts.iter().filter(|p| filter.matches(p)).cloned().collect();
        // sort_by_key é estável: empates ficam na ordem do catálogo
        parts.sort_by_key(|p| p.current_stock);
        if let Some(limit) = limit {
            parts.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(parts)
    }

    async fn work_order_totals_by_employee(
        &self,
        employees: &EmployeeFilter,
        orders: &WorkOrderFilter,
    ) -> Result<Vec<EmployeeOrderTotals>, AppError> {
        let data = self.data.read().await;
        let mut rows: Vec<EmployeeOrderTotals> = data
            .employees
            .iter()
            .filter(|e| employees.matches(e))
            .map(|employee| {
                let assigned: Vec<&WorkOrder> = data
                    .work_orders
                    .iter()
                    .filter(|o| o.assigned_employee_id == Some(employee.id) && orders.matches(o))
                    .collect();
                EmployeeOrderTotals {
                    employee_id: employee.id,
                    employee_name: employee.full_name(),
                    order_count: assigned.len() as i64,
                    total_amount: sum_decimals(assigned.iter().map(|o| o.total_amount)),
                }
            })
            .collect();
        rows.sort_by_key(|r| r.employee_id);
        Ok(rows)
    }

    async fn work_order_stats_by_client(&self) -> Result<Vec<ClientOrderStats>, AppError> {
        let data = self.data.read().await;
        let mut rows: Vec<ClientOrderStats> = data
            .clients
            .iter()
            .map(|client| {
                let orders: Vec<&WorkOrder> =
                    data.work_orders.iter().filter(|o| o.client_id == client.id).collect();
                ClientOrderStats {
                    client: client.clone(),
                    total_orders: orders.len() as i64,
                    last_visit: orders.iter().map(|o| o.intake_date).max(),
                    total_spent: sum_decimals(
                        orders
                            .iter()
                            .filter(|o| o.status == WorkOrderStatus::Completed)
                            .map(|o| o.total_amount),
                    ),
                }
            })
            .collect();
        rows.sort_by_key(|r| r.client.id);
        Ok(rows)
    }
}
