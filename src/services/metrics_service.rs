// src/services/metrics_service.rs

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
    common::{
        aggregation::{growth_percentage, pair_employee_totals},
        error::AppError,
        time_window::DashboardCalendar,
    },
    db::{
        filters::{EmployeeFilter, InvoiceFilter, PartFilter, WorkOrderFilter},
        WorkshopStore,
    },
    models::{
        dashboard::{CriticalPartEntry, DashboardSnapshot, MechanicWorkload},
        operations::WorkOrderStatus,
        staff::EmployeeRole,
    },
};

// Tamanho da lista de peças com menor estoque no dashboard
pub const CRITICAL_PARTS_SHORTLIST: i64 = 10;

#[derive(Clone)]
pub struct MetricsService {
    store: Arc<dyn WorkshopStore>,
}

impl MetricsService {
    pub fn new(store: Arc<dyn WorkshopStore>) -> Self {
        Self { store }
    }

    /// Snapshot operacional no instante `as_of`.
    ///
    /// As subconsultas são independentes e saem em paralelo. Se qualquer uma
    /// falhar o snapshot inteiro falha: nunca devolvemos um dashboard parcial.
    pub async fn compute_dashboard(&self, as_of: NaiveDateTime) -> Result<DashboardSnapshot, AppError> {
        let calendar = DashboardCalendar::from_as_of(as_of)?;
        let store = self.store.as_ref();

        // Filtros (todos restritos a registros ativos)
        let orders_today = WorkOrderFilter::all().active_only().intake_within(calendar.today);
        let pending = WorkOrderFilter::all().active_only().with_status(WorkOrderStatus::Pending);
        let in_progress = WorkOrderFilter::all().active_only().with_status(WorkOrderStatus::InProgress);
        let finished = WorkOrderFilter::all()
            .active_only()
            .with_status(WorkOrderStatus::Completed)
            .with_status(WorkOrderStatus::Delivered);

        let revenue_this_month = InvoiceFilter::paid().issued_within(calendar.month_to_date);
        let revenue_last_month = InvoiceFilter::paid().issued_within(calendar.previous_month);
        let trend = InvoiceFilter::paid().issued_within(calendar.trend);

        let active_employees = EmployeeFilter::all().active_only();
        let mechanics = EmployeeFilter::all().active_only().with_role(EmployeeRole::Mechanic);
        let low_stock = PartFilter::all().active_only().critical();
        let active_parts = PartFilter::all().active_only();

        let result = tokio::try_join!(
            store.count_clients(Some(true)),
            store.count_vehicles(Some(true)),
            store.count_employees(&active_employees),
            store.count_work_orders(&orders_today),
            store.count_work_orders(&pending),
            store.count_work_orders(&in_progress),
            store.sum_invoices(&revenue_this_month),
            store.sum_invoices(&revenue_last_month),
            store.count_parts(&low_stock),
            store.sum_invoices_by_day(&trend),
            store.work_order_totals_by_employee(&mechanics, &in_progress),
            store.work_order_totals_by_employee(&mechanics, &finished),
            store.list_parts_by_stock(&active_parts, Some(CRITICAL_PARTS_SHORTLIST)),
        );

        let (
            total_clients,
            total_vehicles,
            total_employees,
            orders_today,
            pending_orders,
            in_progress_orders,
            revenue_this_month,
            revenue_last_month,
            low_stock_parts,
            sales_last_7_days,
            active_load,
            completed,
            shortlist,
        ) = result.inspect_err(|e| tracing::error!("Falha ao montar o dashboard ({}): {}", as_of, e))?;

        let mechanic_workloads = pair_employee_totals(active_load, completed)
            .into_iter()
            .map(|p| MechanicWorkload {
                employee_id: p.employee_id,
                employee_name: p.employee_name,
                active_orders: p.first_count,
                completed_orders: p.second_count,
            })
            .collect();

        let critical_parts = shortlist
            .into_iter()
            .map(|part| CriticalPartEntry {
                part_id: part.id,
                code: part.code,
                name: part.name,
                current_stock: part.current_stock,
                minimum_stock: part.minimum_stock,
            })
            .collect();

        let snapshot = DashboardSnapshot {
            as_of,
            total_clients,
            total_vehicles,
            total_employees,
            orders_today,
            pending_orders,
            in_progress_orders,
            revenue_growth: growth_percentage(revenue_this_month, revenue_last_month),
            revenue_this_month,
            revenue_last_month,
            low_stock_parts,
            sales_last_7_days,
            mechanic_workloads,
            critical_parts,
        };

        tracing::info!(
            "📊 Dashboard em {}: {} ordens hoje, receita do mês {}",
            as_of,
            snapshot.orders_today,
            snapshot.revenue_this_month
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::InMemoryStore,
        models::finance::InvoiceStatus,
        services::fixtures::*,
    };
    use rust_decimal::Decimal;

    fn service(store: InMemoryStore) -> (Arc<InMemoryStore>, MetricsService) {
        let store = Arc::new(store);
        (store.clone(), MetricsService::new(store))
    }

    #[tokio::test]
    async fn empty_database_yields_all_zero_snapshot() {
        let (_, svc) = service(InMemoryStore::new());
        let snap = svc.compute_dashboard(at(2026, 10, 17, 10)).await.unwrap();

        assert_eq!(snap.total_clients, 0);
        assert_eq!(snap.total_vehicles, 0);
        assert_eq!(snap.total_employees, 0);
        assert_eq!(snap.orders_today, 0);
        assert_eq!(snap.pending_orders, 0);
        assert_eq!(snap.in_progress_orders, 0);
        assert_eq!(snap.revenue_this_month, Decimal::ZERO);
        assert_eq!(snap.revenue_last_month, Decimal::ZERO);
        assert_eq!(snap.revenue_growth, Decimal::ZERO);
        assert_eq!(snap.low_stock_parts, 0);
        assert!(snap.sales_last_7_days.is_empty());
        assert!(snap.mechanic_workloads.is_empty());
        assert!(snap.critical_parts.is_empty());
    }

    #[tokio::test]
    async fn orders_today_and_pending_follow_the_reference_instant() {
        // Dia D: ordem concluída (100). Dia D+1: ordem pendente (50). Nenhuma fatura.
        let store = InMemoryStore::new();
        store.insert_client(client(1, true)).await;
        store.insert_work_order(order(1, 1, None, WorkOrderStatus::Completed, at(2026, 10, 16, 9), 100)).await;
        store.insert_work_order(order(2, 1, None, WorkOrderStatus::Pending, at(2026, 10, 17, 9), 50)).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 18)).await.unwrap();

        assert_eq!(snap.orders_today, 1);
        assert_eq!(snap.pending_orders, 1);
        assert_eq!(snap.in_progress_orders, 0);
        assert_eq!(snap.revenue_this_month, Decimal::ZERO);
        assert_eq!(snap.revenue_last_month, Decimal::ZERO);
        assert_eq!(snap.revenue_growth, Decimal::ZERO);
    }

    #[tokio::test]
    async fn inactive_records_are_not_counted() {
        let store = InMemoryStore::new();
        store.insert_client(client(1, true)).await;
        store.insert_client(client(2, false)).await;
        store.insert_vehicle(vehicle(1, 1, true)).await;
        store.insert_vehicle(vehicle(2, 2, false)).await;
        store.insert_employee(employee(1, EmployeeRole::Receptionist, true)).await;
        store.insert_employee(employee(2, EmployeeRole::Mechanic, false)).await;
        let mut hidden = order(1, 1, None, WorkOrderStatus::Pending, at(2026, 10, 17, 9), 10);
        hidden.is_active = false;
        store.insert_work_order(hidden).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 18)).await.unwrap();

        assert_eq!(snap.total_clients, 1);
        assert_eq!(snap.total_vehicles, 1);
        assert_eq!(snap.total_employees, 1);
        assert_eq!(snap.orders_today, 0);
        assert_eq!(snap.pending_orders, 0);
        assert!(snap.mechanic_workloads.is_empty());
    }

    #[tokio::test]
    async fn revenue_counts_only_paid_invoices_per_month() {
        let store = InMemoryStore::new();
        // Mês anterior: 200 pagos
        store.insert_invoice(invoice(1, InvoiceStatus::Paid, at(2026, 9, 3, 10), 120)).await;
        store.insert_invoice(invoice(2, InvoiceStatus::Paid, at(2026, 9, 30, 23), 80)).await;
        // Mês corrente: 300 pagos, o resto não conta
        store.insert_invoice(invoice(3, InvoiceStatus::Paid, at(2026, 10, 1, 0), 100)).await;
        store.insert_invoice(invoice(4, InvoiceStatus::Paid, at(2026, 10, 17, 9), 200)).await;
        store.insert_invoice(invoice(5, InvoiceStatus::Pending, at(2026, 10, 17, 9), 999)).await;
        store.insert_invoice(invoice(6, InvoiceStatus::Cancelled, at(2026, 10, 12, 9), 999)).await;
        // Depois do instante de referência
        store.insert_invoice(invoice(7, InvoiceStatus::Paid, at(2026, 10, 17, 20), 999)).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 12)).await.unwrap();

        assert_eq!(snap.revenue_this_month, Decimal::from(300));
        assert_eq!(snap.revenue_last_month, Decimal::from(200));
        assert_eq!(snap.revenue_growth, Decimal::from(50));
    }

    #[tokio::test]
    async fn growth_is_zero_without_previous_month_revenue() {
        let store = InMemoryStore::new();
        store.insert_invoice(invoice(1, InvoiceStatus::Paid, at(2026, 10, 5, 10), 500)).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 12)).await.unwrap();

        assert_eq!(snap.revenue_this_month, Decimal::from(500));
        assert_eq!(snap.revenue_growth, Decimal::ZERO);
    }

    #[tokio::test]
    async fn trend_covers_last_seven_days_without_gaps_filled() {
        let store = InMemoryStore::new();
        store.insert_invoice(invoice(1, InvoiceStatus::Paid, at(2026, 10, 10, 10), 70)).await; // fora (8 dias atrás)
        store.insert_invoice(invoice(2, InvoiceStatus::Paid, at(2026, 10, 11, 10), 10)).await;
        store.insert_invoice(invoice(3, InvoiceStatus::Paid, at(2026, 10, 11, 15), 5)).await;
        store.insert_invoice(invoice(4, InvoiceStatus::Paid, at(2026, 10, 17, 8), 20)).await;
        store.insert_invoice(invoice(5, InvoiceStatus::Pending, at(2026, 10, 14, 8), 40)).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 12)).await.unwrap();

        let trend: Vec<_> = snap.sales_last_7_days.iter().map(|d| (d.date, d.total)).collect();
        assert_eq!(trend, vec![
            (date(2026, 10, 11), Decimal::from(15)),
            (date(2026, 10, 17), Decimal::from(20)),
        ]);
    }

    #[tokio::test]
    async fn trend_stops_at_the_reference_instant_like_monthly_revenue() {
        let store = InMemoryStore::new();
        store.insert_invoice(invoice(1, InvoiceStatus::Paid, at(2026, 10, 17, 9), 40)).await;
        store.insert_invoice(invoice(2, InvoiceStatus::Paid, at(2026, 10, 17, 20), 999)).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 12)).await.unwrap();

        let trend_total: Decimal = snap.sales_last_7_days.iter().map(|d| d.total).sum();
        assert_eq!(trend_total, Decimal::from(40));
        assert_eq!(snap.revenue_this_month, Decimal::from(40));
        assert!(trend_total <= snap.revenue_this_month);
    }

    #[tokio::test]
    async fn out_of_range_reference_instant_is_invalid_not_a_panic() {
        let store = Arc::new(UnreachableStore::default());
        let svc = MetricsService::new(store.clone());

        let as_of = chrono::NaiveDate::MIN.and_hms_opt(12, 0, 0).unwrap();
        let err = svc.compute_dashboard(as_of).await.unwrap_err();

        assert!(err.is_invalid_parameters());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn mechanic_workload_includes_idle_mechanics() {
        let store = InMemoryStore::new();
        store.insert_employee(employee(1, EmployeeRole::Mechanic, true)).await;
        store.insert_employee(employee(2, EmployeeRole::Mechanic, true)).await;
        store.insert_employee(employee(3, EmployeeRole::Supervisor, true)).await;
        let day = at(2026, 10, 1, 9);
        store.insert_work_order(order(1, 1, Some(1), WorkOrderStatus::InProgress, day, 10)).await;
        store.insert_work_order(order(2, 1, Some(1), WorkOrderStatus::Completed, day, 10)).await;
        store.insert_work_order(order(3, 1, Some(1), WorkOrderStatus::Delivered, day, 10)).await;
        store.insert_work_order(order(4, 1, Some(1), WorkOrderStatus::Pending, day, 10)).await;
        store.insert_work_order(order(5, 1, Some(3), WorkOrderStatus::InProgress, day, 10)).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 12)).await.unwrap();

        assert_eq!(snap.mechanic_workloads, vec![
            MechanicWorkload {
                employee_id: 1,
                employee_name: "Func1 Oficina".into(),
                active_orders: 1,
                completed_orders: 2,
            },
            MechanicWorkload {
                employee_id: 2,
                employee_name: "Func2 Oficina".into(),
                active_orders: 0,
                completed_orders: 0,
            },
        ]);
    }

    #[tokio::test]
    async fn critical_shortlist_is_ten_lowest_active_parts_in_catalog_order() {
        let store = InMemoryStore::new();
        for id in 1..=12 {
            // Estoques 6,5,4,...; as peças 3 e 4 empatam
            let stock = match id {
                3 | 4 => 2,
                _ => 20 - id as i32,
            };
            store.insert_part(part(id, stock, 1, true)).await;
        }
        store.insert_part(part(99, 0, 5, false)).await;
        let (_, svc) = service(store);

        let snap = svc.compute_dashboard(at(2026, 10, 17, 12)).await.unwrap();

        assert_eq!(snap.critical_parts.len(), 10);
        let ids: Vec<i64> = snap.critical_parts.iter().map(|p| p.part_id).collect();
        assert_eq!(ids, vec![3, 4, 12, 11, 10, 9, 8, 7, 6, 5]);
        assert!(snap.critical_parts.iter().all(|p| p.part_id != 99));
    }

    #[tokio::test]
    async fn low_stock_count_ignores_inactive_parts() {
        let store = InMemoryStore::new();
        store.insert_part(part(1, 4, 5, true)).await;
        store.insert_part(part(2, 5, 5, true)).await;
        store.insert_part(part(3, 6, 5, true)).await;
        let (store, svc) = service(store);

        let as_of = at(2026, 10, 17, 12);
        assert_eq!(svc.compute_dashboard(as_of).await.unwrap().low_stock_parts, 2);

        assert!(store.set_part_active(1, false).await);
        assert_eq!(svc.compute_dashboard(as_of).await.unwrap().low_stock_parts, 1);
    }

    #[tokio::test]
    async fn unreachable_store_fails_the_whole_snapshot() {
        let svc = MetricsService::new(Arc::new(UnreachableStore::default()));
        let err = svc.compute_dashboard(at(2026, 10, 17, 12)).await.unwrap_err();
        assert!(err.is_data_access());
    }
}
