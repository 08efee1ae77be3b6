// src/services/fixtures.rs
//
// Construtores de registros e stores de apoio para os testes dos serviços.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{
        filters::{EmployeeFilter, InvoiceFilter, PartFilter, WorkOrderFilter},
        store::WorkshopStore,
    },
    models::{
        aggregates::{ClientOrderStats, EmployeeOrderTotals, StatusCount},
        crm::{Client, Vehicle},
        dashboard::DailySales,
        finance::{Invoice, InvoiceStatus},
        inventory::Part,
        operations::{WorkOrder, WorkOrderStatus},
        staff::{Employee, EmployeeRole},
    },
};

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn client(id: i64, active: bool) -> Client {
    Client {
        id,
        first_name: format!("Cliente{id}"),
        last_name: "Teste".into(),
        document_id: Some(format!("DOC{id:04}")),
        phone: None,
        email: None,
        address: None,
        is_active: active,
        created_at: at(2026, 1, 1, 8),
    }
}

pub fn vehicle(id: i64, client_id: i64, active: bool) -> Vehicle {
    Vehicle {
        id,
        client_id,
        plate: format!("ABC-{id:03}"),
        make: "Toyota".into(),
        model: "Corolla".into(),
        year: 2018,
        color: None,
        odometer_km: 75_000,
        is_active: active,
        created_at: at(2026, 1, 1, 8),
    }
}

pub fn employee(id: i64, role: EmployeeRole, active: bool) -> Employee {
    Employee {
        id,
        first_name: format!("Func{id}"),
        last_name: "Oficina".into(),
        document_id: None,
        role,
        specialty: None,
        hourly_rate: Decimal::from(15),
        commission_pct: Decimal::ZERO,
        is_active: active,
    }
}

pub fn order(
    id: i64,
    client_id: i64,
    employee_id: Option<i64>,
    status: WorkOrderStatus,
    intake: NaiveDateTime,
    total: i64,
) -> WorkOrder {
    WorkOrder {
        id,
        client_id,
        vehicle_id: client_id,
        assigned_employee_id: employee_id,
        status,
        intake_date: intake,
        total_amount: Decimal::from(total),
        is_active: true,
    }
}

pub fn invoice(id: i64, status: InvoiceStatus, issued_at: NaiveDateTime, total: i64) -> Invoice {
    Invoice {
        id,
        work_order_id: None,
        status,
        issued_at,
        total_amount: Decimal::from(total),
    }
}

pub fn part(id: i64, stock: i32, minimum: i32, active: bool) -> Part {
    Part {
        id,
        code: format!("P{id:03}"),
        name: format!("Peça {id}"),
        brand: None,
        unit_cost: Decimal::from(5),
        unit_price: Decimal::from(8),
        current_stock: stock,
        minimum_stock: minimum,
        maximum_stock: 10,
        is_active: active,
    }
}

/// Store que simula a camada de dados fora do ar. Conta as chamadas recebidas.
#[derive(Debug, Default)]
pub struct UnreachableStore {
    pub calls: AtomicUsize,
}

impl UnreachableStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl WorkshopStore for UnreachableStore {
    async fn count_clients(&self, _active: Option<bool>) -> Result<i64, AppError> {
        self.fail()
    }

    async fn count_vehicles(&self, _active: Option<bool>) -> Result<i64, AppError> {
        self.fail()
    }

    async fn count_employees(&self, _filter: &EmployeeFilter) -> Result<i64, AppError> {
        self.fail()
    }

    async fn count_work_orders(&self, _filter: &WorkOrderFilter) -> Result<i64, AppError> {
        self.fail()
    }

    async fn count_work_orders_by_status(
        &self,
        _filter: &WorkOrderFilter,
    ) -> Result<Vec<StatusCount>, AppError> {
        self.fail()
    }

    async fn sum_invoices(&self, _filter: &InvoiceFilter) -> Result<Decimal, AppError> {
        self.fail()
    }

    async fn sum_invoices_by_day(&self, _filter: &InvoiceFilter) -> Result<Vec<DailySales>, AppError> {
        self.fail()
    }

    async fn count_parts(&self, _filter: &PartFilter) -> Result<i64, AppError> {
        self.fail()
    }

    async fn list_parts_by_stock(
        &self,
        _filter: &PartFilter,
        _limit: Option<i64>,
    ) -> Result<Vec<Part>, AppError> {
        self.fail()
    }

    async fn work_order_totals_by_employee(
        &self,
        _employees: &EmployeeFilter,
        _orders: &WorkOrderFilter,
    ) -> Result<Vec<EmployeeOrderTotals>, AppError> {
        self.fail()
    }

    async fn work_order_stats_by_client(&self) -> Result<Vec<ClientOrderStats>, AppError> {
        self.fail()
    }
}
