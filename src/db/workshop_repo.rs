// src/db/workshop_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    db::{
        filters::{EmployeeFilter, InvoiceFilter, PartFilter, WorkOrderFilter},
        store::WorkshopStore,
    },
    models::{
        aggregates::{ClientOrderStats, EmployeeOrderTotals, StatusCount},
        dashboard::DailySales,
        inventory::Part,
        operations::WorkOrderStatus,
    },
};

const PART_COLUMNS: &str = "p.id, p.code, p.name, p.brand, p.unit_cost, p.unit_price, \
                            p.current_stock, p.minimum_stock, p.maximum_stock, p.is_active";

// Implementação da camada de consulta sobre o PostgreSQL.
// Todas as consultas são de leitura e usam o pool diretamente: cada subconsulta
// pega a própria conexão, então o serviço pode dispará-las em paralelo.
#[derive(Clone)]
pub struct WorkshopRepository {
    pool: PgPool,
}

impl WorkshopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_active_rows(&self, table: &str, active: Option<bool>) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
        qb.push(table).push(" t WHERE TRUE");
        if let Some(active) = active {
            qb.push(" AND t.is_active = ").push_bind(active);
        }

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[async_trait]
impl WorkshopStore for WorkshopRepository {
    async fn count_clients(&self, active: Option<bool>) -> Result<i64, AppError> {
        self.count_active_rows("clients", active).await
    }

    async fn count_vehicles(&self, active: Option<bool>) -> Result<i64, AppError> {
        self.count_active_rows("vehicles", active).await
    }

    async fn count_employees(&self, filter: &EmployeeFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM employees e WHERE TRUE");
        filter.push_conditions(&mut qb, "e");

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn count_work_orders(&self, filter: &WorkOrderFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM work_orders o WHERE TRUE");
        filter.push_conditions(&mut qb, "o");

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn count_work_orders_by_status(
        &self,
        filter: &WorkOrderFilter,
    ) -> Result<Vec<StatusCount>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT o.status, COUNT(*) AS count FROM work_orders o WHERE TRUE",
        );
        filter.push_conditions(&mut qb, "o");
        qb.push(" GROUP BY o.status ORDER BY o.status");

        let rows = qb.build_query_as::<StatusCount>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn sum_invoices(&self, filter: &InvoiceFilter) -> Result<Decimal, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(i.total_amount), 0) FROM invoices i WHERE TRUE",
        );
        filter.push_conditions(&mut qb, "i");

        let total: Decimal = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn sum_invoices_by_day(&self, filter: &InvoiceFilter) -> Result<Vec<DailySales>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                i.issued_at::date AS "date",
                SUM(i.total_amount) AS "total"
            FROM invoices i
            WHERE TRUE"#,
        );
        filter.push_conditions(&mut qb, "i");
        qb.push(" GROUP BY 1 ORDER BY 1 ASC");

        let rows = qb.build_query_as::<DailySales>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn count_parts(&self, filter: &PartFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM parts p WHERE TRUE");
        filter.push_conditions(&mut qb, "p");

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn list_parts_by_stock(
        &self,
        filter: &PartFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Part>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(PART_COLUMNS).push(" FROM parts p WHERE TRUE");
        filter.push_conditions(&mut qb, "p");
        qb.push(" ORDER BY p.current_stock ASC, p.id ASC");
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let parts = qb.build_query_as::<Part>().fetch_all(&self.pool).await?;
        Ok(parts)
    }

    async fn work_order_totals_by_employee(
        &self,
        employees: &EmployeeFilter,
        orders: &WorkOrderFilter,
    ) -> Result<Vec<EmployeeOrderTotals>, AppError> {
        // Os filtros da ordem vão no ON do LEFT JOIN: funcionário sem ordem
        // que case continua no resultado, com contagem 0.
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                e.id AS employee_id,
                e.first_name || ' ' || e.last_name AS employee_name,
                COUNT(o.id) AS order_count,
                COALESCE(SUM(o.total_amount), 0) AS total_amount
            FROM employees e
            LEFT JOIN work_orders o ON o.assigned_employee_id = e.id"#,
        );
        orders.push_conditions(&mut qb, "o");
        qb.push(" WHERE TRUE");
        employees.push_conditions(&mut qb, "e");
        qb.push(" GROUP BY e.id, e.first_name, e.last_name ORDER BY e.id ASC");

        let rows = qb.build_query_as::<EmployeeOrderTotals>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn work_order_stats_by_client(&self) -> Result<Vec<ClientOrderStats>, AppError> {
        let rows = sqlx::query_as::<_, ClientOrderStats>(
            r#"
            SELECT
                c.id, c.first_name, c.last_name, c.document_id, c.phone, c.email,
                c.address, c.is_active, c.created_at,
                COUNT(o.id) AS total_orders,
                MAX(o.intake_date) AS last_visit,
                COALESCE(SUM(o.total_amount) FILTER (WHERE o.status = $1), 0) AS total_spent
            FROM clients c
            JOIN work_orders o ON o.client_id = c.id
            GROUP BY c.id
            ORDER BY c.id ASC
            "#,
        )
            .bind(WorkOrderStatus::Completed)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
