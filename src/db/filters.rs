// src/db/filters.rs
//
// Predicados da camada de dados. Cada filtro sabe se traduzir em SQL
// (para o WorkshopRepository) e se avaliar em memória (para o InMemoryStore),
// assim os dois backends compartilham a mesma definição de "quais registros contam".

use sqlx::{Postgres, QueryBuilder};

use crate::{
    common::time_window::{TimeWindow, WindowEnd},
    models::{
        finance::{Invoice, InvoiceStatus},
        inventory::Part,
        operations::{WorkOrder, WorkOrderStatus},
        staff::{Employee, EmployeeRole},
    },
};

// =========================================================================
//  HELPERS SQL
// =========================================================================

fn push_window(qb: &mut QueryBuilder<'_, Postgres>, column: &str, window: &TimeWindow) {
    qb.push(" AND ").push(column).push(" >= ").push_bind(window.start);
    match window.end {
        WindowEnd::Inclusive(end) => {
            qb.push(" AND ").push(column).push(" <= ").push_bind(end);
        }
        WindowEnd::Exclusive(end) => {
            qb.push(" AND ").push(column).push(" < ").push_bind(end);
        }
    }
}

fn push_active(qb: &mut QueryBuilder<'_, Postgres>, alias: &str, active: Option<bool>) {
    if let Some(active) = active {
        qb.push(" AND ").push(alias).push(".is_active = ").push_bind(active);
    }
}

// =========================================================================
//  ORDENS DE SERVIÇO
// =========================================================================

/// Lista de situações vazia = qualquer situação.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkOrderFilter {
    pub statuses: Vec<WorkOrderStatus>,
    pub active: Option<bool>,
    pub intake: Option<TimeWindow>,
}

impl WorkOrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
        self
    }

    pub fn active_only(mut self) -> Self {
        self.active = Some(true);
        self
    }

    pub fn intake_within(mut self, window: TimeWindow) -> Self {
        self.intake = Some(window);
        self
    }

    pub fn matches(&self, order: &WorkOrder) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&order.status))
            && self.active.is_none_or(|active| order.is_active == active)
            && self.intake.is_none_or(|w| w.contains(order.intake_date))
    }

    /// Acrescenta as condições (sempre prefixadas com `AND`) sobre a tabela `alias`.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        if !self.statuses.is_empty() {
            qb.push(" AND ").push(alias).push(".status IN (");
            let mut separated = qb.separated(", ");
            for status in &self.statuses {
                separated.push_bind(*status);
            }
            separated.push_unseparated(")");
        }
        push_active(qb, alias, self.active);
        if let Some(window) = &self.intake {
            push_window(qb, &format!("{alias}.intake_date"), window);
        }
    }
}

// =========================================================================
//  FATURAS
// =========================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub issued: Option<TimeWindow>,
}

impl InvoiceFilter {
    /// Somente faturas pagas contam como receita.
    pub fn paid() -> Self {
        Self { status: Some(InvoiceStatus::Paid), issued: None }
    }

    pub fn issued_within(mut self, window: TimeWindow) -> Self {
        self.issued = Some(window);
        self
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.status.is_none_or(|status| invoice.status == status)
            && self.issued.is_none_or(|w| w.contains(invoice.issued_at))
    }

    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        if let Some(status) = self.status {
            qb.push(" AND ").push(alias).push(".status = ").push_bind(status);
        }
        if let Some(window) = &self.issued {
            push_window(qb, &format!("{alias}.issued_at"), window);
        }
    }
}

// =========================================================================
//  PEÇAS
// =========================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartFilter {
    pub active: Option<bool>,
    pub critical_only: bool,
}

impl PartFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active_only(mut self) -> Self {
        self.active = Some(true);
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical_only = true;
        self
    }

    pub fn matches(&self, part: &Part) -> bool {
        self.active.is_none_or(|active| part.is_active == active)
            && (!self.critical_only || part.is_critical())
    }

    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        push_active(qb, alias, self.active);
        if self.critical_only {
            qb.push(" AND ")
                .push(alias)
                .push(".current_stock <= ")
                .push(alias)
                .push(".minimum_stock");
        }
    }
}

// =========================================================================
//  FUNCIONÁRIOS
// =========================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub active: Option<bool>,
    pub role: Option<EmployeeRole>,
}

impl EmployeeFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active_only(mut self) -> Self {
        self.active = Some(true);
        self
    }

    pub fn with_role(mut self, role: EmployeeRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.active.is_none_or(|active| employee.is_active == active)
            && self.role.is_none_or(|role| employee.role == role)
    }

    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        push_active(qb, alias, self.active);
        if let Some(role) = self.role {
            qb.push(" AND ").push(alias).push(".role = ").push_bind(role);
        }
    }
}
