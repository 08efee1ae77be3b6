// src/models/staff.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "employee_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeRole {
    Mechanic,
    Receptionist,
    Supervisor,
    Administrator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    #[schema(example = "Pedro")]
    pub first_name: String,
    #[schema(example = "Martínez")]
    pub last_name: String,
    pub document_id: Option<String>,
    pub role: EmployeeRole,
    #[schema(example = "Motor")]
    pub specialty: Option<String>,
    #[schema(example = "15.00")]
    pub hourly_rate: Decimal,
    #[schema(example = "5.00")]
    pub commission_pct: Decimal,
    pub is_active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
