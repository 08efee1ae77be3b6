// src/models/inventory.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Catálogo de peças. Entidade isolada, sem relacionamentos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: i64,
    #[schema(example = "FIL001")]
    pub code: String,
    #[schema(example = "Filtro de Óleo")]
    pub name: String,
    #[schema(example = "Mann")]
    pub brand: Option<String>,
    #[schema(example = "3.20")]
    pub unit_cost: Decimal,
    #[schema(example = "5.50")]
    pub unit_price: Decimal,
    #[schema(example = 4)]
    pub current_stock: i32,
    #[schema(example = 5)]
    pub minimum_stock: i32,
    #[schema(example = 50)]
    pub maximum_stock: i32,
    pub is_active: bool,
}

impl Part {
    /// Crítica quando o estoque atual está no mínimo configurado ou abaixo dele.
    pub fn is_critical(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}
