// src/handlers.rs

pub mod dashboard;
pub mod documents;
pub mod reports;

use chrono::{Local, NaiveDateTime};

/// Instante de referência da requisição: o `asOf` informado ou o relógio local do servidor.
pub(crate) fn reference_instant(as_of: Option<NaiveDateTime>) -> NaiveDateTime {
    as_of.unwrap_or_else(|| Local::now().naive_local())
}
