// src/common/aggregation.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::aggregates::EmployeeOrderTotals;

/// Crescimento percentual de `previous` para `current`.
/// Sem base de comparação (`previous <= 0`) o crescimento é zero, nunca infinito nem erro.
pub fn growth_percentage(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        (current - previous) / previous * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

pub fn sum_decimals<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, |acc, v| acc + v)
}

/// Ordena de forma decrescente pela chave e corta em `limit`.
/// A ordenação é estável: empates mantêm a ordem de entrada.
pub fn top_n_descending<T, K, F>(mut items: Vec<T>, limit: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items.truncate(limit);
    items
}

/// Duas medidas por funcionário, vindas de duas consultas agrupadas distintas.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedEmployeeTotals {
    pub employee_id: i64,
    pub employee_name: String,
    pub first_count: i64,
    pub first_total: Decimal,
    pub second_count: i64,
    pub second_total: Decimal,
}

/// Junta as duas listas pelo id do funcionário, em ordem crescente de id.
/// Um funcionário presente em só uma das listas (cadastrado entre as duas consultas)
/// entra com zero na medida que faltou.
pub fn pair_employee_totals(
    first: Vec<EmployeeOrderTotals>,
    second: Vec<EmployeeOrderTotals>,
) -> Vec<PairedEmployeeTotals> {
    let mut paired: BTreeMap<i64, PairedEmployeeTotals> = BTreeMap::new();

    for row in first {
        paired.insert(row.employee_id, PairedEmployeeTotals {
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            first_count: row.order_count,
            first_total: row.total_amount,
            second_count: 0,
            second_total: Decimal::ZERO,
        });
    }

    for row in second {
        let entry = paired.entry(row.employee_id).or_insert_with(|| PairedEmployeeTotals {
            employee_id: row.employee_id,
            employee_name: row.employee_name.clone(),
            first_count: 0,
            first_total: Decimal::ZERO,
            second_count: 0,
            second_total: Decimal::ZERO,
        });
        entry.second_count = row.order_count;
        entry.second_total = row.total_amount;
    }

    paired.into_values().collect()
}
