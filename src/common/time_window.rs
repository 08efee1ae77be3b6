// src/common/time_window.rs

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use crate::common::error::AppError;

// Quantidade de dias da série de tendência do dashboard (hoje incluso).
pub const TREND_DAYS: u64 = 7;

// Janela padrão do relatório de produtividade quando o chamador não informa o período.
pub const DEFAULT_PRODUCTIVITY_DAYS: i64 = 30;

/// Limite superior de uma janela de tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEnd {
    /// `t <= instante` (ex.: "até agora").
    Inclusive(NaiveDateTime),
    /// `t < instante` (ex.: "antes do início do mês").
    Exclusive(NaiveDateTime),
}

/// Intervalo de tempo usado como predicado pelas consultas. O início é sempre inclusivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: WindowEnd,
}

impl TimeWindow {
    /// `[início, fim)`.
    pub fn until(start: NaiveDateTime, end_exclusive: NaiveDateTime) -> Self {
        Self { start, end: WindowEnd::Exclusive(end_exclusive) }
    }

    /// `[início, as_of]`.
    pub fn through(start: NaiveDateTime, as_of: NaiveDateTime) -> Self {
        Self { start, end: WindowEnd::Inclusive(as_of) }
    }

    /// Um dia civil inteiro.
    pub fn day(date: NaiveDate) -> Result<Self, AppError> {
        Ok(Self::until(start_of_day(date), start_of_day(next_day(date)?)))
    }

    /// Datas civis com limites inclusivos. `start > end` é erro do chamador, nunca é corrigido.
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::invalid(format!(
                "A data inicial ({}) é posterior à data final ({}).",
                start, end
            )));
        }
        Ok(Self::until(start_of_day(start), start_of_day(next_day(end)?)))
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        if instant < self.start {
            return false;
        }
        match self.end {
            WindowEnd::Inclusive(end) => instant <= end,
            WindowEnd::Exclusive(end) => instant < end,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.end {
            WindowEnd::Inclusive(end) => self.start > end,
            WindowEnd::Exclusive(end) => self.start >= end,
        }
    }

    /// Primeiro dia civil coberto pela janela.
    pub fn first_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Último dia civil coberto pela janela.
    pub fn last_date(&self) -> NaiveDate {
        match self.end {
            WindowEnd::Inclusive(end) => end.date(),
            WindowEnd::Exclusive(end) if end.time() == NaiveTime::MIN => {
                end.date().pred_opt().unwrap_or(end.date())
            }
            WindowEnd::Exclusive(end) => end.date(),
        }
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn next_day(date: NaiveDate) -> Result<NaiveDate, AppError> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::invalid(format!("Data fora do intervalo suportado: {}", date)))
}

/// Primeiro dia do mês de `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Primeiro dia do mês anterior ao mês de `date`.
pub fn previous_month_start(date: NaiveDate) -> Result<NaiveDate, AppError> {
    month_start(date)
        .checked_sub_days(Days::new(1))
        .map(month_start)
        .ok_or_else(|| AppError::invalid(format!("Data fora do intervalo suportado: {}", date)))
}

/// Calendário derivado do instante de referência do dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCalendar {
    pub as_of: NaiveDateTime,
    pub today: TimeWindow,
    pub month_to_date: TimeWindow,
    pub previous_month: TimeWindow,
    pub trend: TimeWindow,
}

impl DashboardCalendar {
    pub fn from_as_of(as_of: NaiveDateTime) -> Result<Self, AppError> {
        let today = as_of.date();
        let current_month = start_of_day(month_start(today));
        let previous_month = start_of_day(previous_month_start(today)?);
        let trend_start = today
            .checked_sub_days(Days::new(TREND_DAYS - 1))
            .ok_or_else(|| AppError::invalid(format!("Data fora do intervalo suportado: {}", today)))?;

        Ok(Self {
            as_of,
            today: TimeWindow::day(today)?,
            month_to_date: TimeWindow::through(current_month, as_of),
            previous_month: TimeWindow::until(previous_month, current_month),
            // Mesmo limite superior da receita do mês: nada depois de `as_of`
            trend: TimeWindow::through(start_of_day(trend_start), as_of),
        })
    }
}

/// Resolve o período do relatório de produtividade.
/// Sem início: `as_of - 30 dias`. Sem fim: até `as_of` (inclusivo).
/// Datas informadas valem como dias civis inteiros.
pub fn resolve_period(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    as_of: NaiveDateTime,
) -> Result<TimeWindow, AppError> {
    let window_start = match start {
        Some(date) => start_of_day(date),
        None => as_of
            .checked_sub_signed(Duration::days(DEFAULT_PRODUCTIVITY_DAYS))
            .ok_or_else(|| AppError::invalid(format!("Data fora do intervalo suportado: {}", as_of)))?,
    };

    let window = match end {
        Some(date) => TimeWindow::until(window_start, start_of_day(next_day(date)?)),
        None => TimeWindow::through(window_start, as_of),
    };

    if window.is_empty() {
        return Err(AppError::invalid(format!(
            "O início do período ({}) é posterior ao fim ({}).",
            window.first_date(),
            window.last_date()
        )));
    }
    Ok(window)
}
