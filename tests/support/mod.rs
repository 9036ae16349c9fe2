//! Shared fixtures for integration suites.

#![allow(dead_code)]

pub mod solver;

use chrono::NaiveDate;
use outlay::domain::{Budget, Expense, ExpenseRange, Priority};
use outlay::optimize::OptimizationParameters;
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn start_date() -> NaiveDate {
    date(2023, 1, 1)
}

pub fn expense(
    description: &str,
    due_date: NaiveDate,
    priority: Priority,
    (minimum, maximum, target): (Decimal, Decimal, Decimal),
    mandatory: bool,
) -> Expense {
    let range = ExpenseRange::try_new(minimum, maximum, target).expect("valid range");
    Expense::new(description, due_date, priority, range, mandatory)
}

pub fn monthly_budget(initial: Decimal, recurrent: Decimal, iterations: usize) -> Budget {
    Budget {
        initial,
        recurrent,
        recurrence: 30,
        last_recurrence: 0,
        iterations,
    }
}

pub fn params() -> OptimizationParameters {
    OptimizationParameters::try_new(2.0, 0.0, 1000.0).expect("valid parameters")
}

pub fn params_with_weight(deviation_weight: f64) -> OptimizationParameters {
    OptimizationParameters::try_new(2.0, deviation_weight, 1000.0).expect("valid parameters")
}
