//! Input assembly: raw wire records into validated domain objects.

mod record;
mod sheet;

pub use record::{RawBudget, RawExpense, RawInput, RawParameters, RawRange};

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Budget, Expense, ExpenseRange, Portfolio, Priority};
use crate::error::{InputError, Result};
use crate::optimize::OptimizationParameters;

/// Fully assembled, validated input for one optimization run.
#[derive(Debug, Clone)]
pub struct InputData {
    /// Planning start date.
    pub start_date: NaiveDate,
    /// Portfolio snapshot the run operates on.
    pub portfolio: Portfolio,
    /// Validated tuning parameters.
    pub parameters: OptimizationParameters,
}

/// Expense parsed from the wire but with its due date not yet resolved.
#[derive(Debug, Clone)]
pub(crate) struct PendingExpense {
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub mandatory: bool,
    pub range: ExpenseRange,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        InputError::InvalidDate {
            field,
            value: value.to_string(),
        }
        .into()
    })
}

/// Lenient date parsing for due-date cells: anything unparseable becomes
/// "no due date" and is defaulted later.
pub(crate) fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Turn a raw wire record into validated domain objects.
///
/// # Errors
///
/// Fails hard on malformed dates, missing expense information, invalid spend
/// intervals and out-of-bounds parameters.
pub fn build_input_data(raw: RawInput) -> Result<InputData> {
    let start_date = parse_date("start_date", &raw.start_date)?;

    let last_recurrence_date = parse_date("budget.last_recurrence", &raw.budget.last_recurrence)?;
    let budget = Budget {
        initial: raw.budget.initial,
        recurrent: raw.budget.recurrent,
        recurrence: raw.budget.recurrence,
        last_recurrence: (start_date - last_recurrence_date).num_days(),
        iterations: raw.budget.iterations,
    };

    let pending = if let Some(path) = &raw.path_to_csv {
        sheet::read_expense_sheet(path)?
    } else if let Some(records) = raw.expenses {
        records
            .into_iter()
            .map(|record| {
                let range = ExpenseRange::try_new(
                    record.range.minimum,
                    record.range.maximum,
                    record.range.target,
                )?;
                Ok(PendingExpense {
                    description: record.description,
                    due_date: record.due_date.as_deref().and_then(parse_date_lenient),
                    priority: Priority::from_ordinal(record.priority),
                    mandatory: record.mandatory,
                    range,
                })
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        return Err(InputError::MissingField { field: "expenses" }.into());
    };

    let expenses = resolve_due_dates(pending)?;
    debug!(expenses = expenses.len(), "assembled input");

    let parameters = OptimizationParameters::try_new(
        raw.optimization_parameters.priority_exponent,
        raw.optimization_parameters.deviation_weight,
        raw.optimization_parameters.max_time,
    )?;

    Ok(InputData {
        start_date,
        portfolio: Portfolio::new(expenses, budget),
        parameters,
    })
}

/// An absent due date defaults to the maximum due date in the portfolio.
fn resolve_due_dates(pending: Vec<PendingExpense>) -> Result<Vec<Expense>> {
    let max_due_date = pending.iter().filter_map(|p| p.due_date).max();

    pending
        .into_iter()
        .map(|p| {
            let due_date = p
                .due_date
                .or(max_due_date)
                .ok_or(InputError::MissingField { field: "due_date" })?;
            Ok(Expense::new(
                p.description,
                due_date,
                p.priority,
                p.range,
                p.mandatory,
            ))
        })
        .collect()
}
