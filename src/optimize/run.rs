//! Orchestration of a full optimization run.
//!
//! The partial-failure contract lives here: infeasibility and abnormal
//! solver statuses are converted into a structured [`RunReport`] with a
//! failure code and a message, never propagated as a hard fault. Malformed
//! input (bad ranges, bad parameters, unreadable files) still fails hard.

use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::domain::solver::SolutionStatus;
use crate::domain::{Amount, Portfolio};
use crate::error::{Error, OptimizeError, Result};
use crate::input::{build_input_data, InputData, RawInput};

use super::optimizer::Optimizer;

/// Per-expense entry of the result record, in portfolio order.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReport {
    /// Expense description.
    pub expense: String,
    /// Total spent on the expense across all periods.
    pub total_cost: Amount,
    /// Per-period spends; empty when the run failed.
    pub partial_spends: Vec<Amount>,
}

/// Uniform result record of an optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Solver status code; 0 means optimal, see
    /// [`SolutionStatus::code`] for the full mapping.
    pub status: i32,
    /// One entry per expense, in input order.
    pub expenses: Vec<ExpenseReport>,
    /// Human-readable failure reason; empty on success.
    pub error: String,
}

impl RunReport {
    fn from_portfolio(status: i32, portfolio: &Portfolio, error: String) -> Self {
        let expenses = portfolio
            .expenses
            .iter()
            .map(|expense| ExpenseReport {
                expense: expense.description.clone(),
                total_cost: expense.cost(),
                partial_spends: expense.partial_spends().to_vec(),
            })
            .collect();
        Self {
            status,
            expenses,
            error,
        }
    }

    /// Return `true` if the run produced a usable allocation.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Run one optimization cycle over already-assembled input.
///
/// # Errors
///
/// Propagates domain validation errors and backend faults; infeasibility and
/// abnormal solver statuses are reported through the returned record instead.
pub fn run_optimization(mut input: InputData) -> Result<RunReport> {
    let mut optimizer = Optimizer::new(&mut input.portfolio, input.parameters, input.start_date);

    match optimizer.solve() {
        Ok(status) => Ok(RunReport::from_portfolio(
            status.code(),
            &input.portfolio,
            String::new(),
        )),
        Err(Error::Optimize(err)) => {
            warn!(error = %err, "optimization failed, reporting structured failure");
            let status = match err {
                OptimizeError::Infeasible(_) => SolutionStatus::Infeasible,
                OptimizeError::Solver(_) => SolutionStatus::Error,
            };
            Ok(RunReport::from_portfolio(
                status.code(),
                &input.portfolio,
                err.to_string(),
            ))
        }
        Err(other) => Err(other),
    }
}

/// Assemble input from a raw deserialized record and run it.
///
/// # Errors
///
/// Fails hard on malformed input; see [`run_optimization`] for the rest.
pub fn run_optimization_from_raw(raw: RawInput) -> Result<RunReport> {
    run_optimization(build_input_data(raw)?)
}

/// Read a JSON input record from disk and run it.
///
/// # Errors
///
/// Fails hard on unreadable files or malformed input; see
/// [`run_optimization`] for the rest.
pub fn run_optimization_from_json(path: impl AsRef<Path>) -> Result<RunReport> {
    let raw = RawInput::from_json_file(path)?;
    run_optimization_from_raw(raw)
}
