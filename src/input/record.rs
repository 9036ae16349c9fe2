//! Wire shapes of the JSON input record.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Amount;
use crate::error::{InputError, Result};

/// Top-level input record as it arrives on the wire.
///
/// Expenses come either inline under `expenses` or from a CSV sheet named by
/// `path_to_csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInput {
    /// Planning start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Budget parameters.
    pub budget: RawBudget,
    /// Inline expense records.
    #[serde(default)]
    pub expenses: Option<Vec<RawExpense>>,
    /// Path to a CSV expense sheet.
    #[serde(default)]
    pub path_to_csv: Option<PathBuf>,
    /// Solver tuning knobs.
    pub optimization_parameters: RawParameters,
}

impl RawInput {
    /// Read and parse a JSON input record from disk.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ReadFile`] or [`InputError::Parse`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(InputError::ReadFile)?;
        let raw = serde_json::from_str(&text).map_err(InputError::Parse)?;
        Ok(raw)
    }
}

/// Budget as it arrives on the wire.
///
/// `last_recurrence` is a date string here; assembly converts it to days
/// elapsed as of the start date.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBudget {
    /// Amount available in the first period.
    pub initial: Amount,
    /// Recurring increment. The wire key is the historical `recorrent`
    /// spelling; the corrected spelling is accepted as an alias.
    #[serde(rename = "recorrent", alias = "recurrent")]
    pub recurrent: Amount,
    /// Days between recurring payments.
    pub recurrence: i64,
    /// Date of the previous recurring payment, `YYYY-MM-DD`.
    pub last_recurrence: String,
    /// Number of periods to plan over.
    pub iterations: usize,
}

/// Expense as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawExpense {
    /// Human-readable description.
    pub description: String,
    /// Due date, `YYYY-MM-DD`; absent or unparseable dates default to the
    /// portfolio's maximum due date.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Priority ordinal 1..=3; anything else maps to Low.
    pub priority: i64,
    /// Whether the expense must be funded.
    pub mandatory: bool,
    /// Permissible spend interval.
    pub range: RawRange,
}

/// Spend interval as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRange {
    pub minimum: Amount,
    pub maximum: Amount,
    pub target: Amount,
}

/// Optimization parameters as they arrive on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawParameters {
    /// Exponent applied to the priority ordinal; must be >= 1.
    pub priority_exponent: f64,
    /// Penalty for funding a discretionary expense; must be >= 0.
    pub deviation_weight: f64,
    /// Soft solve time budget in milliseconds; must be >= 0.
    pub max_time: f64,
}
