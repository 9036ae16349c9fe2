//! CSV expense sheets.
//!
//! Seven positional columns, header row skipped:
//! `description, due_date, minimum, target, maximum, priority, mandatory`.
//! Amount and priority cells are parsed leniently: an unparseable minimum or
//! target becomes 0, an unparseable maximum becomes [`UNBOUNDED_AMOUNT`], an
//! unparseable priority becomes Low. Range ordering is still validated, so a
//! sheet whose defaults produce an inverted interval fails hard.

use std::path::Path;

use csv::ReaderBuilder;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Amount, ExpenseRange, Priority, UNBOUNDED_AMOUNT};
use crate::error::{InputError, Result};

use super::{parse_date_lenient, PendingExpense};

fn parse_amount_or(cell: &str, default: Amount) -> Amount {
    cell.trim().parse::<Decimal>().unwrap_or(default)
}

fn parse_priority(cell: &str) -> Priority {
    cell.trim()
        .parse::<i64>()
        .map_or(Priority::Low, Priority::from_ordinal)
}

/// Read an expense sheet into pending records with unresolved due dates.
///
/// # Errors
///
/// Returns [`InputError::Csv`] for unreadable or malformed files and a
/// domain error for invalid spend intervals.
pub(crate) fn read_expense_sheet(path: &Path) -> Result<Vec<PendingExpense>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(InputError::Csv)?;

    let mut pending = Vec::new();
    for record in reader.records() {
        let row = record.map_err(InputError::Csv)?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        let range = ExpenseRange::try_new(
            parse_amount_or(cell(2), Decimal::ZERO),
            parse_amount_or(cell(4), UNBOUNDED_AMOUNT),
            parse_amount_or(cell(3), Decimal::ZERO),
        )?;

        pending.push(PendingExpense {
            description: cell(0).to_string(),
            due_date: parse_date_lenient(cell(1)),
            priority: parse_priority(cell(5)),
            mandatory: cell(6).eq_ignore_ascii_case("yes"),
            range,
        });
    }

    debug!(expenses = pending.len(), path = %path.display(), "read expense sheet");
    Ok(pending)
}
