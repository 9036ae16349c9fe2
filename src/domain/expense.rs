//! Expenses and their permissible spend intervals.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Amount;

/// Priority class of an expense, ordered from most to least important.
///
/// The ordinal (High = 1, Low = 3) feeds the objective weight `1 / ordinal^c`,
/// so underfunding a high-priority expense costs more than underfunding a
/// low-priority one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Most important (ordinal 1).
    High,
    /// Middling importance (ordinal 2).
    Medium,
    /// Least important (ordinal 3).
    Low,
}

impl Priority {
    /// Numeric ordinal used in the objective weight formula.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Map a raw ordinal to a priority, defaulting to `Low` for anything
    /// outside 1..=3. Matches the lenient parsing of expense sheets.
    #[must_use]
    pub const fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            1 => Self::High,
            2 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Objective weight `1 / ordinal^exponent` as a pure function of the
    /// ordinal, independent of the enum representation.
    #[must_use]
    pub fn weight(self, exponent: f64) -> f64 {
        1.0 / f64::from(self.ordinal()).powf(exponent)
    }
}

/// Permissible spend interval for an expense.
///
/// Invariant: `0 <= minimum <= target <= maximum`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRange {
    /// Least acceptable total spend if the expense is funded at all.
    pub minimum: Amount,
    /// Most that may ever be spent on the expense.
    pub maximum: Amount,
    /// Ideal total spend.
    pub target: Amount,
}

impl ExpenseRange {
    /// Create a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRange`] if the ordering invariant does
    /// not hold.
    pub fn try_new(minimum: Amount, maximum: Amount, target: Amount) -> Result<Self, DomainError> {
        if minimum < Decimal::ZERO || minimum > target || target > maximum {
            return Err(DomainError::InvalidRange {
                minimum,
                target,
                maximum,
            });
        }
        Ok(Self {
            minimum,
            maximum,
            target,
        })
    }
}

impl fmt::Display for ExpenseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.minimum, self.target, self.maximum)
    }
}

/// A single expense within a portfolio.
///
/// Spends are attached exactly once per optimization run by the solution
/// mapper via [`Expense::apply_spends`]; every other path leaves the expense
/// untouched.
#[derive(Debug, Clone)]
pub struct Expense {
    /// Human-readable description, also the key in the result record.
    pub description: String,
    /// Last date by which the expense must be paid.
    pub due_date: NaiveDate,
    /// Priority class driving the objective weight.
    pub priority: Priority,
    /// Permissible spend interval.
    pub range: ExpenseRange,
    /// Whether the expense must be funded in every feasible plan.
    pub mandatory: bool,
    partial_spends: Vec<Amount>,
}

impl Expense {
    /// Create an expense with no spends attached.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
        range: ExpenseRange,
        mandatory: bool,
    ) -> Self {
        Self {
            description: description.into(),
            due_date,
            priority,
            range,
            mandatory,
            partial_spends: Vec::new(),
        }
    }

    /// Per-period spends attached by the last optimization run.
    #[must_use]
    pub fn partial_spends(&self) -> &[Amount] {
        &self.partial_spends
    }

    /// Total spent on this expense, the sum of `partial_spends`.
    #[must_use]
    pub fn cost(&self) -> Amount {
        self.partial_spends.iter().sum()
    }

    /// Signed days from `start` to the due date.
    #[must_use]
    pub fn due_date_in_days(&self, start: NaiveDate) -> i64 {
        (self.due_date - start).num_days()
    }

    /// Attach a per-period spend schedule in one step.
    ///
    /// Validates the max-cost invariant before mutating: the schedule is the
    /// solver's output, so a violation here means the MILP formulation and
    /// the domain disagree.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Overspend`] and leaves the expense unchanged if
    /// the cumulative total would exceed `range.maximum`.
    pub fn apply_spends(&mut self, schedule: Vec<Amount>) -> Result<(), DomainError> {
        let attempted: Amount = self.cost() + schedule.iter().sum::<Amount>();
        if attempted > self.range.maximum {
            return Err(DomainError::Overspend {
                description: self.description.clone(),
                attempted,
                maximum: self.range.maximum,
            });
        }
        self.partial_spends.extend(schedule);
        Ok(())
    }
}
