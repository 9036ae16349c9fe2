//! Recurring budget available to a portfolio.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Amount;

/// Budget that grows by a fixed increment over a fixed number of periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Amount available in the first period.
    pub initial: Amount,
    /// Increment added at each recurring payment.
    pub recurrent: Amount,
    /// Days between recurring payments.
    pub recurrence: i64,
    /// Days elapsed since the previous recurring payment as of the start date.
    pub last_recurrence: i64,
    /// Number of periods to plan over.
    pub iterations: usize,
}

impl Budget {
    /// Total budget accrued over all periods:
    /// `initial + recurrent * (iterations - 1)`.
    #[must_use]
    pub fn total_budget(&self) -> Amount {
        self.initial + self.recurrent * Decimal::from(self.iterations.saturating_sub(1))
    }
}
