//! Portfolio aggregate: the expenses competing for one budget.

use rust_decimal::Decimal;

use super::budget::Budget;
use super::expense::Expense;
use super::money::Amount;

/// An ordered set of expenses and the budget that must cover them.
///
/// A portfolio is a single-use snapshot for one build/solve/map cycle; it is
/// either left untouched (infeasible path) or mutated exactly once when the
/// solution mapper attaches spends.
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Expenses in input order; result records preserve this order.
    pub expenses: Vec<Expense>,
    /// Budget available to the portfolio.
    pub budget: Budget,
}

impl Portfolio {
    /// Create a portfolio from expenses and a budget.
    #[must_use]
    pub fn new(expenses: Vec<Expense>, budget: Budget) -> Self {
        Self { expenses, budget }
    }

    /// Sum of `range.minimum` over mandatory expenses.
    ///
    /// If this exceeds [`Budget::total_budget`], no feasible plan exists and
    /// the problem builder fails before any solve attempt.
    #[must_use]
    pub fn mandatory_total_min_spend(&self) -> Amount {
        self.expenses
            .iter()
            .filter(|expense| expense.mandatory)
            .map(|expense| expense.range.minimum)
            .sum::<Decimal>()
    }
}
