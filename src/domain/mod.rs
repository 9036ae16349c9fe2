//! Solver-agnostic domain logic.

mod budget;
mod expense;
mod money;
mod portfolio;

pub mod error;
pub mod solver;

// Core domain types
pub use budget::Budget;
pub use error::DomainError;
pub use expense::{Expense, ExpenseRange, Priority};
pub use money::{Amount, SPEND_PRECISION, UNBOUNDED_AMOUNT};
pub use portfolio::Portfolio;
