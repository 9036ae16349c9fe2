//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and by the spend
//! application boundary. They always propagate to the caller; the
//! orchestration layer never converts them into a soft failure report.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Expense ranges must be ordered intervals over non-negative amounts.
    #[error("expense range must satisfy 0 <= minimum <= target <= maximum, got [{minimum}, {target}, {maximum}]")]
    InvalidRange {
        /// Lower bound of the rejected range.
        minimum: rust_decimal::Decimal,
        /// Target value of the rejected range.
        target: rust_decimal::Decimal,
        /// Upper bound of the rejected range.
        maximum: rust_decimal::Decimal,
    },

    /// An optimization parameter violated its bound.
    #[error("invalid value for {field}: {reason}")]
    InvalidParameter {
        /// Name of the rejected parameter.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Applying a spend schedule would push an expense past its maximum.
    ///
    /// The MILP already enforces the max-cost cap, so reaching this variant
    /// indicates a builder/solver inconsistency rather than bad user input.
    #[error("spends for '{description}' total {attempted}, exceeding maximum {maximum}")]
    Overspend {
        /// Description of the affected expense.
        description: String,
        /// Cumulative spend that was attempted.
        attempted: rust_decimal::Decimal,
        /// Maximum allowed by the expense range.
        maximum: rust_decimal::Decimal,
    },
}
