//! Monetary type for budget and spend amounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amount of money represented as a Decimal for precision.
pub type Amount = Decimal;

/// Currency-cent precision used when extracting solver output.
pub const SPEND_PRECISION: u32 = 2;

/// Sentinel for "no effective upper bound" on a spend amount.
///
/// Used where an input leaves a maximum open. Large enough to never bind a
/// realistic budget, small enough that its `-maximum` coefficient in the
/// max-cost cap keeps the MILP well scaled.
pub const UNBOUNDED_AMOUNT: Amount = dec!(1_000_000_000_000);
