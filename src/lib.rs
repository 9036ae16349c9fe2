//! Outlay - multi-period expense budget allocation.
//!
//! Given a budget that grows over a fixed number of periods and a set of
//! expenses with spend intervals, due dates, priorities and mandatory flags,
//! this crate decides how much to spend on each expense in each period. The
//! allocation problem is translated into a mixed-integer linear program and
//! delegated to a solver backend.
//!
//! # Modules
//!
//! - [`domain`] - Value types: expenses, ranges, budgets, portfolios
//! - [`domain::solver`] - MILP solver abstraction (HiGHS via good_lp)
//! - [`optimize`] - Problem builder, optimizer and run orchestration
//! - [`input`] - JSON/CSV input assembly into domain objects
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use outlay::optimize::run_optimization_from_json;
//!
//! let report = run_optimization_from_json("input.json").unwrap();
//! if report.is_success() {
//!     for entry in &report.expenses {
//!         println!("{}: {}", entry.expense, entry.total_cost);
//!     }
//! }
//! ```

pub mod domain;
pub mod error;
pub mod input;
pub mod optimize;
