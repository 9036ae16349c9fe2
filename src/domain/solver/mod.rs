//! MILP solver capability.
//!
//! Defines the narrow interface the problem builder targets, so the
//! allocation logic has no direct dependency on any particular backend's
//! API and tests can substitute deterministic doubles.
//!
//! # Overview
//!
//! - [`MilpSolver`]: the solve-with-time-limit capability
//! - [`MilpProblem`]: variables (bounds + integrality), constraints, objective
//! - [`MilpSolution`] / [`SolutionStatus`]: backend verdict

mod highs;

pub use highs::HighsSolver;

use std::time::Duration;

use rust_decimal::Decimal;

use crate::error::Result;

/// Mixed-integer linear programming solver.
///
/// Implementations wrap specific backends (HiGHS, CBC, etc.) and provide a
/// unified minimization interface.
///
/// # Implementation Notes
///
/// - The time limit is a soft wall-clock budget: running out of time must
///   surface as a [`SolutionStatus`], never as an `Err`.
/// - Return a value for every declared variable on success.
pub trait MilpSolver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Minimize the objective subject to the problem's constraints.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend faults that prevent producing a
    /// verdict at all; infeasibility and timeouts are reported through
    /// [`MilpSolution::status`].
    fn solve(&self, problem: &MilpProblem, time_limit: Duration) -> Result<MilpSolution>;
}

/// A single linear constraint: `sum(coeffs[i] * x[i]) {>=, <=, =} rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Coefficients for each variable.
    pub coefficients: Vec<Decimal>,
    /// Constraint sense (>=, <=, =).
    pub sense: ConstraintSense,
    /// Right-hand side value.
    pub rhs: Decimal,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub const fn geq(coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub const fn leq(coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub const fn eq(coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<Decimal>,
    /// Upper bound (None = +infinity).
    pub upper: Option<Decimal>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: Some(Decimal::ONE),
        }
    }

    /// Non-negative variable [0, +inf).
    #[must_use]
    pub fn non_negative() -> Self {
        Self::default()
    }

    /// Bounded variable [lower, upper].
    #[must_use]
    pub const fn bounded(lower: Decimal, upper: Decimal) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

/// Mixed-integer linear programming problem definition.
///
/// Represents a minimization problem of the form:
///
/// ```text
/// minimize    c^T * x
/// subject to  constraints
///             bounds on x
///             x[i] integer for i in integer_vars
/// ```
#[derive(Debug, Clone)]
pub struct MilpProblem {
    /// Objective function coefficients.
    ///
    /// The solver minimizes `c^T * x` where `c` is this vector.
    pub objective: Vec<Decimal>,

    /// Linear constraints on the variables.
    pub constraints: Vec<Constraint>,

    /// Lower and upper bounds for each variable.
    pub bounds: Vec<VariableBounds>,

    /// Indices of variables constrained to integer values.
    ///
    /// Variables not in this list are continuous.
    pub integer_vars: Vec<usize>,
}

impl MilpProblem {
    /// Create a problem with the specified number of continuous variables,
    /// zero objective coefficients and default bounds.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            objective: vec![Decimal::ZERO; num_vars],
            constraints: Vec::new(),
            bounds: vec![VariableBounds::default(); num_vars],
            integer_vars: Vec::new(),
        }
    }

    /// Return the number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }
}

/// Solution to a MILP problem.
#[derive(Debug, Clone)]
pub struct MilpSolution {
    /// Values for each decision variable; empty unless the status is a
    /// success.
    pub values: Vec<Decimal>,

    /// Objective function value at the solution.
    pub objective: Decimal,

    /// Termination status of the solver.
    pub status: SolutionStatus,
}

impl MilpSolution {
    /// Return `true` if the solver produced a usable point.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Termination status of an optimization solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Solver found a globally optimal solution.
    Optimal,

    /// Time limit hit; the best point found so far is valid but may be
    /// suboptimal.
    Feasible,

    /// No feasible solution exists.
    Infeasible,

    /// Objective function is unbounded.
    Unbounded,

    /// Solver encountered an internal error.
    Error,
}

impl SolutionStatus {
    /// Return `true` for statuses that carry a usable solution.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }

    /// Stable integer code for the result record (0 = optimal).
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Optimal => 0,
            Self::Feasible => 1,
            Self::Infeasible => 2,
            Self::Unbounded => 3,
            Self::Error => 4,
        }
    }
}
