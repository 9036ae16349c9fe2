//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer programming
//! solver. This implementation wraps it using the good_lp crate for ergonomic
//! Rust usage.

use std::time::Duration;

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{ConstraintSense, MilpProblem, MilpSolution, MilpSolver, SolutionStatus};
use crate::error::Result;

/// HiGHS-based MILP solver.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver;

impl HighsSolver {
    /// Create a new HiGHS solver instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MilpSolver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &MilpProblem, time_limit: Duration) -> Result<MilpSolution> {
        let n = problem.num_vars();

        // Handle empty problem
        if n == 0 {
            return Ok(MilpSolution {
                values: vec![],
                objective: Decimal::ZERO,
                status: SolutionStatus::Optimal,
            });
        }

        // Create variables
        let mut vars = variables!();
        let mut var_list = Vec::with_capacity(n);

        for (i, bounds) in problem.bounds.iter().enumerate() {
            let mut v = variable();

            if let Some(lb) = bounds.lower {
                v = v.min(lb.to_f64().unwrap_or(0.0));
            }
            if let Some(ub) = bounds.upper {
                v = v.max(ub.to_f64().unwrap_or(f64::INFINITY));
            }

            if problem.integer_vars.contains(&i) {
                v = v.integer();
            }

            var_list.push(vars.add(v));
        }

        // Build objective function
        let objective: Expression = var_list
            .iter()
            .zip(problem.objective.iter())
            .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
            .sum();

        let mut model = vars.minimise(&objective).using(highs);

        // Soft wall-clock budget in seconds; zero means unlimited.
        let seconds = time_limit.as_secs_f64();
        if seconds > 0.0 {
            model = model.set_time_limit(seconds);
        }

        // Add constraints
        for constr in &problem.constraints {
            let lhs: Expression = var_list
                .iter()
                .zip(constr.coefficients.iter())
                .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
                .sum();

            let rhs = constr.rhs.to_f64().unwrap_or(0.0);

            match constr.sense {
                ConstraintSense::GreaterEqual => {
                    model = model.with(constraint!(lhs >= rhs));
                }
                ConstraintSense::LessEqual => {
                    model = model.with(constraint!(lhs <= rhs));
                }
                ConstraintSense::Equal => {
                    model = model.with(constraint!(lhs == rhs));
                }
            }
        }

        debug!(
            vars = n,
            constraints = problem.constraints.len(),
            time_limit_s = seconds,
            "solving MILP with HiGHS"
        );

        match model.solve() {
            Ok(solution) => {
                let values: Vec<Decimal> = var_list
                    .iter()
                    .map(|v| Decimal::try_from(solution.value(*v)).unwrap_or(Decimal::ZERO))
                    .collect();

                // Re-evaluate objective with the solved values
                let obj_value: f64 = values
                    .iter()
                    .zip(problem.objective.iter())
                    .map(|(v, c)| v.to_f64().unwrap_or(0.0) * c.to_f64().unwrap_or(0.0))
                    .sum();

                Ok(MilpSolution {
                    values,
                    objective: Decimal::try_from(obj_value).unwrap_or(Decimal::ZERO),
                    status: SolutionStatus::Optimal,
                })
            }
            Err(err) => {
                let status = match err {
                    ResolutionError::Infeasible => SolutionStatus::Infeasible,
                    ResolutionError::Unbounded => SolutionStatus::Unbounded,
                    other => {
                        warn!(error = %other, "HiGHS returned an abnormal status");
                        SolutionStatus::Error
                    }
                };
                Ok(MilpSolution {
                    values: vec![],
                    objective: Decimal::ZERO,
                    status,
                })
            }
        }
    }
}
