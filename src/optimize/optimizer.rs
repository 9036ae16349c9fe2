//! Build, solve and map one allocation problem.

use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::solver::{HighsSolver, MilpSolution, MilpSolver, SolutionStatus};
use crate::domain::{Amount, Portfolio, SPEND_PRECISION};
use crate::error::{OptimizeError, Result};

use super::builder::{ProblemBuilder, VariableLayout};
use super::params::{OptimizationObjective, OptimizationParameters};

/// Runs a single build -> solve -> map cycle over an exclusively borrowed
/// portfolio.
///
/// The portfolio must not be touched by anything else while the cycle is in
/// flight; on success its expenses are mutated exactly once, on failure they
/// are left untouched.
pub struct Optimizer<'a, S = HighsSolver> {
    portfolio: &'a mut Portfolio,
    parameters: OptimizationParameters,
    start_date: NaiveDate,
    objective: OptimizationObjective,
    solver: S,
}

impl<'a> Optimizer<'a, HighsSolver> {
    /// Create an optimizer over the default HiGHS backend with the default
    /// target-based deviation objective.
    #[must_use]
    pub fn new(
        portfolio: &'a mut Portfolio,
        parameters: OptimizationParameters,
        start_date: NaiveDate,
    ) -> Self {
        Self::with_solver(
            portfolio,
            parameters,
            start_date,
            OptimizationObjective::default(),
            HighsSolver::new(),
        )
    }
}

impl<'a, S: MilpSolver> Optimizer<'a, S> {
    /// Create an optimizer over an explicit solver backend and objective.
    #[must_use]
    pub fn with_solver(
        portfolio: &'a mut Portfolio,
        parameters: OptimizationParameters,
        start_date: NaiveDate,
        objective: OptimizationObjective,
        solver: S,
    ) -> Self {
        Self {
            portfolio,
            parameters,
            start_date,
            objective,
            solver,
        }
    }

    /// Run the feasibility pre-check, build the MILP, solve it and attach the
    /// resulting spend schedules to the portfolio's expenses.
    ///
    /// # Errors
    ///
    /// - [`OptimizeError::Infeasible`] if the pre-check fails (before any
    ///   model is built) or the solver reports no feasible point;
    /// - [`OptimizeError::Solver`] for any other abnormal solver status;
    /// - a domain error if applying a schedule violates an expense maximum,
    ///   which indicates an inconsistency between the model and the domain.
    pub fn solve(&mut self) -> Result<SolutionStatus> {
        let builder = ProblemBuilder::new(
            self.portfolio,
            &self.parameters,
            self.start_date,
            self.objective,
        )?;
        let layout = builder.layout();
        let problem = builder.build();

        // Zero means no limit; so does a value too large for a Duration.
        let time_limit = Duration::try_from_secs_f64(self.parameters.max_time_ms() / 1000.0)
            .unwrap_or(Duration::ZERO);
        let solution = self.solver.solve(&problem, time_limit)?;

        debug!(
            solver = self.solver.name(),
            status = ?solution.status,
            "solver returned"
        );

        match solution.status {
            SolutionStatus::Optimal | SolutionStatus::Feasible => {
                self.apply_solution(layout, &solution)?;
                info!(
                    status = ?solution.status,
                    objective = %solution.objective,
                    "allocation solved"
                );
                Ok(solution.status)
            }
            SolutionStatus::Infeasible | SolutionStatus::Unbounded => Err(OptimizeError::Infeasible(
                "no feasible allocation exists for the given portfolio".to_string(),
            )
            .into()),
            SolutionStatus::Error => Err(OptimizeError::Solver(format!(
                "{} reported an abnormal status",
                self.solver.name()
            ))
            .into()),
        }
    }

    /// Walk solver output back onto the expenses in portfolio order.
    ///
    /// Builds an immutable per-expense schedule of cent-rounded spends first,
    /// then merges each schedule into its expense in one validated step.
    fn apply_solution(&mut self, layout: VariableLayout, solution: &MilpSolution) -> Result<()> {
        let schedules = extract_schedules(layout, solution);
        for (expense, schedule) in self.portfolio.expenses.iter_mut().zip(schedules) {
            expense.apply_spends(schedule)?;
        }
        Ok(())
    }
}

/// Read every `spend[i][j]` from the solution, rounded to cent precision.
fn extract_schedules(layout: VariableLayout, solution: &MilpSolution) -> Vec<Vec<Amount>> {
    (0..layout.expenses)
        .map(|i| {
            (0..layout.periods)
                .map(|j| {
                    solution
                        .values
                        .get(layout.spend(i, j))
                        .copied()
                        .unwrap_or(Decimal::ZERO)
                        .round_dp(SPEND_PRECISION)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn schedules_are_rounded_to_cents() {
        let layout = VariableLayout {
            expenses: 2,
            periods: 2,
        };
        let solution = MilpSolution {
            values: vec![
                dec!(333.333333),
                dec!(0),
                dec!(99.999),
                dec!(500),
                // funded and deviation values, ignored by the mapper
                dec!(1),
                dec!(1),
                dec!(0),
                dec!(0),
            ],
            objective: Decimal::ZERO,
            status: SolutionStatus::Optimal,
        };

        let schedules = extract_schedules(layout, &solution);
        assert_eq!(schedules, vec![
            vec![dec!(333.33), dec!(0)],
            vec![dec!(100.00), dec!(500)],
        ]);
    }

    #[test]
    fn missing_values_map_to_zero() {
        let layout = VariableLayout {
            expenses: 1,
            periods: 2,
        };
        let solution = MilpSolution {
            values: vec![],
            objective: Decimal::ZERO,
            status: SolutionStatus::Optimal,
        };

        let schedules = extract_schedules(layout, &solution);
        assert_eq!(schedules, vec![vec![Decimal::ZERO, Decimal::ZERO]]);
    }
}
