//! Translation of an allocation problem into a MILP.
//!
//! For `N` expenses over `M` periods the model uses:
//!
//! - `spend[i][j]` — continuous in `[0, maximum_i]`, money paid toward
//!   expense `i` in period `j`;
//! - `funded[i]` — binary, whether expense `i` is funded at all;
//! - `deviation[i]` — continuous in `[0, +inf)`, relative deviation of the
//!   total spend on `i` from its chosen target value.
//!
//! The objective minimizes `sum(deviation[i] / priority_i^c) +
//! a * sum(funded[i])` where `c` is the priority exponent and `a` the
//! deviation weight.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::solver::{Constraint, MilpProblem, VariableBounds};
use crate::domain::Portfolio;
use crate::error::OptimizeError;

use super::params::{OptimizationObjective, OptimizationParameters};

/// Flat index layout of the decision variables.
///
/// Spend variables come first in expense-major order, then one funded flag
/// per expense, then one deviation per expense. The solution mapper relies on
/// this layout to walk solver output back onto the portfolio.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VariableLayout {
    /// Number of expenses `N`.
    pub expenses: usize,
    /// Number of periods `M`.
    pub periods: usize,
}

impl VariableLayout {
    pub fn num_vars(&self) -> usize {
        self.expenses * self.periods + 2 * self.expenses
    }

    pub fn spend(&self, expense: usize, period: usize) -> usize {
        expense * self.periods + period
    }

    pub fn funded(&self, expense: usize) -> usize {
        self.expenses * self.periods + expense
    }

    pub fn deviation(&self, expense: usize) -> usize {
        self.expenses * self.periods + self.expenses + expense
    }
}

/// Builds the allocation MILP for one portfolio snapshot.
pub struct ProblemBuilder<'a> {
    portfolio: &'a Portfolio,
    parameters: &'a OptimizationParameters,
    start_date: NaiveDate,
    objective: OptimizationObjective,
    layout: VariableLayout,
}

impl<'a> ProblemBuilder<'a> {
    /// Create a builder, running the feasibility pre-check.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::Infeasible`] if funding every mandatory
    /// expense at its minimum already exceeds the total budget; no model is
    /// built in that case.
    pub fn new(
        portfolio: &'a Portfolio,
        parameters: &'a OptimizationParameters,
        start_date: NaiveDate,
        objective: OptimizationObjective,
    ) -> Result<Self, OptimizeError> {
        let mandatory = portfolio.mandatory_total_min_spend();
        let total = portfolio.budget.total_budget();
        if mandatory > total {
            return Err(OptimizeError::Infeasible(format!(
                "not enough budget for mandatory expenses: need {mandatory}, have {total}"
            )));
        }

        let layout = VariableLayout {
            expenses: portfolio.expenses.len(),
            periods: portfolio.budget.iterations,
        };
        Ok(Self {
            portfolio,
            parameters,
            start_date,
            objective,
            layout,
        })
    }

    pub(crate) fn layout(&self) -> VariableLayout {
        self.layout
    }

    /// Assemble the full MILP: variables, constraints, objective.
    #[must_use]
    pub fn build(&self) -> MilpProblem {
        let mut problem = MilpProblem::new(self.layout.num_vars());

        self.declare_variables(&mut problem);
        self.constrain_max_cost(&mut problem);
        self.constrain_min_cost(&mut problem);
        self.constrain_due_dates(&mut problem);
        self.constrain_period_budgets(&mut problem);
        self.constrain_deviation(&mut problem);
        self.constrain_mandatory(&mut problem);
        self.set_objective(&mut problem);

        debug!(
            expenses = self.layout.expenses,
            periods = self.layout.periods,
            vars = problem.num_vars(),
            constraints = problem.constraints.len(),
            "assembled allocation MILP"
        );

        problem
    }

    fn declare_variables(&self, problem: &mut MilpProblem) {
        for (i, expense) in self.portfolio.expenses.iter().enumerate() {
            for j in 0..self.layout.periods {
                problem.bounds[self.layout.spend(i, j)] =
                    VariableBounds::bounded(Decimal::ZERO, expense.range.maximum);
            }

            let funded = self.layout.funded(i);
            problem.bounds[funded] = VariableBounds::binary();
            problem.integer_vars.push(funded);

            problem.bounds[self.layout.deviation(i)] = VariableBounds::non_negative();
        }
    }

    /// `sum_j spend[i][j] - maximum_i * funded[i] <= 0`: an unfunded expense
    /// gets no spend, a funded one is capped at its maximum.
    fn constrain_max_cost(&self, problem: &mut MilpProblem) {
        for (i, expense) in self.portfolio.expenses.iter().enumerate() {
            let mut coefficients = vec![Decimal::ZERO; self.layout.num_vars()];
            for j in 0..self.layout.periods {
                coefficients[self.layout.spend(i, j)] = Decimal::ONE;
            }
            coefficients[self.layout.funded(i)] = -expense.range.maximum;
            problem
                .constraints
                .push(Constraint::leq(coefficients, Decimal::ZERO));
        }
    }

    /// `sum_j spend[i][j] - minimum_i * funded[i] >= 0`: funding an expense
    /// at all commits to at least its minimum.
    fn constrain_min_cost(&self, problem: &mut MilpProblem) {
        for (i, expense) in self.portfolio.expenses.iter().enumerate() {
            let mut coefficients = vec![Decimal::ZERO; self.layout.num_vars()];
            for j in 0..self.layout.periods {
                coefficients[self.layout.spend(i, j)] = Decimal::ONE;
            }
            coefficients[self.layout.funded(i)] = -expense.range.minimum;
            problem
                .constraints
                .push(Constraint::geq(coefficients, Decimal::ZERO));
        }
    }

    /// Force `spend[i][j] = 0` when the due date of expense `i` falls before
    /// the payment date associated with period `j`.
    ///
    /// The cutoff test is `days_i < delta - delta_0 + (j - 1) * delta` with a
    /// zero-based `j`, so period 0 only blocks expenses already past due at
    /// the start date. The `(j - 1)` offset is kept exactly as the schedule
    /// is defined; see the period-0 pinning test below.
    fn constrain_due_dates(&self, problem: &mut MilpProblem) {
        let delta = self.portfolio.budget.recurrence;
        let delta_0 = self.portfolio.budget.last_recurrence;

        for (i, expense) in self.portfolio.expenses.iter().enumerate() {
            let due_in_days = expense.due_date_in_days(self.start_date);
            for j in 0..self.layout.periods {
                let cutoff = delta - delta_0 + (j as i64 - 1) * delta;
                if due_in_days < cutoff {
                    let mut coefficients = vec![Decimal::ZERO; self.layout.num_vars()];
                    coefficients[self.layout.spend(i, j)] = Decimal::ONE;
                    problem
                        .constraints
                        .push(Constraint::eq(coefficients, Decimal::ZERO));
                }
            }
        }
    }

    /// For every period `k`: `sum_i sum_{j<=k} spend[i][j] <= initial +
    /// recurrent * k`. Spend cannot outrun the budget accrued so far.
    fn constrain_period_budgets(&self, problem: &mut MilpProblem) {
        let budget = &self.portfolio.budget;
        for k in 0..self.layout.periods {
            let mut coefficients = vec![Decimal::ZERO; self.layout.num_vars()];
            for i in 0..self.layout.expenses {
                for j in 0..=k {
                    coefficients[self.layout.spend(i, j)] = Decimal::ONE;
                }
            }
            let accrued = budget.initial + budget.recurrent * Decimal::from(k);
            problem.constraints.push(Constraint::leq(coefficients, accrued));
        }
    }

    /// Two one-sided constraints per expense linearizing
    /// `deviation[i] >= |sum_j spend[i][j] - t_i| / t_i` where `t_i` is the
    /// chosen target value. A fully unfunded expense yields a deviation of at
    /// least 1.
    fn constrain_deviation(&self, problem: &mut MilpProblem) {
        for (i, expense) in self.portfolio.expenses.iter().enumerate() {
            let target = self.objective.target_of(&expense.range);

            let mut lower = vec![Decimal::ZERO; self.layout.num_vars()];
            for j in 0..self.layout.periods {
                lower[self.layout.spend(i, j)] = Decimal::ONE;
            }
            lower[self.layout.deviation(i)] = target;
            problem.constraints.push(Constraint::geq(lower, target));

            let mut upper = vec![Decimal::ZERO; self.layout.num_vars()];
            for j in 0..self.layout.periods {
                upper[self.layout.spend(i, j)] = Decimal::ONE;
            }
            upper[self.layout.deviation(i)] = -target;
            problem.constraints.push(Constraint::leq(upper, target));
        }
    }

    /// Pin `funded[i]` to 1 for mandatory expenses; discretionary ones keep
    /// the free binary range.
    fn constrain_mandatory(&self, problem: &mut MilpProblem) {
        for (i, expense) in self.portfolio.expenses.iter().enumerate() {
            let floor = if expense.mandatory {
                Decimal::ONE
            } else {
                Decimal::ZERO
            };
            let mut coefficients = vec![Decimal::ZERO; self.layout.num_vars()];
            coefficients[self.layout.funded(i)] = Decimal::ONE;
            problem.constraints.push(Constraint::geq(coefficients, floor));
        }
    }

    /// Minimize `sum_i deviation[i] / priority_i^c + a * sum_i funded[i]`.
    fn set_objective(&self, problem: &mut MilpProblem) {
        let exponent = self.parameters.priority_exponent();
        let funding_penalty =
            Decimal::try_from(self.parameters.deviation_weight()).unwrap_or(Decimal::ZERO);

        for (i, expense) in self.portfolio.expenses.iter().enumerate() {
            let weight = expense.priority.weight(exponent);
            problem.objective[self.layout.deviation(i)] =
                Decimal::try_from(weight).unwrap_or(Decimal::ZERO);
            problem.objective[self.layout.funded(i)] = funding_penalty;
        }
    }
}
