use std::sync::{Arc, Mutex};
use std::time::Duration;

use outlay::domain::solver::{MilpProblem, MilpSolution, MilpSolver, SolutionStatus};
use outlay::error::Result;
use rust_decimal::Decimal;

/// Deterministic solver double returning a preset verdict.
///
/// Records the shape of the last problem it was handed so tests can assert
/// what the builder produced without depending on a real backend. Clones
/// share the recording.
#[derive(Clone)]
pub struct ScriptedSolver {
    solution: MilpSolution,
    seen: Arc<Mutex<Option<(usize, usize)>>>,
}

impl ScriptedSolver {
    pub fn returning(status: SolutionStatus, values: Vec<Decimal>) -> Self {
        Self {
            solution: MilpSolution {
                values,
                objective: Decimal::ZERO,
                status,
            },
            seen: Arc::new(Mutex::new(None)),
        }
    }

    /// `(num_vars, num_constraints)` of the last solved problem.
    pub fn last_problem_shape(&self) -> Option<(usize, usize)> {
        *self.seen.lock().expect("lock solver shape")
    }
}

impl MilpSolver for ScriptedSolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, problem: &MilpProblem, _time_limit: Duration) -> Result<MilpSolution> {
        *self.seen.lock().expect("lock solver shape") =
            Some((problem.num_vars(), problem.constraints.len()));
        Ok(self.solution.clone())
    }
}
