//! Allocation problem construction, solving and orchestration.

mod builder;
mod optimizer;
mod params;
mod run;

pub use builder::ProblemBuilder;
pub use optimizer::Optimizer;
pub use params::{OptimizationObjective, OptimizationParameters};
pub use run::{
    run_optimization, run_optimization_from_json, run_optimization_from_raw, ExpenseReport,
    RunReport,
};
