use thiserror::Error;

use crate::domain::error::DomainError;

/// Input-assembly errors with structured variants.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid date '{value}' for {field}")]
    InvalidDate { field: &'static str, value: String },

    #[error("failed to read input file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse input: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to read expense sheet: {0}")]
    Csv(#[from] csv::Error),
}

/// Optimization-stage errors.
///
/// Both variants are recovered by the orchestrator into a structured failure
/// report; they never escape `run_optimization` as a hard fault.
#[derive(Error, Debug, Clone)]
pub enum OptimizeError {
    #[error("infeasible problem: {0}")]
    Infeasible(String),

    #[error("solver failure: {0}")]
    Solver(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
