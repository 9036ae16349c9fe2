//! Tuning knobs for the allocation problem.

use serde::Deserialize;

use crate::domain::{Amount, DomainError, ExpenseRange};

/// Which field of an [`ExpenseRange`] is treated as the ideal amount when
/// scoring deviation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationObjective {
    /// Deviate from `range.target` (the default).
    #[default]
    Target,
    /// Deviate from `range.minimum`.
    Min,
    /// Deviate from `range.maximum`.
    Max,
}

impl OptimizationObjective {
    /// The range field this objective scores deviation against.
    #[must_use]
    pub fn target_of(self, range: &ExpenseRange) -> Amount {
        match self {
            Self::Target => range.target,
            Self::Min => range.minimum,
            Self::Max => range.maximum,
        }
    }
}

/// Validated optimization parameters.
///
/// `deviation_weight` is a per-expense penalty for choosing to fund a
/// discretionary expense at all. Raising it makes the optimizer prefer to
/// leave non-mandatory expenses unfunded even when budget is available; with
/// a weight of zero funding decisions are driven purely by deviation cost and
/// feasibility. This is an intentional knob, not a bug.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationParameters {
    priority_exponent: f64,
    deviation_weight: f64,
    max_time_ms: f64,
}

impl OptimizationParameters {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] if `priority_exponent < 1`,
    /// `deviation_weight < 0` or `max_time_ms < 0`.
    pub fn try_new(
        priority_exponent: f64,
        deviation_weight: f64,
        max_time_ms: f64,
    ) -> Result<Self, DomainError> {
        if !(priority_exponent >= 1.0) {
            return Err(DomainError::InvalidParameter {
                field: "priority_exponent",
                reason: format!("must be >= 1, got {priority_exponent}"),
            });
        }
        if !(deviation_weight >= 0.0) {
            return Err(DomainError::InvalidParameter {
                field: "deviation_weight",
                reason: format!("must be >= 0, got {deviation_weight}"),
            });
        }
        if !(max_time_ms >= 0.0) {
            return Err(DomainError::InvalidParameter {
                field: "max_time",
                reason: format!("must be >= 0, got {max_time_ms}"),
            });
        }
        Ok(Self {
            priority_exponent,
            deviation_weight,
            max_time_ms,
        })
    }

    /// Exponent applied to the priority ordinal in the deviation weight.
    #[must_use]
    pub const fn priority_exponent(&self) -> f64 {
        self.priority_exponent
    }

    /// Objective penalty for funding a discretionary expense.
    #[must_use]
    pub const fn deviation_weight(&self) -> f64 {
        self.deviation_weight
    }

    /// Soft wall-clock solve budget in milliseconds; zero means unlimited.
    #[must_use]
    pub const fn max_time_ms(&self) -> f64 {
        self.max_time_ms
    }
}
