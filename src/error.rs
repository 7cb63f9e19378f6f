//! Error types for dicepool.
//!
//! All errors are strongly typed using thiserror. Every failure is a local
//! precondition violation detected at the call that introduces it, so
//! operations validate first and compute second; no partial results are
//! ever returned alongside an error.

use thiserror::Error;

/// Validation errors raised at the API boundary, before any work is done.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A die was asked for with zero or negative sides.
    #[error("Die must have a positive number of sides, got {sides}")]
    InvalidSides {
        /// The rejected side count.
        sides: i64,
    },

    /// An explicit weight was negative, NaN or infinite.
    #[error("Weight {weight} is not a finite, non-negative number")]
    InvalidWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// A reroll branch did not sum to 1.
    #[error("Reroll branch has total weight {total}, expected 1 (tolerance {tolerance})")]
    BranchNotNormalized {
        /// Total weight of the branch.
        total: f64,
        /// Allowed distance from 1.
        tolerance: f64,
    },

    /// An `EngineConfig` field is out of range or unparsable.
    #[error("Invalid engine configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

/// Errors that occur while computing a distribution or a statistic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    /// Total weight is zero, negative or not finite.
    #[error("Cannot normalize a distribution with total weight {total}")]
    DegenerateNormalization {
        /// The offending total.
        total: f64,
    },

    /// A statistic was asked of a distribution with no outcomes.
    #[error("Distribution has no outcomes")]
    EmptyDistribution,

    /// A checked pool grew past `EngineConfig::max_outcomes`.
    #[error("Outcome limit exceeded after pool step {step} (max: {limit}, actual: {actual})")]
    OutcomeLimitExceeded {
        /// Zero-based index of the die that crossed the limit.
        step: usize,
        /// Configured `max_outcomes`.
        limit: usize,
        /// Distinct outcomes after the step.
        actual: usize,
    },
}

/// Top-level error type for dicepool.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiceError {
    /// Bad input, rejected before any work.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Failure while computing.
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

impl DiceError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}

/// Result type alias for dicepool operations.
pub type DiceResult<T> = Result<T, DiceError>;
