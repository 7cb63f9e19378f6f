//! Outcome transformers: reinterpretation and reroll.

use std::hash::Hash;

use tracing::warn;

use crate::config::EngineConfig;
use crate::distribution::Distribution;
use crate::error::{DiceResult, ValidationError};
use crate::outcome_map::OutcomeMap;

/// Maps every outcome through `f`, merging outcomes that map to equal results.
///
/// Total weight is preserved.
///
/// # Examples
///
/// ```
/// use dicepool::{d, interpret};
///
/// let parity = interpret(|face| face % 2 == 0, &d(6).unwrap());
/// assert_eq!(parity.len(), 2);
/// assert!((parity.get(&true).unwrap() - 0.5).abs() < 1e-12);
/// ```
pub fn interpret<T, U, F>(f: F, die: &Distribution<T>) -> Distribution<U>
where
    T: Eq + Hash,
    U: Eq + Hash,
    F: Fn(&T) -> U,
{
    let mut mapped = OutcomeMap::with_capacity(die.len());
    for (outcome, weight) in die {
        mapped.accumulate(f(outcome), weight);
    }
    Distribution::from(mapped)
}

/// Replaces every outcome with the sub-distribution `f(outcome)`.
///
/// Each branch is scaled by the weight of the outcome it replaces and all
/// branches are flattened into one distribution, merging equal outcomes.
/// Every branch is expected to be normalized; a branch that is not carries
/// its own scale into the result. Use [`reroll_checked`] to reject such
/// branches instead.
///
/// # Examples
///
/// ```
/// use dicepool::{constant, d, reroll};
///
/// let d6 = d(6).unwrap();
/// // Reroll ones once.
/// let rerolled = reroll(|face| if *face == 1 { d6.clone() } else { constant(*face) }, &d6);
/// assert!((rerolled.get(&1).unwrap() - 1.0 / 36.0).abs() < 1e-12);
/// assert!(rerolled.is_normalized(1e-12));
/// ```
pub fn reroll<T, U, F>(f: F, die: &Distribution<T>) -> Distribution<U>
where
    T: Eq + Hash,
    U: Eq + Hash,
    F: Fn(&T) -> Distribution<U>,
{
    let mut flattened = OutcomeMap::with_capacity(die.len());
    for (outcome, weight) in die {
        for (sub_outcome, sub_weight) in f(outcome) {
            flattened.accumulate(sub_outcome, weight * sub_weight);
        }
    }
    Distribution::from(flattened)
}

/// Like [`reroll`], but every branch must sum to 1 within `config.tolerance`.
///
/// # Errors
///
/// Returns `ValidationError::BranchNotNormalized` for the first offending
/// branch, or `ValidationError::InvalidConfig` for an invalid config.
pub fn reroll_checked<T, U, F>(
    config: &EngineConfig,
    f: F,
    die: &Distribution<T>,
) -> DiceResult<Distribution<U>>
where
    T: Eq + Hash,
    U: Eq + Hash,
    F: Fn(&T) -> Distribution<U>,
{
    config.validate()?;
    let mut flattened = OutcomeMap::with_capacity(die.len());
    for (outcome, weight) in die {
        let branch = f(outcome);
        if !branch.is_normalized(config.tolerance) {
            let total = branch.total_weight();
            warn!(total, tolerance = config.tolerance, "reroll branch is not normalized");
            return Err(ValidationError::BranchNotNormalized {
                total,
                tolerance: config.tolerance,
            }
            .into());
        }
        for (sub_outcome, sub_weight) in branch {
            flattened.accumulate(sub_outcome, weight * sub_weight);
        }
    }
    Ok(Distribution::from(flattened))
}

impl<T: Eq + Hash> Distribution<T> {
    /// Method form of [`interpret`].
    pub fn interpret<U, F>(&self, f: F) -> Distribution<U>
    where
        U: Eq + Hash,
        F: Fn(&T) -> U,
    {
        interpret(f, self)
    }

    /// Method form of [`reroll`].
    pub fn reroll<U, F>(&self, f: F) -> Distribution<U>
    where
        U: Eq + Hash,
        F: Fn(&T) -> Distribution<U>,
    {
        reroll(f, self)
    }
}
