//! Primitive dice constructors.

use std::hash::Hash;

use crate::distribution::Distribution;
use crate::error::{DiceResult, ValidationError};
use crate::outcome_map::Weight;

/// A fair die with faces `1..=sides`, each weighted `1 / sides`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidSides` if `sides <= 0`.
///
/// # Examples
///
/// ```
/// let d6 = dicepool::d(6).unwrap();
/// assert_eq!(d6.len(), 6);
/// assert_eq!(d6.get(&3), Some(1.0 / 6.0));
/// ```
pub fn d(sides: i64) -> DiceResult<Distribution<i64>> {
    if sides <= 0 {
        return Err(ValidationError::InvalidSides { sides }.into());
    }
    #[allow(clippy::cast_precision_loss)]
    let weight = 1.0 / sides as f64;
    Ok((1..=sides).map(|face| (face, weight)).collect())
}

/// `count` independent copies of [`d`]`(sides)`, ready to feed a pool.
///
/// `sides` is validated even when `count` is zero.
///
/// # Errors
///
/// Same as [`d`].
pub fn nd(count: usize, sides: i64) -> DiceResult<Vec<Distribution<i64>>> {
    let die = d(sides)?;
    Ok(vec![die; count])
}

/// The distribution that always produces `outcome`.
#[must_use]
pub fn constant<T: Eq + Hash>(outcome: T) -> Distribution<T> {
    Distribution::constant(outcome)
}

/// Builds a distribution from explicit `(outcome, weight)` pairs.
///
/// Duplicate outcomes are merged by summing their weights. The result is
/// not normalized.
///
/// # Errors
///
/// Returns `ValidationError::InvalidWeight` for a negative, NaN or infinite weight.
pub fn from_weights<T, I>(weights: I) -> DiceResult<Distribution<T>>
where
    T: Eq + Hash,
    I: IntoIterator<Item = (T, Weight)>,
{
    let mut die = Distribution::new();
    for (outcome, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ValidationError::InvalidWeight { weight }.into());
        }
        die.accumulate(outcome, weight);
    }
    Ok(die)
}
