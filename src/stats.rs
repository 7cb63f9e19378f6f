//! Descriptive statistics over finished numeric distributions.
//!
//! These helpers only read a distribution. Weights are divided by the total
//! on the fly, so callers need not normalize first and their distribution is
//! never rescaled.

use std::collections::BTreeMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::{DiceResult, ExecutionError};

/// Cumulative probability within this distance of one half counts as an exact split.
const MEDIAN_SPLIT_TOLERANCE: f64 = 1e-9;

/// Outcome types that can be read as a real number.
pub trait Numeric {
    /// The outcome as an `f64`.
    fn to_f64(&self) -> f64;
}

macro_rules! impl_numeric {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Total weight, rejecting empty and degenerate distributions.
fn checked_total<T: Eq + Hash>(die: &Distribution<T>) -> DiceResult<f64> {
    if die.is_empty() {
        return Err(ExecutionError::EmptyDistribution.into());
    }
    let total = die.total_weight();
    if total <= 0.0 || !total.is_finite() {
        return Err(ExecutionError::DegenerateNormalization { total }.into());
    }
    Ok(total)
}

/// Expected value.
///
/// # Errors
///
/// `ExecutionError::EmptyDistribution` or `ExecutionError::DegenerateNormalization`.
pub fn average<T: Eq + Hash + Numeric>(die: &Distribution<T>) -> DiceResult<f64> {
    let total = checked_total(die)?;
    Ok(die
        .iter()
        .map(|(outcome, weight)| outcome.to_f64() * weight)
        .sum::<f64>()
        / total)
}

/// Variance around [`average`].
///
/// # Errors
///
/// Same as [`average`].
pub fn variance<T: Eq + Hash + Numeric>(die: &Distribution<T>) -> DiceResult<f64> {
    let total = checked_total(die)?;
    let mean = average(die)?;
    Ok(die
        .iter()
        .map(|(outcome, weight)| {
            let delta = outcome.to_f64() - mean;
            delta * delta * weight
        })
        .sum::<f64>()
        / total)
}

/// Median of the probability mass.
///
/// Outcomes are sorted numerically and the first one whose cumulative
/// probability reaches one half is returned. When the cumulative probability
/// lands exactly on one half, the result is the mean of that outcome and the
/// next one, so a fair d6 has median 3.5. Outcomes of weight zero never
/// take part in the split.
///
/// # Errors
///
/// `ExecutionError::EmptyDistribution` or `ExecutionError::DegenerateNormalization`.
pub fn median<T: Eq + Hash + Numeric>(die: &Distribution<T>) -> DiceResult<f64> {
    let total = checked_total(die)?;
    let mut sorted: Vec<(f64, f64)> = die
        .iter()
        .filter(|&(_, weight)| weight > 0.0)
        .map(|(outcome, weight)| (outcome.to_f64(), weight / total))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut cumulative = 0.0;
    for (i, &(value, probability)) in sorted.iter().enumerate() {
        cumulative += probability;
        if (cumulative - 0.5).abs() <= MEDIAN_SPLIT_TOLERANCE {
            return Ok(sorted.get(i + 1).map_or(value, |&(next, _)| (value + next) / 2.0));
        }
        if cumulative > 0.5 {
            return Ok(value);
        }
    }
    // Only reachable through rounding; the largest outcome holds the remaining mass.
    sorted
        .last()
        .map(|&(value, _)| value)
        .ok_or_else(|| ExecutionError::EmptyDistribution.into())
}

/// Normalized probability of every outcome, ordered by outcome.
///
/// # Errors
///
/// Same as [`average`].
pub fn frequencies<T>(die: &Distribution<T>) -> DiceResult<BTreeMap<T, f64>>
where
    T: Eq + Hash + Ord + Clone,
{
    let total = checked_total(die)?;
    Ok(die
        .iter()
        .map(|(outcome, weight)| (outcome.clone(), weight / total))
        .collect())
}

/// The most likely outcomes (ties within `tolerance` included), ordered.
///
/// # Errors
///
/// Same as [`average`].
pub fn modes<T>(die: &Distribution<T>, tolerance: f64) -> DiceResult<Vec<T>>
where
    T: Eq + Hash + Ord + Clone,
{
    checked_total(die)?;
    let best = die.iter().map(|(_, weight)| weight).fold(f64::NEG_INFINITY, f64::max);
    let mut modes: Vec<T> = die
        .iter()
        .filter(|(_, weight)| best - weight <= tolerance)
        .map(|(outcome, _)| outcome.clone())
        .collect();
    modes.sort();
    Ok(modes)
}

/// One row of a [`Summary`] frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency<T> {
    /// The outcome.
    pub outcome: T,
    /// Its share of the total weight.
    pub probability: f64,
}

/// Serializable digest of a numeric distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary<T> {
    /// Number of distinct outcomes.
    pub outcomes: usize,
    /// Weight before normalization.
    pub total_weight: f64,
    /// See [`average`].
    pub mean: f64,
    /// See [`median`].
    pub median: f64,
    /// See [`variance`].
    pub variance: f64,
    /// Frequency table ordered by outcome.
    pub frequencies: Vec<Frequency<T>>,
}

impl<T> Summary<T>
where
    T: Eq + Hash + Ord + Clone + Numeric,
{
    /// Computes every statistic of `die`.
    ///
    /// # Errors
    ///
    /// Fails on empty or zero-weight distributions, like [`average`].
    pub fn of(die: &Distribution<T>) -> DiceResult<Self> {
        Ok(Self {
            outcomes: die.len(),
            total_weight: die.total_weight(),
            mean: average(die)?,
            median: median(die)?,
            variance: variance(die)?,
            frequencies: frequencies(die)?
                .into_iter()
                .map(|(outcome, probability)| Frequency { outcome, probability })
                .collect(),
        })
    }

    /// Standard deviation, the square root of `variance`.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}
