//! Pool aggregation: folding an ordered sequence of dice into one distribution.
//!
//! The fold keeps a running distribution over partial accumulator values,
//! seeded with `{initial: 1}`. Each die expands every partial value by each
//! of its outcomes and equal results merge immediately, so the running size
//! is bounded by the number of distinct accumulator values rather than by the
//! product of the dice's side counts. A collapsing accumulator (sum, count,
//! top-k) keeps pools of hundreds of dice tractable; a history-keeping one
//! (every roll, sorted) stays combinatorial.
//!
//! Dice are always folded strictly left to right. The callback receives each
//! partial value by value as an independent clone, so mutating it in place
//! can never leak into a sibling branch.

use std::hash::Hash;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::distribution::Distribution;
use crate::error::{DiceResult, ExecutionError};
use crate::outcome_map::OutcomeMap;

/// Folds `accumulate` over every joint outcome of `dice`, starting from `initial`.
///
/// An empty `dice` sequence yields `{initial: 1}`.
///
/// # Examples
///
/// ```
/// use dicepool::{nd, pool};
///
/// let two_d6 = pool(|sum, face| sum + face, 0i64, &nd(2, 6).unwrap());
///
/// assert_eq!(two_d6.len(), 11);
/// assert!((two_d6.get(&7).unwrap() - 6.0 / 36.0).abs() < 1e-12);
/// ```
pub fn pool<'a, T, U, F, I>(accumulate: F, initial: U, dice: I) -> Distribution<U>
where
    T: Eq + Hash + 'a,
    U: Clone + Eq + Hash,
    F: Fn(U, &T) -> U,
    I: IntoIterator<Item = &'a Distribution<T>>,
{
    let mut running = seed(initial);
    let mut steps = 0usize;
    for (step, die) in dice.into_iter().enumerate() {
        running = fold_step(&running, die, &accumulate);
        log_step(step, die.len(), running.len());
        steps += 1;
    }
    debug!(dice = steps, outcomes = running.len(), "pool complete");
    Distribution::from(running)
}

/// Like [`pool`], but fails instead of growing past `config.max_outcomes`.
///
/// The limit is checked after every step, so the error is raised as soon as
/// the running distribution first exceeds it.
///
/// # Errors
///
/// Returns `ValidationError::InvalidConfig` for an invalid config and
/// `ExecutionError::OutcomeLimitExceeded` when the limit is crossed.
pub fn try_pool<'a, T, U, F, I>(
    config: &EngineConfig,
    accumulate: F,
    initial: U,
    dice: I,
) -> DiceResult<Distribution<U>>
where
    T: Eq + Hash + 'a,
    U: Clone + Eq + Hash,
    F: Fn(U, &T) -> U,
    I: IntoIterator<Item = &'a Distribution<T>>,
{
    config.validate()?;
    let mut running = seed(initial);
    let mut steps = 0usize;
    for (step, die) in dice.into_iter().enumerate() {
        running = fold_step(&running, die, &accumulate);
        log_step(step, die.len(), running.len());
        check_limit(config, step, running.len())?;
        steps += 1;
    }
    debug!(dice = steps, outcomes = running.len(), "pool complete");
    Ok(Distribution::from(running))
}

/// Parallel form of [`try_pool`].
///
/// Each step's cross product is split across the rayon thread pool, with
/// per-thread partial maps merged by summing weights. Steps with fewer than
/// `config.parallel_threshold` pairs run on the calling thread. Steps are
/// still applied in input order, so the callback sees the same fold as in
/// [`pool`]; only the floating-point summation order may differ.
///
/// # Errors
///
/// Same as [`try_pool`].
#[cfg(feature = "parallel")]
pub fn par_pool<'a, T, U, F, I>(
    config: &EngineConfig,
    accumulate: F,
    initial: U,
    dice: I,
) -> DiceResult<Distribution<U>>
where
    T: Eq + Hash + Sync + 'a,
    U: Clone + Eq + Hash + Send + Sync,
    F: Fn(U, &T) -> U + Sync,
    I: IntoIterator<Item = &'a Distribution<T>>,
{
    config.validate()?;
    let mut running = seed(initial);
    let mut steps = 0usize;
    for (step, die) in dice.into_iter().enumerate() {
        let pairs = running.len().saturating_mul(die.len());
        running = if pairs < config.parallel_threshold {
            fold_step(&running, die, &accumulate)
        } else {
            par_fold_step(&running, die, &accumulate)
        };
        log_step(step, die.len(), running.len());
        check_limit(config, step, running.len())?;
        steps += 1;
    }
    debug!(dice = steps, outcomes = running.len(), "parallel pool complete");
    Ok(Distribution::from(running))
}

fn seed<U: Eq + Hash>(initial: U) -> OutcomeMap<U> {
    let mut running = OutcomeMap::with_capacity(1);
    running.set(initial, 1.0);
    running
}

fn fold_step<T, U, F>(
    running: &OutcomeMap<U>,
    die: &Distribution<T>,
    accumulate: &F,
) -> OutcomeMap<U>
where
    T: Eq + Hash,
    U: Clone + Eq + Hash,
    F: Fn(U, &T) -> U,
{
    let mut next = OutcomeMap::with_capacity(running.len());
    for (partial, partial_weight) in running.iter() {
        for (outcome, outcome_weight) in die {
            next.accumulate(accumulate(partial.clone(), outcome), partial_weight * outcome_weight);
        }
    }
    next
}

#[cfg(feature = "parallel")]
fn par_fold_step<T, U, F>(
    running: &OutcomeMap<U>,
    die: &Distribution<T>,
    accumulate: &F,
) -> OutcomeMap<U>
where
    T: Eq + Hash + Sync,
    U: Clone + Eq + Hash + Send + Sync,
    F: Fn(U, &T) -> U + Sync,
{
    use rayon::prelude::*;

    let partials: Vec<_> = running.iter().collect();
    let faces: Vec<_> = die.iter().collect();
    partials
        .par_iter()
        .fold(OutcomeMap::new, |mut acc, &(partial, partial_weight)| {
            for &(outcome, outcome_weight) in &faces {
                acc.accumulate(
                    accumulate(partial.clone(), outcome),
                    partial_weight * outcome_weight,
                );
            }
            acc
        })
        .reduce(OutcomeMap::new, |mut a, b| {
            a.merge(b);
            a
        })
}

fn log_step(step: usize, faces: usize, outcomes: usize) {
    debug!(step, faces, outcomes, "pool step");
}

fn check_limit(config: &EngineConfig, step: usize, actual: usize) -> Result<(), ExecutionError> {
    if actual > config.max_outcomes {
        warn!(step, limit = config.max_outcomes, actual, "pool outcome limit exceeded");
        return Err(ExecutionError::OutcomeLimitExceeded {
            step,
            limit: config.max_outcomes,
            actual,
        });
    }
    Ok(())
}
