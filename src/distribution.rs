//! Discrete distributions ("dice").
//!
//! A [`Distribution`] is a weighted set of mutually exclusive outcomes. It is
//! a plain owned value: every combinator takes its inputs by reference and
//! returns a fresh distribution, so the same die can feed any number of
//! independent combinations. [`Distribution::normalize`] is the only
//! operation that rescales weights in place.

use std::hash::Hash;

use tracing::trace;

use crate::error::{DiceResult, ExecutionError};
use crate::outcome_map::{Iter, OutcomeMap, Weight};

/// A weighted enumeration of mutually exclusive outcomes.
///
/// Weights need not sum to 1 until [`Distribution::normalize`] is called.
///
/// # Examples
///
/// ```
/// use dicepool::Distribution;
///
/// let mut coin = Distribution::new();
/// coin.set("heads", 1.0);
/// coin.set("tails", 3.0);
/// coin.normalize().unwrap();
///
/// assert_eq!(coin.get(&"tails"), Some(0.75));
/// assert_eq!(coin.get(&"edge"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<T: Eq + Hash> {
    outcomes: OutcomeMap<T>,
}

impl<T: Eq + Hash> Default for Distribution<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> From<OutcomeMap<T>> for Distribution<T> {
    fn from(outcomes: OutcomeMap<T>) -> Self {
        Self { outcomes }
    }
}

impl<T: Eq + Hash> Distribution<T> {
    /// Creates a distribution with no outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: OutcomeMap::new(),
        }
    }

    /// The distribution that always produces `outcome`.
    #[must_use]
    pub fn constant(outcome: T) -> Self {
        let mut outcomes = OutcomeMap::with_capacity(1);
        outcomes.set(outcome, 1.0);
        Self { outcomes }
    }

    /// Weight recorded for `outcome`; `None` means the outcome never occurs,
    /// as opposed to `Some(0.0)` for a tracked zero-weight outcome.
    #[must_use]
    pub fn get(&self, outcome: &T) -> Option<Weight> {
        self.outcomes.get(outcome)
    }

    /// Overwrites the weight of `outcome`, inserting it if absent.
    pub fn set(&mut self, outcome: T, weight: Weight) {
        self.outcomes.set(outcome, weight);
    }

    /// Adds `weight` to `outcome`, merging with any equal outcome already present.
    pub fn accumulate(&mut self, outcome: T, weight: Weight) {
        self.outcomes.accumulate(outcome, weight);
    }

    /// True if `outcome` is tracked, even with weight 0.
    #[must_use]
    pub fn contains(&self, outcome: &T) -> bool {
        self.outcomes.contains(outcome)
    }

    /// Number of distinct outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True if no outcome is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Every `(outcome, weight)` record, in unspecified order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.outcomes.iter()
    }

    /// Alias of [`Distribution::iter`].
    pub fn entries(&self) -> Iter<'_, T> {
        self.iter()
    }

    /// Every distinct outcome, in unspecified order.
    pub fn outcomes(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(outcome, _)| outcome)
    }

    /// Records sorted by outcome.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&T, Weight)>
    where
        T: Ord,
    {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.outcomes.total()
    }

    /// True if the weights sum to 1 within `tolerance`.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_weight() - 1.0).abs() <= tolerance
    }

    /// Weight of `outcome` relative to the total weight.
    ///
    /// Returns `None` if the outcome has no record or the total is zero.
    #[must_use]
    pub fn probability(&self, outcome: &T) -> Option<f64> {
        let weight = self.get(outcome)?;
        let total = self.total_weight();
        (total > 0.0).then(|| weight / total)
    }

    /// Rescales every weight so the total is 1, in place.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::DegenerateNormalization` if the total weight is
    /// zero or not finite. The distribution is left untouched in that case.
    pub fn normalize(&mut self) -> DiceResult<&mut Self> {
        let total = self.total_weight();
        if total <= 0.0 || !total.is_finite() {
            return Err(ExecutionError::DegenerateNormalization { total }.into());
        }
        trace!(outcomes = self.len(), total, "normalizing distribution");
        for weight in self.outcomes.weights_mut() {
            *weight /= total;
        }
        Ok(self)
    }

    /// Consuming form of [`Distribution::normalize`].
    ///
    /// # Errors
    ///
    /// Same as [`Distribution::normalize`].
    pub fn normalized(mut self) -> DiceResult<Self> {
        self.normalize()?;
        Ok(self)
    }

    /// True if both distributions hold the same outcomes with weights within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.len() == other.len()
            && self.iter().all(|(outcome, weight)| {
                other
                    .get(outcome)
                    .is_some_and(|theirs| (theirs - weight).abs() <= tolerance)
            })
    }

    /// The underlying outcome map.
    #[must_use]
    pub fn as_map(&self) -> &OutcomeMap<T> {
        &self.outcomes
    }

    /// Unwraps the underlying map.
    #[must_use]
    pub fn into_map(self) -> OutcomeMap<T> {
        self.outcomes
    }
}

/// Rescales `die` to total weight 1 in place and returns it.
///
/// # Errors
///
/// See [`Distribution::normalize`].
pub fn normalize<T: Eq + Hash>(die: &mut Distribution<T>) -> DiceResult<&mut Distribution<T>> {
    die.normalize()
}

impl<'a, T: Eq + Hash> IntoIterator for &'a Distribution<T> {
    type Item = (&'a T, Weight);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Eq + Hash> IntoIterator for Distribution<T> {
    type Item = (T, Weight);
    type IntoIter = <OutcomeMap<T> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<T: Eq + Hash> FromIterator<(T, Weight)> for Distribution<T> {
    fn from_iter<I: IntoIterator<Item = (T, Weight)>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash> Extend<(T, Weight)> for Distribution<T> {
    fn extend<I: IntoIterator<Item = (T, Weight)>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}
