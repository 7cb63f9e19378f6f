//! Weighted outcome container.
//!
//! [`OutcomeMap`] maps outcomes to weights. Keys are compared by value
//! (`Eq + Hash`), so outcomes that are equal in content collapse into one
//! record no matter where they were built. Weights are not validated here.

use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

/// Probability weight of one outcome. Not required to be normalized.
pub type Weight = f64;

/// A mapping from structurally unique outcomes to weights.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeMap<T: Eq + Hash> {
    weights: HashMap<T, Weight>,
}

impl<T: Eq + Hash> Default for OutcomeMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> OutcomeMap<T> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` outcomes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            weights: HashMap::with_capacity(capacity),
        }
    }

    /// Weight recorded for `outcome`, or `None` if it has no record.
    #[must_use]
    pub fn get(&self, outcome: &T) -> Option<Weight> {
        self.weights.get(outcome).copied()
    }

    /// Overwrites the weight of `outcome`, inserting it if absent.
    pub fn set(&mut self, outcome: T, weight: Weight) {
        self.weights.insert(outcome, weight);
    }

    /// Adds `weight` to the record for `outcome`, starting from zero if absent.
    pub fn accumulate(&mut self, outcome: T, weight: Weight) {
        *self.weights.entry(outcome).or_insert(0.0) += weight;
    }

    /// Folds every record of `other` into `self` by [`OutcomeMap::accumulate`].
    pub fn merge(&mut self, other: Self) {
        if self.weights.len() < other.weights.len() {
            let smaller = std::mem::replace(self, other);
            self.merge(smaller);
            return;
        }
        for (outcome, weight) in other.weights {
            self.accumulate(outcome, weight);
        }
    }

    /// True if `outcome` has a record, even with weight 0.
    #[must_use]
    pub fn contains(&self, outcome: &T) -> bool {
        self.weights.contains_key(outcome)
    }

    /// Number of distinct outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> Weight {
        self.weights.values().sum()
    }

    /// Iterates over `(outcome, weight)` records in unspecified order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.weights.iter(),
        }
    }

    /// Mutable access to every weight, used by normalization.
    pub(crate) fn weights_mut(&mut self) -> hash_map::ValuesMut<'_, T, Weight> {
        self.weights.values_mut()
    }
}

/// Borrowing iterator over an [`OutcomeMap`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: hash_map::Iter<'a, T, Weight>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(outcome, weight)| (outcome, *weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T: Eq + Hash> IntoIterator for OutcomeMap<T> {
    type Item = (T, Weight);
    type IntoIter = hash_map::IntoIter<T, Weight>;

    fn into_iter(self) -> Self::IntoIter {
        self.weights.into_iter()
    }
}

impl<T: Eq + Hash> FromIterator<(T, Weight)> for OutcomeMap<T> {
    fn from_iter<I: IntoIterator<Item = (T, Weight)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<T: Eq + Hash> Extend<(T, Weight)> for OutcomeMap<T> {
    fn extend<I: IntoIterator<Item = (T, Weight)>>(&mut self, iter: I) {
        for (outcome, weight) in iter {
            self.accumulate(outcome, weight);
        }
    }
}
