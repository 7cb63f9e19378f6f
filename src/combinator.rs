//! Pairwise combination of two independent distributions.

use std::hash::Hash;

use crate::distribution::Distribution;
use crate::outcome_map::OutcomeMap;

/// Combines two independent distributions through `combine`.
///
/// Every pair `(a, b)` of the cross product contributes `weight(a) * weight(b)`
/// to `combine(a, b)`; equal results merge. The total weight of the result is
/// the product of the input totals. Nothing is assumed about `combine` being
/// commutative or associative.
///
/// # Examples
///
/// ```
/// use dicepool::{d, pair};
///
/// let d4 = d(4).unwrap();
/// let d6 = d(6).unwrap();
/// let highest = pair(|a, b| *a.max(b), &d4, &d6);
///
/// assert_eq!(highest.len(), 6);
/// assert!((highest.get(&6).unwrap() - 4.0 / 24.0).abs() < 1e-12);
/// ```
pub fn pair<A, B, C, F>(
    combine: F,
    left: &Distribution<A>,
    right: &Distribution<B>,
) -> Distribution<C>
where
    A: Eq + Hash,
    B: Eq + Hash,
    C: Eq + Hash,
    F: Fn(&A, &B) -> C,
{
    let mut combined = OutcomeMap::with_capacity(left.len().max(right.len()));
    for (a, wa) in left {
        for (b, wb) in right {
            combined.accumulate(combine(a, b), wa * wb);
        }
    }
    Distribution::from(combined)
}

impl<A: Eq + Hash> Distribution<A> {
    /// Method form of [`pair`] with `self` on the left.
    pub fn pair<B, C, F>(&self, other: &Distribution<B>, combine: F) -> Distribution<C>
    where
        B: Eq + Hash,
        C: Eq + Hash,
        F: Fn(&A, &B) -> C,
    {
        pair(combine, self, other)
    }
}
