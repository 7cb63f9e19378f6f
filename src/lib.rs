//! # dicepool - exact dice probability by full enumeration
//!
//! dicepool computes exact discrete distributions produced by combining
//! independent dice under arbitrary user-supplied rules. Nothing is sampled
//! and nothing is derived symbolically: every joint outcome is enumerated,
//! and outcomes that are equal in content are merged as soon as they appear.
//!
//! ## Core Concepts
//!
//! - **Distribution**: a weighted set of mutually exclusive outcomes (a die)
//! - **Pair**: the cross product of two dice through a combine function
//! - **Pool**: a left fold over an ordered sequence of dice with merging after every die
//! - **Interpret / Reroll**: remap outcomes to values or to sub-distributions
//! - **Normalize**: rescale weights to sum to 1
//!
//! ## Usage
//!
//! ```rust
//! use dicepool::{nd, pool, stats};
//!
//! // Count successes (5 or 6) across twelve six-sided dice.
//! let hits = pool(|count, face| count + u32::from(*face >= 5), 0u32, &nd(12, 6)?);
//!
//! assert_eq!(hits.len(), 13);
//! assert!((stats::average(&hits)? - 4.0).abs() < 1e-9);
//! assert_eq!(stats::median(&hits)?, 4.0);
//! # Ok::<(), dicepool::DiceError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Foundations
pub mod config;
pub mod error;
pub mod outcome;
pub mod outcome_map;

// Distribution algebra
pub mod combinator;
pub mod dice;
pub mod distribution;
pub mod pool;
pub mod transform;

// Consumers
pub mod stats;

// Re-export primary types at crate root for convenience
pub use combinator::pair;
pub use config::EngineConfig;
pub use dice::{constant, d, from_weights, nd};
pub use distribution::{normalize, Distribution};
pub use error::{DiceError, DiceResult, ExecutionError, ValidationError};
pub use outcome::Outcome;
pub use outcome_map::{OutcomeMap, Weight};
#[cfg(feature = "parallel")]
pub use pool::par_pool;
pub use pool::{pool, try_pool};
pub use stats::{Numeric, Summary};
pub use transform::{interpret, reroll, reroll_checked};
