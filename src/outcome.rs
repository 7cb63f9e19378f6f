//! Dynamically shaped outcome values.
//!
//! Most callers use plain Rust value types as outcomes (`i64`, tuples,
//! `Vec<i64>`, their own `#[derive(PartialEq, Eq, Hash)]` structs). When the
//! shape of an outcome is only known at runtime, [`Outcome`] provides a
//! composite value with deep structural equality and hashing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A composite outcome value.
///
/// Equality, ordering and hashing are structural: two lists built
/// independently with the same elements are the same outcome.
///
/// # Examples
///
/// ```
/// use dicepool::Outcome;
///
/// let a = Outcome::from(vec![1i64, 2]);
/// let b = Outcome::List(vec![Outcome::Int(1), Outcome::Int(2)]);
///
/// assert_eq!(a, b);
/// assert!(a.is_list());
/// assert_eq!(a.to_string(), "[1, 2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// No value.
    Null,
    /// A yes/no result.
    Bool(bool),
    /// An integer result.
    Int(i64),
    /// A named result, such as a table entry.
    Text(String),
    /// An ordered collection, compared element by element.
    List(Vec<Outcome>),
}

impl Outcome {
    /// An empty list, the usual seed for history-keeping accumulators.
    #[must_use]
    pub const fn empty_list() -> Self {
        Self::List(Vec::new())
    }

    /// True for `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for `Bool`.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// True for `Int`.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// True for `Text`.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// True for `List`.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The boolean, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The string, if this is a `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The elements, if this is a `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Outcome]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Appends `item`, turning a non-list value into a one- or two-element list.
    #[must_use]
    pub fn push(self, item: impl Into<Outcome>) -> Self {
        let item = item.into();
        match self {
            Self::List(mut items) => {
                items.push(item);
                Self::List(items)
            }
            Self::Null => Self::List(vec![item]),
            other => Self::List(vec![other, item]),
        }
    }

    /// Recursively sorts every list so that order-insensitive histories merge.
    #[must_use]
    pub fn sorted(self) -> Self {
        match self {
            Self::List(items) => {
                let mut items: Vec<Outcome> = items.into_iter().map(Self::sorted).collect();
                items.sort();
                Self::List(items)
            }
            other => other,
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Null
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Outcome {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Outcome {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Outcome {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for Outcome {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Outcome {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<Outcome>> From<Vec<T>> for Outcome {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Outcome>> From<Option<T>> for Outcome {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
