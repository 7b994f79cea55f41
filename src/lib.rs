use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod set;

pub use set::{algebra::filter, algebra::intersection, algebra::union, Set};

/// Decides whether two values are the same element of a [`Set`].
///
/// Implementations must behave as an equivalence relation (reflexive,
/// symmetric and transitive), otherwise a set may end up holding values
/// that compare as duplicates.
pub trait Equivalence<T: ?Sized> {
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

/// Equivalence given by the element type's own `PartialEq`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Equal;

impl<T: PartialEq + ?Sized> Equivalence<T> for Equal {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized, F> Equivalence<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// How to test if two strings are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct MatchingRules {
    pub ignore_caps: bool,
    /// Ignore leading and trailing whitespace.
    pub trim: bool,
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            ignore_caps: false,
            trim: true,
        }
    }
}

impl MatchingRules {
    pub const EXACT: Self = Self {
        ignore_caps: false,
        trim: false,
    };

    pub fn test_match(&self, a: &str, b: &str) -> bool {
        let (a, b) = if self.trim {
            (a.trim(), b.trim())
        } else {
            (a, b)
        };
        if self.ignore_caps {
            unicase::eq(a, b)
        } else {
            a == b
        }
    }
}

impl<T: AsRef<str> + ?Sized> Equivalence<T> for MatchingRules {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self.test_match(a.as_ref(), b.as_ref())
    }
}
