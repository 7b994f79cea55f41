//! Operations that build a new set out of existing ones. None of them modify
//! their inputs.

use std::ops::{BitAnd, BitOr};

use crate::Equivalence;

use super::Set;

/// The elements of `set` for which `predicate` holds, in `set`'s order.
pub fn filter<T, E, P>(set: &Set<T, E>, mut predicate: P) -> Set<T, E>
where
    T: Clone,
    E: Equivalence<T> + Clone,
    P: FnMut(&T) -> bool,
{
    let mut result = Set::with_equivalence(set.equivalence().clone());
    for item in set {
        if predicate(item) {
            result.add(item.clone());
        }
    }
    result
}

/// Every element of `a` followed by the elements of `b` that `a` lacks.
///
/// The result uses `a`'s equivalence.
pub fn union<T, E>(a: &Set<T, E>, b: &Set<T, E>) -> Set<T, E>
where
    T: Clone,
    E: Equivalence<T> + Clone,
{
    let mut result = Set::with_capacity_and_equivalence(a.len() + b.len(), a.equivalence().clone());
    result.extend(a.iter().cloned());
    result.extend(b.iter().cloned());
    result
}

/// The elements of `a` that are also in `b`, in `a`'s order.
pub fn intersection<T, E>(a: &Set<T, E>, b: &Set<T, E>) -> Set<T, E>
where
    T: Clone,
    E: Equivalence<T> + Clone,
{
    filter(a, |item| b.contains(item))
}

impl<T, E> BitOr for &Set<T, E>
where
    T: Clone,
    E: Equivalence<T> + Clone,
{
    type Output = Set<T, E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        union(self, rhs)
    }
}

impl<T, E> BitAnd for &Set<T, E>
where
    T: Clone,
    E: Equivalence<T> + Clone,
{
    type Output = Set<T, E>;

    fn bitand(self, rhs: Self) -> Self::Output {
        intersection(self, rhs)
    }
}
