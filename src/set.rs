use std::{
    collections::TryReserveError,
    fmt::{self, Display},
    marker::PhantomData,
    mem,
    ops::Index,
    slice,
};

use serde::{
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{Equal, Equivalence};

use self::storage::{alloc_failed, grown_capacity, shrunk_capacity, Buffer};

pub mod algebra;
pub mod loading;
mod saving;
mod storage;

/// An unordered collection without duplicates.
///
/// Two values are duplicates when `E` says they are equivalent. Membership
/// is a linear scan, so this is meant for modest sizes and for element types
/// that cannot be hashed or ordered the way the caller wants to compare
/// them.
///
/// Elements are kept in insertion order until a removal moves the last
/// element into the freed slot.
#[derive(Debug)]
pub struct Set<T, E = Equal> {
    buffer: Buffer<T>,
    equivalence: E,
}

impl<T, E: Default> Default for Set<T, E> {
    fn default() -> Self {
        Self::with_equivalence(E::default())
    }
}

impl<T, E: Default> Set<T, E> {
    /// Creates an empty set. Nothing is allocated until the first `add`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_equivalence(capacity, E::default())
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            buffer: Buffer::try_with_capacity(capacity)?,
            equivalence: E::default(),
        })
    }
}

impl<T, E> Set<T, E> {
    pub fn with_equivalence(equivalence: E) -> Self {
        Self {
            buffer: Buffer::default(),
            equivalence,
        }
    }

    pub fn with_capacity_and_equivalence(capacity: usize, equivalence: E) -> Self {
        Self {
            buffer: Buffer::with_capacity(capacity),
            equivalence,
        }
    }

    /// Number of elements in the set.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn equivalence(&self) -> &E {
        &self.equivalence
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.buffer.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buffer.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    /// Exchanges the contents and equivalence of two sets without copying
    /// any element.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Drops every element and releases the storage.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl<T, E: Equivalence<T>> Set<T, E> {
    fn position(&self, value: &T) -> Option<usize> {
        self.buffer
            .iter()
            .position(|item| self.equivalence.equivalent(value, item))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.position(value).is_some()
    }

    /// Adds `value` unless an equivalent element is already present.
    ///
    /// Returns whether the set changed. Running out of memory while growing
    /// is fatal; see [`Set::try_add`] to handle it instead.
    pub fn add(&mut self, value: T) -> bool {
        match self.try_add(value) {
            Ok(added) => added,
            Err(err) => alloc_failed(err),
        }
    }

    /// Like [`Set::add`], but reports allocation failure.
    ///
    /// When growing fails the set is left empty.
    pub fn try_add(&mut self, value: T) -> Result<bool, TryReserveError> {
        if self.contains(&value) {
            return Ok(false);
        }
        if self.buffer.is_full() {
            self.buffer.resize(grown_capacity(self.buffer.capacity()))?;
        }
        match self.buffer.push(value) {
            Ok(()) => Ok(true),
            Err(_) => unreachable!("buffer has a free slot after growing"),
        }
    }

    /// Removes the element equivalent to `value`, moving the last element
    /// into its slot.
    ///
    /// Returns whether the set changed.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(index) = self.position(value) else {
            return false;
        };
        self.buffer.swap_remove(index);
        if let Some(capacity) = shrunk_capacity(self.buffer.capacity(), self.buffer.len()) {
            if let Err(err) = self.buffer.resize(capacity) {
                alloc_failed(err);
            }
        }
        true
    }
}

impl<T, E> Index<usize> for Set<T, E> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        let len = self.len();
        self.get(index)
            .unwrap_or_else(|| panic!("index {index} out of range for set of {len} elements"))
    }
}

impl<T, E: Equivalence<T>> PartialEq for Set<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T, E: Equivalence<T>> Eq for Set<T, E> {}

impl<T: Clone, E: Clone> Clone for Set<T, E> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            equivalence: self.equivalence.clone(),
        }
    }

    /// Builds the whole copy first, so `self` is untouched if that fails.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T, E: Equivalence<T>> Extend<T> for Set<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T, E: Equivalence<T> + Default> FromIterator<T> for Set<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, E> IntoIterator for &'a Set<T, E> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, E> IntoIterator for Set<T, E> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.into_vec().into_iter()
    }
}

/// The element count followed by every element in parentheses, e.g.
/// `2 (x) (y)`.
impl<T: Display, E> Display for Set<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.len())?;
        for item in self {
            write!(f, " ({item})")?;
        }
        Ok(())
    }
}

impl<T: Serialize, E> Serialize for Set<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T, E> Deserialize<'de> for Set<T, E>
where
    T: Deserialize<'de>,
    E: Equivalence<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor<T, E>(PhantomData<(T, E)>);

        impl<'de, T, E> Visitor<'de> for SetVisitor<T, E>
        where
            T: Deserialize<'de>,
            E: Equivalence<T> + Default,
        {
            type Value = Set<T, E>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sequence of set elements")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut set = Set::new();
                while let Some(value) = seq.next_element()? {
                    set.add(value);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor(PhantomData))
    }
}
