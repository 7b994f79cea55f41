use std::{collections::TryReserveError, mem, ops::Deref};

/// Capacity to grow to when a full buffer needs one more slot.
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        1
    } else {
        capacity.saturating_mul(2)
    }
}

/// Capacity to shrink to after a removal left `len` elements, if any.
///
/// Never smaller than `len`.
pub(crate) fn shrunk_capacity(capacity: usize, len: usize) -> Option<usize> {
    // Same as `capacity * 3 / 4` without overflowing.
    let three_quarters = capacity / 4 * 3 + capacity % 4 * 3 / 4;
    (len <= capacity / 2).then(|| three_quarters.max(len))
}

/// Contiguous storage with an exact, explicitly managed capacity.
///
/// `Vec` is free to over-allocate, so the number of usable slots is tracked
/// here and `push` refuses to go past it.
#[derive(Debug)]
pub(crate) struct Buffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }
}

impl<T> Buffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(buffer) => buffer,
            Err(err) => alloc_failed(err),
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self { items, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Appends `value`, or gives it back if every slot is taken.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.items.push(value);
        Ok(())
    }

    /// Removes the element at `index` by moving the last element into its
    /// slot.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    /// Moves the elements into a buffer with exactly `capacity` slots.
    ///
    /// On allocation failure the buffer is left empty.
    pub fn resize(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        assert!(
            capacity >= self.items.len(),
            "cannot resize a buffer holding {} elements to {capacity} slots",
            self.items.len()
        );
        let mut replacement = match Self::try_with_capacity(capacity) {
            Ok(replacement) => replacement,
            Err(err) => {
                self.clear();
                return Err(err);
            }
        };
        replacement.items.append(&mut self.items);
        mem::swap(self, &mut replacement);
        Ok(())
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Drops every element and releases the allocation.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T: Clone> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity);
        copy.items.extend_from_slice(&self.items);
        copy
    }
}

pub(crate) fn alloc_failed(err: TryReserveError) -> ! {
    panic!("set storage allocation failed: {err}")
}
