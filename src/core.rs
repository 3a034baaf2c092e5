//! Core traits for keysort.
//!
//! This module defines:
//! - [`Sortable`]: length, order predicate and in-place exchange.
//! - [`Split`]: splitting a view of a collection into two disjoint views.
//! - [`NumberSortable`], [`StringSortable`], [`BytesSortable`]: the key a
//!   collection exposes for radix partitioning.
//!
//! The engine addresses elements by index only. It never moves an element out
//! of the collection, it only asks the collection to swap two positions.

/// A random-access collection the engine can reorder in place.
///
/// All indices passed to these methods are within `0..self.len()`. An
/// implementation may panic on anything else.
pub trait Sortable {
    /// Returns the number of elements in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reports whether the element at `i` should sort before the element at `j`.
    ///
    /// Used for small buckets and to order elements whose keys are equal.
    fn less(&self, i: usize, j: usize) -> bool;

    /// Swaps the elements at `i` and `j`.
    fn swap(&mut self, i: usize, j: usize);
}

/// A view that can be divided into two non-overlapping views.
///
/// This is what lets sibling buckets be sorted on different threads: each
/// task owns a view of its own index range and nothing else. Indices in the
/// returned views are relative, so the second view's index 0 is the original
/// index `mid`.
///
/// # Examples
///
/// ```
/// use keysort::core::{Sortable, Split};
///
/// struct Scores<'a>(&'a mut [u32]);
///
/// impl Sortable for Scores<'_> {
///     fn len(&self) -> usize {
///         self.0.len()
///     }
///
///     fn less(&self, i: usize, j: usize) -> bool {
///         self.0[i] < self.0[j]
///     }
///
///     fn swap(&mut self, i: usize, j: usize) {
///         self.0.swap(i, j)
///     }
/// }
///
/// impl Split for Scores<'_> {
///     fn split_at(self, mid: usize) -> (Self, Self) {
///         let (head, tail) = self.0.split_at_mut(mid);
///         (Scores(head), Scores(tail))
///     }
/// }
/// ```
pub trait Split: Sortable + Sized {
    /// Consumes the view and returns views over `[0, mid)` and `[mid, len)`.
    fn split_at(self, mid: usize) -> (Self, Self);
}

/// A collection sorted by a `u64` key.
///
/// Signed integers and floats can be turned into keys with the functions in
/// [`crate::key`].
pub trait NumberSortable: Sortable {
    /// Returns the key for element `i`.
    fn key(&self, i: usize) -> u64;
}

/// A collection sorted by a string key, compared byte-wise.
pub trait StringSortable: Sortable {
    /// Returns the key for element `i`.
    fn key(&self, i: usize) -> &str;
}

/// A collection sorted by a byte-sequence key.
///
/// A key that is a prefix of another sorts first, as with `[u8]` ordering.
pub trait BytesSortable: Sortable {
    /// Returns the key for element `i`.
    fn key(&self, i: usize) -> &[u8];
}
