//! # keysort
//!
//! `keysort` sorts random-access collections without pairwise comparison. Each
//! element exposes a key (a `u64`, a string or a byte sequence) and the
//! collection is partitioned on key bytes, most significant first, in place.
//!
//! ## Key Features
//!
//! - **In-Place**: elements are only ever swapped. Partitioning uses an
//!   American-flag pass with a 257-entry histogram, no buffer proportional to
//!   the input.
//! - **Any Collection**: the engine talks to data through the [`Sortable`]
//!   trait family, so custom containers (struct-of-arrays, index tables, ...)
//!   sort without copying.
//! - **Numeric Keys**: [`key`] maps signed integers and floats to unsigned keys
//!   with the same order. NaNs sort last.
//! - **Parallel**: large sibling buckets are sorted as separate rayon tasks.
//!   The call returns only once every task is done.
//! - **Adaptive**: small buckets, and buckets whose keys are all equal, are
//!   finished with a comparison sort driven by [`Sortable::less`].
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! let mut data = vec![5, -3, 0, -100, 42];
//! keysort::int32s(&mut data);
//! assert_eq!(data, vec![-100, -3, 0, 5, 42]);
//!
//! let mut data = vec!["banana", "apple", "cherry"];
//! keysort::strings(&mut data);
//! assert_eq!(data, vec!["apple", "banana", "cherry"]);
//! ```
//!
//! ### Custom Types
//!
//! Implement [`Sortable`], [`Split`] and one of the key traits.
//!
//! ```rust
//! use keysort::prelude::*;
//!
//! struct User {
//!     name: String,
//!     age: i32,
//! }
//!
//! struct ByAge<'a>(&'a mut [User]);
//!
//! impl Sortable for ByAge<'_> {
//!     fn len(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     // Equal ages fall back to this predicate, so break ties on name.
//!     fn less(&self, i: usize, j: usize) -> bool {
//!         let (a, b) = (&self.0[i], &self.0[j]);
//!         (a.age, &a.name) < (b.age, &b.name)
//!     }
//!
//!     fn swap(&mut self, i: usize, j: usize) {
//!         self.0.swap(i, j)
//!     }
//! }
//!
//! impl Split for ByAge<'_> {
//!     fn split_at(self, mid: usize) -> (Self, Self) {
//!         let (head, tail) = self.0.split_at_mut(mid);
//!         (ByAge(head), ByAge(tail))
//!     }
//! }
//!
//! impl NumberSortable for ByAge<'_> {
//!     fn key(&self, i: usize) -> u64 {
//!         keysort::key::int32_key(self.0[i].age)
//!     }
//! }
//!
//! let mut users = vec![
//!     User { name: "Carol".to_string(), age: 41 },
//!     User { name: "Bob".to_string(), age: 29 },
//!     User { name: "Alice".to_string(), age: 41 },
//! ];
//! sort_by_number(ByAge(&mut users));
//!
//! let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
//! assert_eq!(names, vec!["Bob", "Alice", "Carol"]);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Time**: O(N·K) for keys of K bytes; numeric keys take at most 8 passes.
//! - **Memory**: a histogram per pass plus a worklist of pending buckets.
//! - **Stability**: none. Equal keys are ordered by [`Sortable::less`].

pub mod algo;
pub mod core;
pub mod key;
pub mod options;
pub mod slices;

pub use algo::{
    is_sorted, reverse, sort_by_bytes, sort_by_bytes_with, sort_by_number, sort_by_number_with,
    sort_by_string, sort_by_string_with,
};
pub use core::{BytesSortable, NumberSortable, Sortable, Split, StringSortable};
pub use options::{Error, Options, Result, Sorter};
pub use slices::*;

pub mod prelude {
    pub use crate::algo::{
        is_sorted, reverse, sort_by_bytes, sort_by_bytes_with, sort_by_number,
        sort_by_number_with, sort_by_string, sort_by_string_with,
    };
    pub use crate::core::{BytesSortable, NumberSortable, Sortable, Split, StringSortable};
    pub use crate::options::{Options, Sorter};
}
