//! Adapters for sorting plain slices of numbers, strings and byte sequences.
//!
//! Each adapter wraps a `&mut [T]` and implements [`Sortable`], [`Split`] and
//! the matching key trait. The free functions ([`int32s`], [`strings`], ...)
//! are shorthands for `Adapter(slice).sort()`.
//!
//! Float adapters compare by key, so NaNs sort last instead of breaking the
//! order predicate.

use crate::algo::{sort_by_bytes, sort_by_number, sort_by_string};
use crate::core::{BytesSortable, NumberSortable, Sortable, Split, StringSortable};
use crate::key::{float32_key, float64_key, int_key, int32_key, int64_key};

macro_rules! number_slice {
    (
        $(#[$attr:meta])*
        $name:ident($ty:ty) => $key:expr, $sort:ident, $are_sorted:ident
    ) => {
        $(#[$attr])*
        pub struct $name<'a>(pub &'a mut [$ty]);

        impl Sortable for $name<'_> {
            #[inline(always)]
            fn len(&self) -> usize {
                self.0.len()
            }

            #[inline(always)]
            fn less(&self, i: usize, j: usize) -> bool {
                $key(self.0[i]) < $key(self.0[j])
            }

            #[inline(always)]
            fn swap(&mut self, i: usize, j: usize) {
                self.0.swap(i, j)
            }
        }

        impl Split for $name<'_> {
            fn split_at(self, mid: usize) -> (Self, Self) {
                let (head, tail) = self.0.split_at_mut(mid);
                ($name(head), $name(tail))
            }
        }

        impl NumberSortable for $name<'_> {
            #[inline(always)]
            fn key(&self, i: usize) -> u64 {
                $key(self.0[i])
            }
        }

        impl $name<'_> {
            /// Sorts the wrapped slice in increasing order.
            pub fn sort(self) {
                sort_by_number(self)
            }
        }

        #[doc = concat!("Sorts a slice of `", stringify!($ty), "` in increasing order.")]
        pub fn $sort(data: &mut [$ty]) {
            $name(data).sort()
        }

        #[doc = concat!("Tests whether a slice of `", stringify!($ty), "` is sorted in increasing order.")]
        pub fn $are_sorted(data: &[$ty]) -> bool {
            data.windows(2).all(|w| $key(w[0]) <= $key(w[1]))
        }
    };
}

fn uint_key(u: usize) -> u64 {
    u as u64
}

number_slice! {
    /// Sorts `isize` values in increasing order.
    IntSlice(isize) => int_key, ints, ints_are_sorted
}

number_slice! {
    /// Sorts `i32` values in increasing order.
    Int32Slice(i32) => int32_key, int32s, int32s_are_sorted
}

number_slice! {
    /// Sorts `i64` values in increasing order.
    Int64Slice(i64) => int64_key, int64s, int64s_are_sorted
}

number_slice! {
    /// Sorts `usize` values in increasing order.
    UintSlice(usize) => uint_key, uints, uints_are_sorted
}

number_slice! {
    /// Sorts `u32` values in increasing order.
    Uint32Slice(u32) => u64::from, uint32s, uint32s_are_sorted
}

number_slice! {
    /// Sorts `u64` values in increasing order.
    Uint64Slice(u64) => u64::from, uint64s, uint64s_are_sorted
}

number_slice! {
    /// Sorts `f32` values in increasing order, NaNs last.
    Float32Slice(f32) => float32_key, float32s, float32s_are_sorted
}

number_slice! {
    /// Sorts `f64` values in increasing order, NaNs last.
    ///
    /// ```
    /// use keysort::float64s;
    ///
    /// let mut data = vec![3.0, f64::NAN, -1.0, 2.0];
    /// float64s(&mut data);
    ///
    /// assert_eq!(&data[..3], &[-1.0, 2.0, 3.0]);
    /// assert!(data[3].is_nan());
    /// ```
    Float64Slice(f64) => float64_key, float64s, float64s_are_sorted
}

/// Sorts anything that derefs to `str` in increasing byte-wise order.
pub struct StringSlice<'a, S>(pub &'a mut [S]);

impl<S: AsRef<str>> Sortable for StringSlice<'_, S> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.0[i].as_ref() < self.0[j].as_ref()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j)
    }
}

impl<S: AsRef<str>> Split for StringSlice<'_, S> {
    fn split_at(self, mid: usize) -> (Self, Self) {
        let (head, tail) = self.0.split_at_mut(mid);
        (StringSlice(head), StringSlice(tail))
    }
}

impl<S: AsRef<str>> StringSortable for StringSlice<'_, S> {
    fn key(&self, i: usize) -> &str {
        self.0[i].as_ref()
    }
}

impl<S: AsRef<str> + Send> StringSlice<'_, S> {
    /// Sorts the wrapped slice in increasing order.
    pub fn sort(self) {
        sort_by_string(self)
    }
}

/// Sorts anything that derefs to `[u8]` in increasing lexicographic order.
pub struct BytesSlice<'a, B>(pub &'a mut [B]);

impl<B: AsRef<[u8]>> Sortable for BytesSlice<'_, B> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.0[i].as_ref() < self.0[j].as_ref()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j)
    }
}

impl<B: AsRef<[u8]>> Split for BytesSlice<'_, B> {
    fn split_at(self, mid: usize) -> (Self, Self) {
        let (head, tail) = self.0.split_at_mut(mid);
        (BytesSlice(head), BytesSlice(tail))
    }
}

impl<B: AsRef<[u8]>> BytesSortable for BytesSlice<'_, B> {
    fn key(&self, i: usize) -> &[u8] {
        self.0[i].as_ref()
    }
}

impl<B: AsRef<[u8]> + Send> BytesSlice<'_, B> {
    /// Sorts the wrapped slice in increasing order.
    pub fn sort(self) {
        sort_by_bytes(self)
    }
}

/// Sorts a slice of strings in increasing order.
pub fn strings<S: AsRef<str> + Send>(data: &mut [S]) {
    StringSlice(data).sort()
}

/// Tests whether a slice of strings is sorted in increasing order.
pub fn strings_are_sorted<S: AsRef<str>>(data: &[S]) -> bool {
    data.windows(2).all(|w| w[0].as_ref() <= w[1].as_ref())
}

/// Sorts a slice of byte sequences in increasing order.
pub fn bytes<B: AsRef<[u8]> + Send>(data: &mut [B]) {
    BytesSlice(data).sort()
}

/// Tests whether a slice of byte sequences is sorted in increasing order.
pub fn bytes_are_sorted<B: AsRef<[u8]>>(data: &[B]) -> bool {
    data.windows(2).all(|w| w[0].as_ref() <= w[1].as_ref())
}
