//! Core sorting algorithms (MSD radix partitioning with a comparison fallback).
//!
//! Each bucket is processed in four steps:
//! 1. **Count**: a histogram of the key byte at the current depth. Keys that
//!    are shorter than the depth land in a sentinel slot ordered before every
//!    real byte.
//! 2. **Offsets**: prefix sums give each byte value its range in the bucket.
//! 3. **Permute**: an American-flag pass swaps every element into its range,
//!    following displacement cycles with only the 257 head/tail counters as
//!    extra memory.
//! 4. **Descend**: sub-buckets move on to the next depth. Small buckets, and
//!    buckets whose keys are exhausted, are finished by comparison sorting.
//!
//! Pending buckets live on an explicit worklist rather than the call stack, so
//! very long string keys cannot overflow it. Buckets large enough to be worth a
//! task are spawned into a rayon scope and the scope is joined before the
//! entry point returns.
//!
//! The main entry points are [`sort_by_number`], [`sort_by_string`] and
//! [`sort_by_bytes`].

use crate::core::{BytesSortable, NumberSortable, Sortable, Split, StringSortable};
use crate::options::Options;
use cuneiform::cuneiform;
use log::{debug, trace};

/// Number of buckets per pass: one per byte value plus the exhausted sentinel.
const RADIX_BUCKETS: usize = 257;

/// Histogram slot for keys with no byte at the current depth.
const EXHAUSTED: usize = 0;

/// Width of a numeric key in bytes.
const NUMBER_WIDTH: usize = 8;

// Cache-aligned counts struct.
#[cuneiform]
struct RadixCounts {
    data: [usize; RADIX_BUCKETS],
}

/// A view together with the key depth it is to be partitioned at.
struct Bucket<V> {
    view: V,
    depth: usize,
}

/// What the engine needs from a collection: a splittable view plus a digit
/// for every element at every depth.
pub(crate) trait Radix: Split + Send {
    /// Key width in bytes for fixed-width keys.
    const WIDTH: Option<usize>;

    /// Label used in log output.
    const NAME: &'static str;

    /// Returns the histogram slot of element `i` at `depth`: [`EXHAUSTED`] if
    /// the key has no byte there, otherwise the byte value plus one.
    fn digit(&self, i: usize, depth: usize) -> usize;
}

macro_rules! radix_view {
    ($name:ident, $bound:ident) => {
        struct $name<S>(S);

        impl<S: Sortable> Sortable for $name<S> {
            #[inline(always)]
            fn len(&self) -> usize {
                self.0.len()
            }

            #[inline(always)]
            fn less(&self, i: usize, j: usize) -> bool {
                self.0.less(i, j)
            }

            #[inline(always)]
            fn swap(&mut self, i: usize, j: usize) {
                self.0.swap(i, j)
            }
        }

        impl<S: $bound + Split> Split for $name<S> {
            fn split_at(self, mid: usize) -> (Self, Self) {
                let (head, tail) = self.0.split_at(mid);
                ($name(head), $name(tail))
            }
        }
    };
}

radix_view!(Numbers, NumberSortable);
radix_view!(Strings, StringSortable);
radix_view!(Bytes, BytesSortable);

impl<S: NumberSortable + Split + Send> Radix for Numbers<S> {
    const WIDTH: Option<usize> = Some(NUMBER_WIDTH);
    const NAME: &'static str = "number";

    #[inline(always)]
    fn digit(&self, i: usize, depth: usize) -> usize {
        let shift = 8 * (NUMBER_WIDTH - 1 - depth);
        ((self.0.key(i) >> shift) & 0xFF) as usize + 1
    }
}

impl<S: StringSortable + Split + Send> Radix for Strings<S> {
    const WIDTH: Option<usize> = None;
    const NAME: &'static str = "string";

    #[inline(always)]
    fn digit(&self, i: usize, depth: usize) -> usize {
        byte_digit(self.0.key(i).as_bytes(), depth)
    }
}

impl<S: BytesSortable + Split + Send> Radix for Bytes<S> {
    const WIDTH: Option<usize> = None;
    const NAME: &'static str = "bytes";

    #[inline(always)]
    fn digit(&self, i: usize, depth: usize) -> usize {
        byte_digit(self.0.key(i), depth)
    }
}

#[inline(always)]
fn byte_digit(key: &[u8], depth: usize) -> usize {
    key.get(depth).map_or(EXHAUSTED, |&b| b as usize + 1)
}

/// Sorts a collection in place by its `u64` key.
///
/// Elements with equal keys are ordered by [`Sortable::less`]. The sort is not
/// stable.
///
/// # Examples
///
/// ```
/// use keysort::{sort_by_number, Int32Slice};
///
/// let mut data = vec![5, -3, 0, -100, 42];
/// sort_by_number(Int32Slice(&mut data));
///
/// assert_eq!(data, vec![-100, -3, 0, 5, 42]);
/// ```
pub fn sort_by_number<S: NumberSortable + Split + Send>(data: S) {
    sort_by_number_with(data, &Options::default());
}

/// Like [`sort_by_number`], with explicit [`Options`].
pub fn sort_by_number_with<S: NumberSortable + Split + Send>(data: S, options: &Options) {
    sort(Numbers(data), options);
}

/// Sorts a collection in place by its string key, compared byte-wise.
///
/// # Examples
///
/// ```
/// use keysort::{sort_by_string, StringSlice};
///
/// let mut data = vec!["banana", "apple", "cherry"];
/// sort_by_string(StringSlice(&mut data));
///
/// assert_eq!(data, vec!["apple", "banana", "cherry"]);
/// ```
pub fn sort_by_string<S: StringSortable + Split + Send>(data: S) {
    sort_by_string_with(data, &Options::default());
}

/// Like [`sort_by_string`], with explicit [`Options`].
pub fn sort_by_string_with<S: StringSortable + Split + Send>(data: S, options: &Options) {
    sort(Strings(data), options);
}

/// Sorts a collection in place by its byte-sequence key.
///
/// A key sorts before every longer key it is a prefix of.
///
/// # Examples
///
/// ```
/// use keysort::{sort_by_bytes, BytesSlice};
///
/// let mut data = vec![vec![2u8], vec![1, 9], vec![1]];
/// sort_by_bytes(BytesSlice(&mut data));
///
/// assert_eq!(data, vec![vec![1], vec![1, 9], vec![2]]);
/// ```
pub fn sort_by_bytes<S: BytesSortable + Split + Send>(data: S) {
    sort_by_bytes_with(data, &Options::default());
}

/// Like [`sort_by_bytes`], with explicit [`Options`].
pub fn sort_by_bytes_with<S: BytesSortable + Split + Send>(data: S, options: &Options) {
    sort(Bytes(data), options);
}

/// Reports whether `data` is ordered according to [`Sortable::less`].
pub fn is_sorted<S: Sortable + ?Sized>(data: &S) -> bool {
    (1..data.len()).all(|i| !data.less(i, i - 1))
}

/// Reverses the order of the elements in `data`.
///
/// Reversing an ascending sort gives a descending one.
pub fn reverse<S: Sortable + ?Sized>(data: &mut S) {
    let len = data.len();
    for i in 0..len / 2 {
        data.swap(i, len - 1 - i);
    }
}

pub(crate) fn sort<V: Radix>(view: V, options: &Options) {
    let len = view.len();
    if len < 2 {
        return;
    }

    let root = Bucket { view, depth: 0 };
    if options.parallel && len >= options.parallel_threshold {
        debug!("sorting {} elements by {} key in parallel", len, V::NAME);
        let options = *options;
        rayon::scope(|scope| run_task(scope, root, options));
    } else {
        debug!("sorting {} elements by {} key", len, V::NAME);
        drain(root, options, Some);
    }
}

/// Body of one parallel task: drains its own worklist and spawns sibling
/// tasks for buckets that reach the parallel threshold.
fn run_task<'s, V: Radix + 's>(scope: &rayon::Scope<'s>, bucket: Bucket<V>, options: Options) {
    drain(bucket, &options, |bucket| {
        if bucket.view.len() < options.parallel_threshold {
            return Some(bucket);
        }
        trace!(
            "spawning task for {} elements at depth {}",
            bucket.view.len(),
            bucket.depth
        );
        scope.spawn(move |scope| run_task(scope, bucket, options));
        None
    });
}

/// Processes `root` and everything partitioned out of it.
///
/// `offload` may take a freshly partitioned bucket off this worklist by
/// returning `None`; returning the bucket keeps it local.
fn drain<V, F>(root: Bucket<V>, options: &Options, mut offload: F)
where
    V: Radix,
    F: FnMut(Bucket<V>) -> Option<Bucket<V>>,
{
    let mut work = vec![root];

    while let Some(Bucket { mut view, depth }) = work.pop() {
        let len = view.len();
        if len <= options.insertion_threshold {
            insertion_sort(&mut view);
            continue;
        }

        let counts = histogram(&view, depth);
        let counts = &counts.data;
        let next_depth = depth + 1;
        let key_spent = V::WIDTH.is_some_and(|width| next_depth >= width);

        // Whole bucket shares one digit: nothing to move.
        if let Some(digit) = counts.iter().position(|&count| count == len) {
            if digit == EXHAUSTED || key_spent {
                resolve_ties(&mut view, options);
            } else {
                work.push(Bucket {
                    view,
                    depth: next_depth,
                });
            }
            continue;
        }

        permute(&mut view, depth, counts);
        trace!(
            "partitioned {} elements at depth {} into {} buckets",
            len,
            depth,
            counts.iter().filter(|&&count| count > 0).count()
        );

        let mut rest = view;
        for (digit, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let (mut head, tail) = rest.split_at(count);
            rest = tail;

            if digit == EXHAUSTED || key_spent {
                resolve_ties(&mut head, options);
            } else if count <= options.insertion_threshold {
                insertion_sort(&mut head);
            } else if let Some(bucket) = offload(Bucket {
                view: head,
                depth: next_depth,
            }) {
                work.push(bucket);
            }
        }
    }
}

/// Counts digits at `depth` over the whole view.
fn histogram<V: Radix>(view: &V, depth: usize) -> RadixCounts {
    let mut counts = RadixCounts {
        data: [0; RADIX_BUCKETS],
    };
    (0..view.len()).for_each(|i| counts.data[view.digit(i, depth)] += 1);
    counts
}

/// Swaps every element into the range of its digit.
///
/// `heads[d]` is the first slot of range `d` not yet known to hold a `d`
/// element. The element at a head is either already home, or is swapped to
/// the head of its own range, which then advances.
fn permute<V: Radix>(view: &mut V, depth: usize, counts: &[usize; RADIX_BUCKETS]) {
    let mut heads = [0usize; RADIX_BUCKETS];
    let mut tails = [0usize; RADIX_BUCKETS];
    let mut sum = 0;
    heads
        .iter_mut()
        .zip(tails.iter_mut())
        .zip(counts.iter())
        .for_each(|((head, tail), &count)| {
            *head = sum;
            sum += count;
            *tail = sum;
        });

    for digit in 0..RADIX_BUCKETS {
        while heads[digit] < tails[digit] {
            let home = view.digit(heads[digit], depth);
            // A full target range means the key changed since counting; leave
            // the element where it is so every index stays in bounds.
            if home == digit || heads[home] == tails[home] {
                heads[digit] += 1;
            } else {
                view.swap(heads[digit], heads[home]);
                heads[home] += 1;
            }
        }
    }
}

/// Orders a bucket whose keys are all equal, using only the predicate.
fn resolve_ties<S: Sortable>(view: &mut S, options: &Options) {
    if view.len() <= options.insertion_threshold {
        insertion_sort(view);
    } else if !is_sorted(&*view) {
        heapsort(view);
    }
}

fn insertion_sort<S: Sortable>(view: &mut S) {
    for i in 1..view.len() {
        let mut j = i;
        while j > 0 && view.less(j, j - 1) {
            view.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Heapsort over `[0, len)`, used when a tied bucket is too large for
/// insertion sort.
fn heapsort<S: Sortable>(view: &mut S) {
    // The heap respects `parent >= child` within `[0, end)`.
    fn sift_down<S: Sortable>(view: &mut S, mut node: usize, end: usize) {
        loop {
            let mut child = 2 * node + 1;
            if child >= end {
                break;
            }
            if child + 1 < end && view.less(child, child + 1) {
                child += 1;
            }
            if !view.less(node, child) {
                break;
            }
            view.swap(node, child);
            node = child;
        }
    }

    let len = view.len();
    for i in (0..len / 2).rev() {
        sift_down(view, i, len);
    }
    for end in (1..len).rev() {
        view.swap(0, end);
        sift_down(view, 0, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sorts `u16` values by their high byte only, with ties broken by the
    /// full value, so tie resolution is observable.
    struct HighByte<'a>(&'a mut [u16]);

    impl Sortable for HighByte<'_> {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn less(&self, i: usize, j: usize) -> bool {
            self.0[i] < self.0[j]
        }

        fn swap(&mut self, i: usize, j: usize) {
            self.0.swap(i, j)
        }
    }

    impl Split for HighByte<'_> {
        fn split_at(self, mid: usize) -> (Self, Self) {
            let (head, tail) = self.0.split_at_mut(mid);
            (HighByte(head), HighByte(tail))
        }
    }

    impl NumberSortable for HighByte<'_> {
        fn key(&self, i: usize) -> u64 {
            ((self.0[i] >> 8) as u64) << 56
        }
    }

    fn sequential(insertion_threshold: usize) -> Options {
        Options::default()
            .insertion_threshold(insertion_threshold)
            .parallel(false)
    }

    #[test]
    fn test_permute_groups_by_digit() {
        let mut data: Vec<u16> = (0..600u32).map(|i| ((i * 7919) % 1024) as u16).collect();
        let mut before = data.clone();

        let mut view = Numbers(HighByte(&mut data));
        let counts = histogram(&view, 0);
        permute(&mut view, 0, &counts.data);

        let high: Vec<u16> = data.iter().map(|v| v >> 8).collect();
        assert!(high.windows(2).all(|w| w[0] <= w[1]));

        let mut after = data.clone();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_ties_resolved_by_predicate() {
        let mut data: Vec<u16> = (0..2000u16).rev().map(|i| i % 512).collect();
        let mut expected = data.clone();
        expected.sort();

        sort_by_number_with(HighByte(&mut data), &sequential(4));
        assert_eq!(data, expected);
    }

    #[test]
    fn test_heapsort_and_insertion_sort() {
        let mut data: Vec<u16> = (0..257u16).map(|i| (i * 31) % 97).collect();
        let mut expected = data.clone();
        expected.sort();

        let mut copy = data.clone();
        heapsort(&mut HighByte(&mut data));
        assert_eq!(data, expected);

        insertion_sort(&mut HighByte(&mut copy));
        assert_eq!(copy, expected);
    }

    #[test]
    fn test_byte_digit_sentinel() {
        assert_eq!(byte_digit(b"", 0), EXHAUSTED);
        assert_eq!(byte_digit(b"a", 1), EXHAUSTED);
        assert_eq!(byte_digit(&[0], 0), 1);
        assert_eq!(byte_digit(&[255], 0), 256);
    }

    #[test]
    fn test_reverse_and_is_sorted() {
        let mut data: Vec<u16> = (0..11).collect();
        assert!(is_sorted(&HighByte(&mut data)));

        reverse(&mut HighByte(&mut data));
        assert_eq!(data, (0..11).rev().collect::<Vec<u16>>());
        assert!(!is_sorted(&HighByte(&mut data)));
    }
}
