//! Misbehaving collections may get any order back, but never lose elements.

use keysort::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// Predicate and keys both change on every call.
struct Chaotic<'a> {
    data: &'a mut [u32],
    calls: &'a AtomicU64,
}

impl Chaotic<'_> {
    fn noise(&self) -> u64 {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        n.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 7
    }
}

impl Sortable for Chaotic<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn less(&self, _i: usize, _j: usize) -> bool {
        self.noise() & 1 == 0
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.data.swap(i, j)
    }
}

impl Split for Chaotic<'_> {
    fn split_at(self, mid: usize) -> (Self, Self) {
        let (head, tail) = self.data.split_at_mut(mid);
        (
            Chaotic {
                data: head,
                calls: self.calls,
            },
            Chaotic {
                data: tail,
                calls: self.calls,
            },
        )
    }
}

impl NumberSortable for Chaotic<'_> {
    fn key(&self, _i: usize) -> u64 {
        self.noise()
    }
}

impl BytesSortable for Chaotic<'_> {
    fn key(&self, i: usize) -> &[u8] {
        let bytes: &[u8] = &[3, 1, 4, 1, 5, 9, 2, 6];
        &bytes[..(self.noise() as usize + i) % bytes.len()]
    }
}

fn assert_permutation(mut data: Vec<u32>) {
    data.sort_unstable();
    assert_eq!(data, (0..data.len() as u32).collect::<Vec<u32>>());
}

#[test]
fn test_inconsistent_numbers_keep_elements() {
    let calls = AtomicU64::new(1);
    for len in [0, 1, 5, 33, 1_000, 50_000] {
        let mut data: Vec<u32> = (0..len).collect();
        sort_by_number_with(
            Chaotic {
                data: &mut data,
                calls: &calls,
            },
            &Options::default().parallel_threshold(500),
        );
        assert_permutation(data);
    }
}

#[test]
fn test_inconsistent_bytes_keep_elements() {
    let calls = AtomicU64::new(7);
    for len in [2, 40, 3_000] {
        let mut data: Vec<u32> = (0..len).collect();
        sort_by_bytes_with(
            Chaotic {
                data: &mut data,
                calls: &calls,
            },
            &Options::default().parallel(false),
        );
        assert_permutation(data);
    }
}

#[test]
fn test_inconsistent_predicate_is_sorted_terminates() {
    let calls = AtomicU64::new(0);
    let mut data: Vec<u32> = (0..100).collect();
    let chaotic = Chaotic {
        data: &mut data,
        calls: &calls,
    };
    // The answer is meaningless; only termination matters.
    let _ = is_sorted(&chaotic);
}
