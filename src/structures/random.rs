//! Random problem instances
//!
//! Sizes and value ranges are kept small so every structure fits on one
//! screen. Callers pass the RNG so runs can be reproduced with `--seed`.

use super::interval::{Interval, Point};
use super::list::LinkedList;
use rand::seq::SliceRandom;
use rand::Rng;

/// Numbers known to reach 1 under repeated digit-square sums
pub const HAPPY_NUMBERS: [u64; 20] = [
    1, 7, 10, 13, 19, 23, 28, 31, 32, 44, 49, 68, 70, 79, 82, 86, 91, 94, 97, 100,
];

/// 5 to 8 nodes, a cycle half of the time
pub fn cycle_list<R: Rng>(rng: &mut R) -> LinkedList {
    let len = rng.gen_range(5..=8);
    let values: Vec<i64> = (0..len).map(|_| rng.gen_range(0..20)).collect();

    if rng.gen_bool(0.5) {
        let position = rng.gen_range(0..len);
        // position < len by construction
        LinkedList::with_cycle(&values, position)
            .unwrap_or_else(|_| LinkedList::from_values(&values))
    } else {
        LinkedList::from_values(&values)
    }
}

/// `1..=n` plus one repeated value, shuffled
pub fn duplicate_array<R: Rng>(rng: &mut R) -> Vec<usize> {
    let n = rng.gen_range(5..=9);
    let mut values: Vec<usize> = (1..=n).collect();
    values.push(rng.gen_range(1..n));
    values.shuffle(rng);
    values
}

/// Happy or unhappy with equal odds
pub fn happy_candidate<R: Rng>(rng: &mut R) -> u64 {
    if rng.gen_bool(0.5) {
        HAPPY_NUMBERS[rng.gen_range(0..HAPPY_NUMBERS.len())]
    } else {
        loop {
            let n = rng.gen_range(2..100);
            if !HAPPY_NUMBERS.contains(&n) {
                return n;
            }
        }
    }
}

/// Straight chain `1 → 2 → … → len`
pub fn middle_list<R: Rng>(rng: &mut R) -> LinkedList {
    let len = rng.gen_range(5..=10);
    let values: Vec<i64> = (1..=len).collect();
    LinkedList::from_values(&values)
}

/// 6 to 9 ranges of length 2..=6 starting inside `0..15`
pub fn intervals<R: Rng>(rng: &mut R) -> Vec<Interval> {
    let count = rng.gen_range(6..=9);
    (0..count)
        .map(|_| {
            let start = rng.gen_range(0..15);
            Interval::new(start, start + rng.gen_range(2..=6))
        })
        .collect()
}

/// Sorted, pairwise separated ranges plus a range to insert
pub fn insertion<R: Rng>(rng: &mut R) -> (Vec<Interval>, Interval) {
    let count = rng.gen_range(3..=6);
    let mut existing = Vec::with_capacity(count);
    let mut cursor = rng.gen_range(0..3);
    for _ in 0..count {
        let end = cursor + rng.gen_range(1..=3);
        existing.push(Interval::new(cursor, end));
        cursor = end + rng.gen_range(2..=4);
    }

    let start = rng.gen_range(0..cursor);
    let new = Interval::new(start, start + rng.gen_range(1..=6));
    (existing, new)
}

pub fn numbers<R: Rng>(rng: &mut R, len: usize, max: i64) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(1..=max)).collect()
}

/// A skewed multiset so the frequent elements stand out
pub fn frequencies<R: Rng>(rng: &mut R) -> Vec<i64> {
    let mut values = vec![1, 1, 1, 2, 2, 3, 4, 4, 4, 4, 5, 6];
    values.shuffle(rng);
    values
}

pub fn points<R: Rng>(rng: &mut R) -> Vec<Point> {
    (0..10)
        .map(|_| Point::new(rng.gen_range(-10..10), rng.gen_range(-10..10)))
        .collect()
}

/// `len` distinct values from `1..=9`
pub fn distinct<R: Rng>(rng: &mut R, len: usize) -> Vec<i64> {
    let mut pool: Vec<i64> = (1..=9).collect();
    pool.shuffle(rng);
    pool.truncate(len.min(9));
    pool
}
