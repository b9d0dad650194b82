//! Closed ranges and 2D points

use std::fmt;

use super::errors::InputError;

/// A closed range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub const fn new(start: i64, end: i64) -> Self {
        Interval { start, end }
    }

    /// Inclusive overlap: touching ranges count as overlapping
    pub fn touches(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Sort ranges for insertion and check that no two of them touch
pub fn validate_disjoint(mut intervals: Vec<Interval>) -> Result<Vec<Interval>, InputError> {
    intervals.sort();
    for pair in intervals.windows(2) {
        if pair[0].touches(&pair[1]) {
            return Err(InputError::OverlappingIntervals {
                first: pair[0],
                second: pair[1],
            });
        }
    }
    Ok(intervals)
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.start, self.end)
    }
}

/// Format a run of intervals as `[a,b] [c,d]`
pub fn format_intervals(intervals: &[Interval]) -> String {
    intervals
        .iter()
        .map(Interval::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A point on the integer plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// Squared distance to the origin, saturating at `i64::MAX`
    pub fn distance_sq(&self) -> i64 {
        self.x
            .saturating_mul(self.x)
            .saturating_add(self.y.saturating_mul(self.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// Named interval sets offered by `--preset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalPreset {
    Calendar,
    Busy,
    Sparse,
    Complex,
}

impl IntervalPreset {
    pub fn intervals(self) -> Vec<Interval> {
        let pairs: &[(i64, i64)] = match self {
            IntervalPreset::Calendar => &[(1, 3), (2, 6), (8, 10), (15, 18)],
            IntervalPreset::Busy => &[(0, 5), (3, 7), (4, 6), (6, 9), (8, 12), (10, 14)],
            IntervalPreset::Sparse => &[(1, 2), (5, 6), (10, 11), (15, 16)],
            IntervalPreset::Complex => &[
                (1, 4),
                (2, 5),
                (3, 6),
                (5, 8),
                (7, 10),
                (9, 12),
                (11, 14),
            ],
        };
        pairs.iter().map(|&(s, e)| Interval::new(s, e)).collect()
    }
}
