//! Input validation errors
//!
//! [`InputError`] covers everything the input provider can reject. The
//! algorithm core never produces one: by the time a [`Problem`] exists its
//! structure is valid.
//!
//! [`Problem`]: crate::algorithms::Problem

use thiserror::Error;

use super::interval::Interval;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Nothing usable was found in the input text
    #[error("no {what} found in input")]
    Empty { what: &'static str },

    /// A token could not be read as an integer
    #[error("'{token}' is not a valid integer")]
    InvalidNumber { token: String },

    /// A bracketed pair was malformed
    #[error("'{text}' is not a valid pair, expected [a,b]")]
    InvalidPair { text: String },

    /// An interval whose end lies before its start
    #[error("interval [{start},{end}] ends before it starts")]
    ReversedInterval { start: i64, end: i64 },

    /// A number whose magnitude exceeds what the visualizers compute with
    #[error("{value} is too large, values must lie within ±{max}")]
    TooLarge { value: i64, max: i64 },

    /// Happy-number start outside `1..=max`
    #[error("happy number start {value} must be between 1 and {max}")]
    HappyRange { value: u64, max: i64 },

    /// Ranges that must be disjoint share a point
    #[error("intervals {first} and {second} overlap, existing ranges must be disjoint")]
    OverlappingIntervals { first: Interval, second: Interval },

    /// A value outside the range the problem accepts
    #[error("value {value} is out of range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// The cycle position does not name a node of the list
    #[error("cycle position {position} is outside a list of {len} nodes")]
    CyclePosition { position: usize, len: usize },

    /// `k` does not fit the input
    #[error("k = {k} must be between 1 and {max}")]
    InvalidK { k: usize, max: usize },

    /// A Sudoku grid with the wrong shape or conflicting givens
    #[error("invalid sudoku grid: {reason}")]
    InvalidGrid { reason: String },

    /// A level-order tree whose first entry is a gap but later entries are not
    #[error("tree has values below a missing root")]
    OrphanedTreeValues,

    /// More elements than an enumeration can show
    #[error("{what} has {len} elements, at most {max} are supported")]
    TooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// Board size outside the supported range
    #[error("board size {size} must be between 1 and {max}")]
    BoardSize { size: usize, max: usize },
}
