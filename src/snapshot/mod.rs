// Execution snapshots and step history

use crate::algorithms::{Outcome, TransitionKind};
use crate::structures::interval::{Interval, Point};
use crate::structures::list::ListNode;
use crate::structures::tree::NodeId;
use std::collections::VecDeque;
use std::fmt;

/// Running totals shown next to the visualization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Pointer walks count iterations; every other problem counts each
    /// transition, the concluding one included
    pub steps: usize,
    pub attempts: usize,
    pub backtracks: usize,
    pub operations: usize,
}

/// Two cursors walking a linked structure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerFrame {
    /// Nodes drawn for this problem (the list, the index graph, or the
    /// happy-number trail)
    pub nodes: Vec<ListNode>,
    pub slow: Option<usize>,
    pub fast: Option<usize>,
    /// Find-duplicate runs in two phases, everything else stays in phase 1
    pub phase: u8,
}

/// What the interval scan is doing with the current range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Idle,
    Merging,
    Conflict,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalFrame {
    pub sorted: Vec<Interval>,
    pub cursor: Option<usize>,
    pub accepted: Vec<Interval>,
    /// Range being grown by an insert before it is committed
    pub pending: Option<Interval>,
    /// Indices into `sorted` that were dropped or conflicted
    pub rejected: Vec<usize>,
    pub highlight: Highlight,
}

/// N-Queens or Sudoku board, row-major
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFrame {
    pub size: usize,
    /// Queens: 1 marks a queen. Sudoku: the digit, 0 for blank.
    pub cells: Vec<u8>,
    /// Sudoku givens, drawn differently from placed digits
    pub givens: Vec<bool>,
    pub focus: Option<(usize, usize)>,
    pub solutions: usize,
}

impl BoardFrame {
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells.get(row * self.size + col).copied().unwrap_or(0)
    }

    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.givens
            .get(row * self.size + col)
            .copied()
            .unwrap_or(false)
    }
}

/// Item competing for a place in a top-K heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Candidate {
    Number(i64),
    Frequent { value: i64, count: usize },
    Point(Point),
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Number(n) => write!(f, "{}", n),
            Candidate::Frequent { value, count } => write!(f, "{}×{}", value, count),
            Candidate::Point(p) => write!(f, "{}", p),
        }
    }
}

/// A candidate with the priority the heap orders it by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ranked {
    pub key: i64,
    pub candidate: Candidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapOrder {
    #[default]
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeapFrame {
    /// Heap storage in array order, root first
    pub items: Vec<Ranked>,
    pub order: HeapOrder,
    pub capacity: usize,
    /// Index of the input element being processed
    pub cursor: Option<usize>,
    pub evicted: Option<Ranked>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeFrame {
    pub current: Option<NodeId>,
    pub visited: Vec<NodeId>,
    /// Values in the order the traversal produced them
    pub order: Vec<i64>,
    pub level: Option<usize>,
    /// Root-to-current path for path-sum
    pub path: Vec<NodeId>,
    pub paths: Vec<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChoiceFrame {
    /// Elements chosen on the current branch
    pub path: Vec<i64>,
    pub results: Vec<Vec<i64>>,
}

/// Family-specific part of a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Pointers(PointerFrame),
    Intervals(IntervalFrame),
    Board(BoardFrame),
    Heap(HeapFrame),
    Tree(TreeFrame),
    Choices(ChoiceFrame),
}

impl Frame {
    /// Estimate the memory usage of this frame in bytes
    fn estimated_size(&self) -> usize {
        // Rough: element counts times a nominal element size
        match self {
            Frame::Pointers(f) => f.nodes.len() * 24,
            Frame::Intervals(f) => {
                (f.sorted.len() + f.accepted.len()) * 16 + f.rejected.len() * 8
            }
            Frame::Board(f) => f.cells.len() * 2,
            Frame::Heap(f) => f.items.len() * 40,
            Frame::Tree(f) => {
                (f.visited.len() + f.order.len() + f.path.len()) * 8
                    + f.paths.iter().map(|p| p.len() * 8 + 24).sum::<usize>()
            }
            Frame::Choices(f) => {
                f.path.len() * 8 + f.results.iter().map(|r| r.len() * 8 + 24).sum::<usize>()
            }
        }
    }
}

/// The externally visible state at one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub frame: Frame,
    pub counters: Counters,
    pub narration: String,
    pub outcome: Option<Outcome>,
    /// Kind of the transition that produced this state
    pub kind: Option<TransitionKind>,
    /// Number of transitions applied to reach this state (0 = initial)
    pub position: usize,
}

impl Snapshot {
    pub fn new(frame: Frame, narration: impl Into<String>) -> Self {
        Snapshot {
            frame,
            counters: Counters::default(),
            narration: narration.into(),
            outcome: None,
            kind: None,
            position: 0,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome.is_some()
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        64 + self.narration.len() + self.frame.estimated_size()
    }
}

/// Applied snapshots, oldest first, bounded by an estimated memory budget
#[derive(Debug)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    /// Position of `snapshots[0]`; grows as old entries are evicted
    first: usize,
    max_memory: usize,
    current_memory: usize,
}

impl History {
    pub fn new(max_memory: usize) -> Self {
        History {
            snapshots: VecDeque::new(),
            first: 0,
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot, evicting the oldest entries when over budget.
    /// Returns how many entries were evicted.
    pub fn push(&mut self, snapshot: Snapshot) -> usize {
        let snapshot_size = snapshot.estimated_size();
        let mut evicted = 0;

        while !self.snapshots.is_empty()
            && self.current_memory + snapshot_size > self.max_memory
        {
            if let Some(old) = self.snapshots.pop_front() {
                self.current_memory -= old.estimated_size();
                self.first += 1;
                evicted += 1;
            }
        }

        self.current_memory += snapshot_size;
        self.snapshots.push_back(snapshot);
        evicted
    }

    /// Get the snapshot recorded at `position`, if still retained
    pub fn get(&self, position: usize) -> Option<&Snapshot> {
        position
            .checked_sub(self.first)
            .and_then(|offset| self.snapshots.get(offset))
    }

    /// Oldest retained position
    pub fn first_position(&self) -> usize {
        self.first
    }

    /// Newest retained position
    pub fn last_position(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then(|| self.first + self.snapshots.len() - 1)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.first = 0;
        self.current_memory = 0;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
