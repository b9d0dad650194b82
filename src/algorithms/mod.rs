//! Algorithm core
//!
//! Every problem is a textbook algorithm rewritten as an iterator of
//! [`Transition`]s. The iterators are plain synchronous state machines with
//! explicit stacks, so the core never sleeps and can be tested without a
//! clock; pacing belongs to the [`driver`](crate::driver).
//!
//! - [`pointers`]: cycle detection, find-duplicate, happy number, middle node
//! - [`intervals`]: merge, insert, meeting rooms, non-overlapping removal
//! - [`backtracking`]: N-Queens and Sudoku
//! - [`top_k`]: K-th largest, top-K frequent, K closest points
//! - [`traversal`]: binary tree traversals and path sum
//! - [`choices`]: subsets, permutations, combinations
//!
//! # Transitions
//!
//! A transition carries the whole next [`Frame`] rather than a delta, so the
//! driver applies it by replacement and the history can hand any position
//! straight back to the renderer. The final transition of every run carries
//! `Some(outcome)`.

pub mod backtracking;
pub mod choices;
pub mod constants;
pub mod intervals;
pub mod pointers;
pub mod top_k;
pub mod traversal;

use crate::snapshot::{
    BoardFrame, ChoiceFrame, Counters, Frame, HeapFrame, HeapOrder, IntervalFrame,
    PointerFrame, Snapshot, TreeFrame,
};
use crate::structures::grid::{SudokuGrid, SIZE};
use crate::structures::interval::{format_intervals, Interval, Point};
use crate::structures::list::{LinkedList, ListNode};
use crate::structures::tree::BinaryTree;
use std::fmt;

/// What kind of state change a transition represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Initial framing before the algorithm moves (sorting, counting, ...)
    Setup,
    /// Cursors or scan position moved
    Advance,
    /// A choice was made: a queen placed, a digit tried, an element included
    Choose,
    /// A choice was taken back
    Undo,
    /// A result was produced (solution, subset, found path)
    Emit,
    /// The run is over; the transition carries the outcome
    Conclude,
}

impl TransitionKind {
    /// Fraction of the configured delay to wait after this transition
    pub fn pace(self) -> f32 {
        match self {
            TransitionKind::Undo => 0.5,
            _ => 1.0,
        }
    }
}

/// One discrete, observable change of algorithm state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub narration: String,
    pub frame: Frame,
    pub counters: Counters,
    pub outcome: Option<Outcome>,
}

impl Transition {
    pub fn new(
        kind: TransitionKind,
        narration: impl Into<String>,
        frame: Frame,
        counters: Counters,
    ) -> Self {
        Transition {
            kind,
            narration: narration.into(),
            frame,
            counters,
            outcome: None,
        }
    }

    /// Final transition of a run
    pub fn conclude(
        narration: impl Into<String>,
        frame: Frame,
        counters: Counters,
        outcome: Outcome,
    ) -> Self {
        Transition {
            kind: TransitionKind::Conclude,
            narration: narration.into(),
            frame,
            counters,
            outcome: Some(outcome),
        }
    }

    /// Replace the snapshot state with this transition's
    pub fn apply(self, snapshot: &mut Snapshot) {
        snapshot.frame = self.frame;
        snapshot.counters = self.counters;
        snapshot.narration = self.narration;
        snapshot.outcome = self.outcome;
        snapshot.kind = Some(self.kind);
        snapshot.position += 1;
    }
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoCycle,
    /// `heuristic` is set when the step bound ended the walk
    Cycle { meeting: usize, heuristic: bool },
    /// `None` when the step bound ended the search first
    Duplicate(Option<usize>),
    Happy { happy: bool, heuristic: bool },
    /// Index and value of the middle node
    Middle(Option<(usize, i64)>),
    Merged(Vec<Interval>),
    Attendance { can_attend: bool, rooms: usize },
    Removals { removed: usize, kept: Vec<Interval> },
    /// Each solution lists the queen's column per row
    Queens(Vec<Vec<usize>>),
    Sudoku(Option<SudokuGrid>),
    KthLargest { kth: Option<i64>, top: Vec<i64> },
    TopFrequent(Vec<(i64, usize)>),
    Closest(Vec<Point>),
    Traversal(Vec<i64>),
    Paths(Vec<Vec<i64>>),
    Enumerated(Vec<Vec<i64>>),
}

fn format_list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(i64::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoCycle => write!(f, "No cycle"),
            Outcome::Cycle {
                meeting,
                heuristic: false,
            } => write!(f, "Cycle detected (pointers met at node {})", meeting),
            Outcome::Cycle {
                heuristic: true, ..
            } => write!(f, "Cycle assumed (step bound reached)"),
            Outcome::Duplicate(Some(value)) => write!(f, "Duplicate: {}", value),
            Outcome::Duplicate(None) => write!(f, "No duplicate found within the step bound"),
            Outcome::Happy {
                happy: true, ..
            } => write!(f, "Happy number"),
            Outcome::Happy {
                happy: false,
                heuristic: false,
            } => write!(f, "Not a happy number"),
            Outcome::Happy {
                happy: false,
                heuristic: true,
            } => write!(f, "Likely not happy"),
            Outcome::Middle(Some((index, value))) => {
                write!(f, "Middle node {} (value {})", index, value)
            }
            Outcome::Middle(None) => write!(f, "Empty list has no middle"),
            Outcome::Merged(intervals) => {
                write!(f, "{} interval(s): {}", intervals.len(), format_intervals(intervals))
            }
            Outcome::Attendance {
                can_attend: true, ..
            } => write!(f, "Can attend all meetings"),
            Outcome::Attendance { rooms, .. } => write!(f, "{} rooms needed", rooms),
            Outcome::Removals { removed, .. } => write!(f, "{} removal(s)", removed),
            Outcome::Queens(solutions) => write!(f, "{} solution(s)", solutions.len()),
            Outcome::Sudoku(Some(_)) => write!(f, "Solved"),
            Outcome::Sudoku(None) => write!(f, "No solution"),
            Outcome::KthLargest { kth: Some(kth), .. } => write!(f, "K-th largest: {}", kth),
            Outcome::KthLargest { kth: None, .. } => write!(f, "Fewer than K elements"),
            Outcome::TopFrequent(entries) => {
                let values: Vec<i64> = entries.iter().map(|(value, _)| *value).collect();
                write!(f, "Top frequent: {}", format_list(&values))
            }
            Outcome::Closest(points) => {
                let items: Vec<String> = points.iter().map(Point::to_string).collect();
                write!(f, "Closest: {}", items.join(" "))
            }
            Outcome::Traversal(values) => write!(f, "{}", format_list(values)),
            Outcome::Paths(paths) if paths.is_empty() => write!(f, "No paths found"),
            Outcome::Paths(paths) => write!(f, "{} path(s)", paths.len()),
            Outcome::Enumerated(results) => write!(f, "{} result(s)", results.len()),
        }
    }
}

/// Configurable safety bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub pointer_steps: usize,
    pub happy_steps: usize,
    /// `None` enumerates every N-Queens solution
    pub max_solutions: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            pointer_steps: constants::POINTER_STEP_BOUND,
            happy_steps: constants::HAPPY_STEP_BOUND,
            max_solutions: Some(constants::QUEENS_SOLUTION_LIMIT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Preorder,
    Inorder,
    Postorder,
    LevelOrder,
    Zigzag,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Preorder => "Preorder",
            TraversalOrder::Inorder => "Inorder",
            TraversalOrder::Postorder => "Postorder",
            TraversalOrder::LevelOrder => "Level order",
            TraversalOrder::Zigzag => "Zigzag",
        };
        f.write_str(name)
    }
}

/// A problem instance: the structure under study plus its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Cycle(LinkedList),
    /// `n + 1` values drawn from `1..=n`
    Duplicate(Vec<usize>),
    Happy(u64),
    Middle(LinkedList),
    Merge(Vec<Interval>),
    Insert { existing: Vec<Interval>, new: Interval },
    MeetingRooms(Vec<Interval>),
    NonOverlap(Vec<Interval>),
    Queens { size: usize },
    Sudoku(SudokuGrid),
    KthLargest { values: Vec<i64>, k: usize },
    TopFrequent { values: Vec<i64>, k: usize },
    Closest { points: Vec<Point>, k: usize },
    Traversal { tree: BinaryTree, order: TraversalOrder },
    PathSum { tree: BinaryTree, target: i64 },
    Subsets(Vec<i64>),
    Permutations(Vec<i64>),
    Combinations { values: Vec<i64>, k: usize },
}

impl Problem {
    pub fn title(&self) -> String {
        match self {
            Problem::Cycle(_) => "Linked List Cycle Detection".to_string(),
            Problem::Duplicate(_) => "Find the Duplicate Number".to_string(),
            Problem::Happy(n) => format!("Happy Number: {}", n),
            Problem::Middle(_) => "Middle of the Linked List".to_string(),
            Problem::Merge(_) => "Merge Intervals".to_string(),
            Problem::Insert { new, .. } => format!("Insert Interval {}", new),
            Problem::MeetingRooms(_) => "Meeting Rooms".to_string(),
            Problem::NonOverlap(_) => "Non-overlapping Intervals".to_string(),
            Problem::Queens { size } => format!("{}-Queens", size),
            Problem::Sudoku(_) => "Sudoku Solver".to_string(),
            Problem::KthLargest { k, .. } => format!("K-th Largest Element (K = {})", k),
            Problem::TopFrequent { k, .. } => format!("Top {} Frequent Elements", k),
            Problem::Closest { k, .. } => format!("{} Closest Points to Origin", k),
            Problem::Traversal { order, .. } => format!("{} Traversal", order),
            Problem::PathSum { target, .. } => format!("Path Sum = {}", target),
            Problem::Subsets(_) => "Subsets".to_string(),
            Problem::Permutations(_) => "Permutations".to_string(),
            Problem::Combinations { k, .. } => format!("Combinations (k = {})", k),
        }
    }

    /// Result count the enumeration problems must reach
    pub fn expected_count(&self) -> Option<u128> {
        match self {
            Problem::Subsets(values) => Some(choices::subset_count(values.len())),
            Problem::Permutations(values) => Some(choices::permutation_count(values.len())),
            Problem::Combinations { values, k } => {
                Some(choices::combination_count(values.len(), *k))
            }
            _ => None,
        }
    }

    /// Snapshot shown before any transition is applied
    pub fn initial_snapshot(&self) -> Snapshot {
        let frame = match self {
            Problem::Cycle(list) | Problem::Middle(list) => Frame::Pointers(PointerFrame {
                nodes: list.nodes().to_vec(),
                phase: 1,
                ..PointerFrame::default()
            }),
            Problem::Duplicate(values) => Frame::Pointers(PointerFrame {
                nodes: pointers::index_graph(values),
                phase: 1,
                ..PointerFrame::default()
            }),
            Problem::Happy(n) => Frame::Pointers(PointerFrame {
                nodes: vec![ListNode {
                    value: *n as i64,
                    next: None,
                }],
                phase: 1,
                ..PointerFrame::default()
            }),
            Problem::Merge(intervals)
            | Problem::MeetingRooms(intervals)
            | Problem::NonOverlap(intervals) => Frame::Intervals(IntervalFrame {
                sorted: intervals.clone(),
                ..IntervalFrame::default()
            }),
            Problem::Insert { existing, new } => Frame::Intervals(IntervalFrame {
                sorted: existing.clone(),
                pending: Some(*new),
                ..IntervalFrame::default()
            }),
            Problem::Queens { size } => Frame::Board(BoardFrame {
                size: *size,
                cells: vec![0; size * size],
                givens: vec![false; size * size],
                ..BoardFrame::default()
            }),
            Problem::Sudoku(grid) => Frame::Board(backtracking::sudoku_frame(grid, grid, None, 0)),
            Problem::KthLargest { k, .. } | Problem::TopFrequent { k, .. } => {
                Frame::Heap(HeapFrame {
                    order: HeapOrder::Min,
                    capacity: *k,
                    ..HeapFrame::default()
                })
            }
            Problem::Closest { k, .. } => Frame::Heap(HeapFrame {
                order: HeapOrder::Max,
                capacity: *k,
                ..HeapFrame::default()
            }),
            Problem::Traversal { .. } | Problem::PathSum { .. } => {
                Frame::Tree(TreeFrame::default())
            }
            Problem::Subsets(_) | Problem::Permutations(_) | Problem::Combinations { .. } => {
                Frame::Choices(ChoiceFrame::default())
            }
        };

        Snapshot::new(frame, format!("{}: press space to start", self.title()))
    }

    /// Fresh transition sequence for this instance
    pub fn transitions(&self, limits: &Limits) -> Box<dyn Iterator<Item = Transition>> {
        match self {
            Problem::Cycle(list) => Box::new(pointers::CycleDetection::new(list.clone(), limits)),
            Problem::Duplicate(values) => {
                Box::new(pointers::FindDuplicate::new(values.clone(), limits))
            }
            Problem::Happy(n) => Box::new(pointers::HappyNumber::new(*n, limits)),
            Problem::Middle(list) => Box::new(pointers::FindMiddle::new(list.clone())),
            Problem::Merge(intervals) => Box::new(intervals::Merge::new(intervals)),
            Problem::Insert { existing, new } => {
                Box::new(intervals::Insert::new(existing, *new))
            }
            Problem::MeetingRooms(intervals) => Box::new(intervals::MeetingRooms::new(intervals)),
            Problem::NonOverlap(intervals) => Box::new(intervals::NonOverlap::new(intervals)),
            Problem::Queens { size } => {
                Box::new(backtracking::NQueens::new(*size, limits.max_solutions))
            }
            Problem::Sudoku(grid) => Box::new(backtracking::Sudoku::new(*grid)),
            Problem::KthLargest { values, k } => Box::new(top_k::KthLargest::new(values, *k)),
            Problem::TopFrequent { values, k } => Box::new(top_k::TopFrequent::new(values, *k)),
            Problem::Closest { points, k } => Box::new(top_k::Closest::new(points, *k)),
            Problem::Traversal { tree, order } => {
                Box::new(traversal::Traversal::new(tree.clone(), *order))
            }
            Problem::PathSum { tree, target } => {
                Box::new(traversal::PathSum::new(tree.clone(), *target))
            }
            Problem::Subsets(values) => Box::new(choices::Enumeration::subsets(values)),
            Problem::Permutations(values) => Box::new(choices::Enumeration::permutations(values)),
            Problem::Combinations { values, k } => {
                Box::new(choices::Enumeration::combinations(values, *k))
            }
        }
    }
}

/// Grid as nine lines of space separated digits, `0` for blanks
pub fn format_grid(grid: &SudokuGrid) -> String {
    grid.rows()
        .iter()
        .take(SIZE)
        .map(|row| row.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
