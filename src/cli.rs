//! Command line
//!
//! One subcommand per problem. Every input flag is optional: whatever is left
//! out is generated at random (reproducible with `--seed`), so
//! `algotrace queens` and `algotrace merge` work without any typing.

use crate::algorithms::constants::{MAX_BOARD_SIZE, MAX_CHOICE_INPUT};
use crate::algorithms::{Limits, Problem, TraversalOrder};
use crate::config::Settings;
use crate::driver::Speed;
use crate::structures::grid::SudokuPreset;
use crate::structures::interval::{validate_disjoint, Interval, IntervalPreset};
use crate::structures::list::{validate_duplicate_array, LinkedList};
use crate::structures::parse;
use crate::structures::random;
use crate::structures::tree::BinaryTree;
use crate::structures::InputError;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rand::Rng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "algotrace", version, about, long_about = None)]
pub struct Options {
    #[command(subcommand)]
    pub command: Command,

    /// Print the narration of the whole run instead of opening the TUI
    #[arg(long, global = true)]
    pub headless: bool,

    /// Seed for randomly generated inputs
    #[arg(long, global = true, value_name = "N")]
    pub seed: Option<u64>,

    /// Initial playback speed
    #[arg(long, global = true, value_enum, default_value_t = SpeedArg::Normal)]
    pub speed: SpeedArg,

    /// Solutions N-Queens stops after (0 = all)
    #[arg(long, global = true, default_value_t = 10)]
    pub max_solutions: usize,

    /// Step bound for the pointer walks
    #[arg(long, global = true, default_value_t = 50)]
    pub pointer_steps: usize,

    /// Step bound for the happy-number check
    #[arg(long, global = true, default_value_t = 30)]
    pub happy_steps: usize,

    /// Memory budget for step-back history, in MiB
    #[arg(long, global = true, value_name = "MIB")]
    pub history_mib: Option<usize>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Write logs to a file
    #[arg(long = "log", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Linked list cycle detection
    Cycle {
        /// List values, e.g. "3,2,0,-4"
        #[arg(long)]
        values: Option<String>,
        /// Index the tail links back to
        #[arg(long)]
        pos: Option<usize>,
    },
    /// Find the duplicate in n + 1 values drawn from 1..=n
    Duplicate {
        #[arg(long)]
        values: Option<String>,
    },
    /// Happy number check
    Happy { n: Option<u64> },
    /// Middle of a linked list
    Middle {
        #[arg(long)]
        values: Option<String>,
    },
    /// Merge overlapping intervals
    Merge {
        /// Intervals, e.g. "[1,3] [2,6]"
        #[arg(long, conflicts_with = "preset")]
        intervals: Option<String>,
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,
    },
    /// Insert an interval into sorted non-overlapping intervals
    Insert {
        #[arg(long)]
        intervals: Option<String>,
        /// Interval to insert, e.g. "[4,8]"
        #[arg(long = "new")]
        new_interval: Option<String>,
    },
    /// Can every meeting be attended, and how many rooms are needed
    MeetingRooms {
        #[arg(long, conflicts_with = "preset")]
        intervals: Option<String>,
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,
    },
    /// Fewest removals for non-overlapping intervals
    NonOverlap {
        #[arg(long, conflicts_with = "preset")]
        intervals: Option<String>,
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,
    },
    /// N-Queens
    Queens {
        #[arg(default_value_t = 8)]
        size: usize,
    },
    /// Sudoku solver
    Sudoku {
        #[arg(long, value_enum, conflicts_with = "grid")]
        preset: Option<SudokuArg>,
        /// 81 cells, "." or "0" for blanks
        #[arg(long)]
        grid: Option<String>,
    },
    /// K-th largest element
    KthLargest {
        #[arg(long)]
        values: Option<String>,
        #[arg(short, default_value_t = 2)]
        k: usize,
    },
    /// Top-K frequent elements
    TopFrequent {
        #[arg(long)]
        values: Option<String>,
        #[arg(short, default_value_t = 2)]
        k: usize,
    },
    /// K closest points to the origin
    Closest {
        /// Points, e.g. "[1,3] [-2,2]"
        #[arg(long)]
        points: Option<String>,
        #[arg(short, default_value_t = 2)]
        k: usize,
    },
    /// Binary tree traversal
    Traverse {
        #[arg(value_enum, default_value_t = OrderArg::In)]
        order: OrderArg,
        /// Level-order listing, e.g. "1,2,3,null,5"
        #[arg(long)]
        tree: Option<String>,
    },
    /// Root-to-leaf paths with a given sum
    PathSum {
        #[arg(long)]
        tree: Option<String>,
        #[arg(long)]
        target: Option<i64>,
    },
    /// All subsets
    Subsets {
        #[arg(long)]
        values: Option<String>,
    },
    /// All permutations
    Permutations {
        #[arg(long)]
        values: Option<String>,
    },
    /// All combinations of size k
    Combinations {
        #[arg(long)]
        values: Option<String>,
        #[arg(short, default_value_t = 2)]
        k: usize,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SpeedArg {
    Slow,
    Normal,
    Fast,
    Instant,
}

impl From<SpeedArg> for Speed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Slow => Speed::Slow,
            SpeedArg::Normal => Speed::Normal,
            SpeedArg::Fast => Speed::Fast,
            SpeedArg::Instant => Speed::Instant,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Calendar,
    Busy,
    Sparse,
    Complex,
}

impl From<PresetArg> for IntervalPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Calendar => IntervalPreset::Calendar,
            PresetArg::Busy => IntervalPreset::Busy,
            PresetArg::Sparse => IntervalPreset::Sparse,
            PresetArg::Complex => IntervalPreset::Complex,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SudokuArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<SudokuArg> for SudokuPreset {
    fn from(arg: SudokuArg) -> Self {
        match arg {
            SudokuArg::Easy => SudokuPreset::Easy,
            SudokuArg::Medium => SudokuPreset::Medium,
            SudokuArg::Hard => SudokuPreset::Hard,
            SudokuArg::Expert => SudokuPreset::Expert,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Pre,
    In,
    Post,
    Level,
    Zigzag,
}

impl From<OrderArg> for TraversalOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Pre => TraversalOrder::Preorder,
            OrderArg::In => TraversalOrder::Inorder,
            OrderArg::Post => TraversalOrder::Postorder,
            OrderArg::Level => TraversalOrder::LevelOrder,
            OrderArg::Zigzag => TraversalOrder::Zigzag,
        }
    }
}

impl Options {
    pub fn settings(&self) -> Settings {
        let limits = Limits {
            pointer_steps: self.pointer_steps,
            happy_steps: self.happy_steps,
            max_solutions: (self.max_solutions > 0).then_some(self.max_solutions),
        };
        let mut settings = Settings::default()
            .with_speed(self.speed.into())
            .with_limits(limits);
        if let Some(mib) = self.history_mib {
            settings.history_limit = mib.saturating_mul(1024 * 1024);
        }
        settings
    }

    /// `-v` count to a log level filter
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn check_k(k: usize, len: usize) -> Result<usize, InputError> {
    if k == 0 {
        return Err(InputError::InvalidK { k, max: len });
    }
    Ok(k)
}

fn check_choice_input(values: Vec<i64>) -> Result<Vec<i64>, InputError> {
    if values.len() > MAX_CHOICE_INPUT {
        return Err(InputError::TooLong {
            what: "input",
            len: values.len(),
            max: MAX_CHOICE_INPUT,
        });
    }
    Ok(values)
}

fn values_or<R: Rng>(
    text: &Option<String>,
    rng: &mut R,
    generate: impl FnOnce(&mut R) -> Vec<i64>,
) -> Result<Vec<i64>, InputError> {
    match text {
        Some(text) => parse::parse_values(text),
        None => Ok(generate(rng)),
    }
}

fn intervals_or<R: Rng>(
    text: &Option<String>,
    preset: Option<PresetArg>,
    rng: &mut R,
) -> Result<Vec<Interval>, InputError> {
    match (text, preset) {
        (Some(text), _) => parse::parse_intervals(text),
        (None, Some(preset)) => Ok(IntervalPreset::from(preset).intervals()),
        (None, None) => Ok(random::intervals(rng)),
    }
}

fn tree_or<R: Rng>(text: &Option<String>, rng: &mut R) -> Result<BinaryTree, InputError> {
    match text {
        Some(text) => BinaryTree::from_level_order(&parse::parse_tree(text)?),
        None => Ok(random_tree(rng)),
    }
}

/// Complete tree of 7 to 15 nodes with small values
fn random_tree<R: Rng>(rng: &mut R) -> BinaryTree {
    let len = rng.gen_range(7..=15);
    BinaryTree::complete(&random::numbers(rng, len, 30))
}

/// Sum along a random root-to-leaf path, so the search has something to find
fn reachable_target<R: Rng>(tree: &BinaryTree, rng: &mut R) -> i64 {
    let leaves: Vec<Vec<i64>> = leaf_paths(tree);
    if leaves.is_empty() {
        return 0;
    }
    leaves[rng.gen_range(0..leaves.len())].iter().sum()
}

fn leaf_paths(tree: &BinaryTree) -> Vec<Vec<i64>> {
    let mut paths = Vec::new();
    let mut stack: Vec<(usize, Vec<i64>)> = tree
        .root()
        .and_then(|root| tree.value(root).map(|value| (root, vec![value])))
        .into_iter()
        .collect();

    while let Some((id, path)) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if tree.is_leaf(id) {
            paths.push(path);
            continue;
        }
        for child in [node.left, node.right].into_iter().flatten() {
            if let Some(value) = tree.value(child) {
                let mut next = path.clone();
                next.push(value);
                stack.push((child, next));
            }
        }
    }
    paths
}

impl Command {
    /// Build the problem, parsing given inputs and generating missing ones
    pub fn problem<R: Rng>(&self, rng: &mut R) -> Result<Problem, InputError> {
        let problem = match self {
            Command::Cycle { values, pos } => match values {
                Some(text) => {
                    let values = parse::parse_values(text)?;
                    match pos {
                        Some(pos) => Problem::Cycle(LinkedList::with_cycle(&values, *pos)?),
                        None => Problem::Cycle(LinkedList::from_values(&values)),
                    }
                }
                None => Problem::Cycle(random::cycle_list(rng)),
            },
            Command::Duplicate { values } => match values {
                Some(text) => {
                    Problem::Duplicate(validate_duplicate_array(&parse::parse_values(text)?)?)
                }
                None => Problem::Duplicate(random::duplicate_array(rng)),
            },
            Command::Happy { n } => match n {
                Some(n) => match i64::try_from(*n) {
                    Ok(value) if value >= 1 => Problem::Happy(*n),
                    _ => {
                        return Err(InputError::HappyRange {
                            value: *n,
                            max: i64::MAX,
                        })
                    }
                },
                None => Problem::Happy(random::happy_candidate(rng)),
            },
            Command::Middle { values } => match values {
                Some(text) => Problem::Middle(LinkedList::from_values(&parse::parse_values(text)?)),
                None => Problem::Middle(random::middle_list(rng)),
            },
            Command::Merge { intervals, preset } => {
                Problem::Merge(intervals_or(intervals, *preset, rng)?)
            }
            Command::Insert {
                intervals,
                new_interval,
            } => match (intervals, new_interval) {
                (None, None) => {
                    let (existing, new) = random::insertion(rng);
                    Problem::Insert { existing, new }
                }
                (existing, new) => {
                    let existing = match existing {
                        Some(text) => validate_disjoint(parse::parse_intervals(text)?)?,
                        None => random::insertion(rng).0,
                    };
                    let new = match new {
                        Some(text) => parse::parse_interval(text)?,
                        None => random::insertion(rng).1,
                    };
                    Problem::Insert { existing, new }
                }
            },
            Command::MeetingRooms { intervals, preset } => {
                Problem::MeetingRooms(intervals_or(intervals, *preset, rng)?)
            }
            Command::NonOverlap { intervals, preset } => {
                Problem::NonOverlap(intervals_or(intervals, *preset, rng)?)
            }
            Command::Queens { size } => {
                if !(1..=MAX_BOARD_SIZE).contains(size) {
                    return Err(InputError::BoardSize {
                        size: *size,
                        max: MAX_BOARD_SIZE,
                    });
                }
                Problem::Queens { size: *size }
            }
            Command::Sudoku { preset, grid } => match (grid, preset) {
                (Some(text), _) => Problem::Sudoku(parse::parse_sudoku(text)?),
                (None, Some(preset)) => Problem::Sudoku(SudokuPreset::from(*preset).grid()),
                (None, None) => Problem::Sudoku(SudokuPreset::Easy.grid()),
            },
            Command::KthLargest { values, k } => {
                let values = values_or(values, rng, |rng| random::numbers(rng, 8, 20))?;
                let k = check_k(*k, values.len())?;
                Problem::KthLargest { values, k }
            }
            Command::TopFrequent { values, k } => {
                let values = values_or(values, rng, random::frequencies)?;
                let k = check_k(*k, values.len())?;
                Problem::TopFrequent { values, k }
            }
            Command::Closest { points, k } => {
                let points = match points {
                    Some(text) => parse::parse_points(text)?,
                    None => random::points(rng),
                };
                let k = check_k(*k, points.len())?;
                Problem::Closest { points, k }
            }
            Command::Traverse { order, tree } => Problem::Traversal {
                tree: tree_or(tree, rng)?,
                order: (*order).into(),
            },
            Command::PathSum { tree, target } => {
                let tree = tree_or(tree, rng)?;
                let target = match target {
                    Some(target) => *target,
                    None => reachable_target(&tree, rng),
                };
                Problem::PathSum { tree, target }
            }
            Command::Subsets { values } => Problem::Subsets(check_choice_input(values_or(
                values,
                rng,
                |rng| random::distinct(rng, 3),
            )?)?),
            Command::Permutations { values } => Problem::Permutations(check_choice_input(
                values_or(values, rng, |rng| random::distinct(rng, 3))?,
            )?),
            Command::Combinations { values, k } => Problem::Combinations {
                values: check_choice_input(values_or(values, rng, |rng| {
                    random::distinct(rng, 4)
                })?)?,
                k: *k,
            },
        };

        log::info!("selected problem: {}", problem.title());
        Ok(problem)
    }

    /// Same problem with every input regenerated. `k` and the traversal
    /// order are kept; N-Queens draws a new board size.
    pub fn regenerate<R: Rng>(&self, rng: &mut R) -> Result<Problem, InputError> {
        let fresh = match self {
            Command::Cycle { .. } => Command::Cycle {
                values: None,
                pos: None,
            },
            Command::Duplicate { .. } => Command::Duplicate { values: None },
            Command::Happy { .. } => Command::Happy { n: None },
            Command::Middle { .. } => Command::Middle { values: None },
            Command::Merge { .. } => Command::Merge {
                intervals: None,
                preset: None,
            },
            Command::Insert { .. } => Command::Insert {
                intervals: None,
                new_interval: None,
            },
            Command::MeetingRooms { .. } => Command::MeetingRooms {
                intervals: None,
                preset: None,
            },
            Command::NonOverlap { .. } => Command::NonOverlap {
                intervals: None,
                preset: None,
            },
            Command::Queens { .. } => Command::Queens {
                size: rng.gen_range(4..=8),
            },
            Command::Sudoku { .. } => {
                let presets = [
                    SudokuArg::Easy,
                    SudokuArg::Medium,
                    SudokuArg::Hard,
                    SudokuArg::Expert,
                ];
                Command::Sudoku {
                    preset: Some(presets[rng.gen_range(0..presets.len())]),
                    grid: None,
                }
            }
            Command::KthLargest { k, .. } => Command::KthLargest { values: None, k: *k },
            Command::TopFrequent { k, .. } => Command::TopFrequent { values: None, k: *k },
            Command::Closest { k, .. } => Command::Closest { points: None, k: *k },
            Command::Traverse { order, .. } => Command::Traverse {
                order: *order,
                tree: None,
            },
            Command::PathSum { .. } => Command::PathSum {
                tree: None,
                target: None,
            },
            Command::Subsets { .. } => Command::Subsets { values: None },
            Command::Permutations { .. } => Command::Permutations { values: None },
            Command::Combinations { k, .. } => Command::Combinations { values: None, k: *k },
        };
        fresh.problem(rng)
    }
}
