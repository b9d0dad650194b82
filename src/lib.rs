//! # Introduction
//!
//! algotrace animates classic interview algorithms one state change at a
//! time: pointer races over linked lists, interval sweeps, backtracking
//! searches, bounded heaps, tree walks and combinatorial enumeration. Each
//! algorithm is a lazy sequence of transitions; a driver applies them on a
//! timer and a terminal UI built with [ratatui](https://docs.rs/ratatui)
//! draws whatever snapshot the driver currently holds.
//!
//! ## Pipeline
//!
//! ```text
//! Input → Structures → Algorithm → Transitions → Driver → Snapshot → TUI
//! ```
//!
//! 1. [`structures`]: input types, parsing, validation and random generators.
//! 2. [`algorithms`]: one iterator per problem yielding
//!    [`algorithms::Transition`]s that never run ahead of their consumer.
//! 3. [`snapshot`]: the displayable state and a memory-bounded history.
//! 4. [`driver`]: start, step, pause, reset and speed control, with
//!    cooperative cancellation at each suspension point.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! [`cli`] and [`config`] hold the command line and the settings it produces.

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod driver;
pub mod snapshot;
pub mod structures;
pub mod ui;
