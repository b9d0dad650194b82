//! Structures under study and the input provider
//!
//! Every problem animates against one of these structures:
//! - [`list`]: singly-linked list stored as index links
//! - [`interval`]: closed ranges and 2D points
//! - [`tree`]: binary tree arena addressed by [`tree::NodeId`]
//! - [`grid`]: 9x9 Sudoku grid plus the built-in puzzle presets
//!
//! The input side lives next to them:
//! - [`parse`]: text formats accepted on the command line
//! - [`random`]: random instances for the "generate" command
//! - [`errors`]: [`InputError`] returned by both
//!
//! # Invariants
//!
//! Structures are validated here, once, before a run starts. The algorithm
//! core trusts them: `next` links always reference valid indices, tree child
//! links are acyclic, and Sudoku givens never conflict.

pub mod errors;
pub mod grid;
pub mod interval;
pub mod list;
pub mod parse;
pub mod random;
pub mod tree;

pub use errors::InputError;
