// Default bounds for the algorithm core

/// Iterations allowed to a fast/slow pointer walk before it is declared a
/// cycle. Applied as `max(bound, structure length)`, so it only fires on
/// structures whose links break the input invariants.
pub const POINTER_STEP_BOUND: usize = 50;

/// Iterations allowed to the happy-number check before it settles on
/// "likely not happy"
pub const HAPPY_STEP_BOUND: usize = 30;

/// N-Queens stops after this many solutions unless configured otherwise
pub const QUEENS_SOLUTION_LIMIT: usize = 10;

/// Largest N-Queens board the input provider accepts
pub const MAX_BOARD_SIZE: usize = 12;

/// Longest input the subset, permutation and combination problems accept
pub const MAX_CHOICE_INPUT: usize = 8;
