//! Constraint backtracking: N-Queens and Sudoku
//!
//! Both solvers keep their search stack explicitly so the iterator can stop
//! after every placement or removal. Attempts that are rejected by the safety
//! check are counted but do not produce transitions of their own.

use super::{Outcome, Transition, TransitionKind};
use crate::snapshot::{BoardFrame, Counters, Frame};
use crate::structures::grid::{SudokuGrid, SIZE};

/// Build the board frame for a Sudoku grid. `original` marks the givens.
pub fn sudoku_frame(
    grid: &SudokuGrid,
    original: &SudokuGrid,
    focus: Option<(usize, usize)>,
    solutions: usize,
) -> BoardFrame {
    let cells = grid.rows().iter().flatten().copied().collect();
    let givens = original.rows().iter().flatten().map(|&d| d != 0).collect();
    BoardFrame {
        size: SIZE,
        cells,
        givens,
        focus,
        solutions,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Search,
    Backtrack,
    Finish,
    Done,
}

/// Place N queens so that none attack each other
pub struct NQueens {
    size: usize,
    /// Queen column for each filled row
    queens: Vec<usize>,
    /// First column still to try in the next row
    next_col: usize,
    limit: Option<usize>,
    solutions: Vec<Vec<usize>>,
    counters: Counters,
    phase: Phase,
}

impl NQueens {
    /// `limit` of `None` or `Some(0)` enumerates every solution
    pub fn new(size: usize, limit: Option<usize>) -> Self {
        NQueens {
            size,
            queens: Vec::with_capacity(size),
            next_col: 0,
            limit: limit.filter(|&n| n > 0),
            solutions: Vec::new(),
            counters: Counters::default(),
            phase: Phase::Start,
        }
    }

    /// Column and both diagonals against every queen already placed
    fn is_safe(&self, row: usize, col: usize) -> bool {
        self.queens.iter().enumerate().all(|(r, &c)| {
            c != col && r.abs_diff(row) != c.abs_diff(col)
        })
    }

    fn frame(&self) -> Frame {
        let mut cells = vec![0; self.size * self.size];
        for (row, &col) in self.queens.iter().enumerate() {
            cells[row * self.size + col] = 1;
        }
        let focus = self.queens.last().map(|&col| (self.queens.len() - 1, col));
        Frame::Board(BoardFrame {
            size: self.size,
            cells,
            givens: vec![false; self.size * self.size],
            focus,
            solutions: self.solutions.len(),
        })
    }

    fn emit(&mut self, kind: TransitionKind, narration: String) -> Transition {
        self.counters.steps += 1;
        Transition::new(kind, narration, self.frame(), self.counters)
    }

    fn conclude(&mut self, narration: String) -> Transition {
        self.phase = Phase::Done;
        self.counters.steps += 1;
        Transition::conclude(
            narration,
            self.frame(),
            self.counters,
            Outcome::Queens(self.solutions.clone()),
        )
    }
}

impl Iterator for NQueens {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        match self.phase {
            Phase::Done => None,
            Phase::Start => {
                if self.size == 0 {
                    return Some(self.conclude("Empty board: nothing to place".to_string()));
                }
                self.phase = Phase::Search;
                Some(self.emit(
                    TransitionKind::Setup,
                    format!("Starting N-Queens solver for {}x{} board", self.size, self.size),
                ))
            }
            Phase::Search => {
                let row = self.queens.len();
                if row == self.size {
                    self.solutions.push(self.queens.clone());
                    let found = self.solutions.len();
                    self.phase = match self.limit {
                        Some(limit) if found >= limit => Phase::Finish,
                        _ => Phase::Backtrack,
                    };
                    return Some(self.emit(
                        TransitionKind::Emit,
                        format!("Solution {} found!", found),
                    ));
                }

                for col in self.next_col..self.size {
                    self.counters.attempts += 1;
                    if self.is_safe(row, col) {
                        self.queens.push(col);
                        self.next_col = 0;
                        return Some(self.emit(
                            TransitionKind::Choose,
                            format!("Placing queen at row {}, col {}", row, col),
                        ));
                    }
                }

                self.phase = Phase::Backtrack;
                self.next()
            }
            Phase::Backtrack => {
                let Some(col) = self.queens.pop() else {
                    let found = self.solutions.len();
                    return Some(self.conclude(if found == 0 {
                        "Search space exhausted: no solution exists".to_string()
                    } else {
                        format!("All solutions found: {}", found)
                    }));
                };
                let row = self.queens.len();
                self.next_col = col + 1;
                self.counters.backtracks += 1;
                self.phase = Phase::Search;
                Some(self.emit(
                    TransitionKind::Undo,
                    format!("Backtracking: removing queen from row {}, col {}", row, col),
                ))
            }
            Phase::Finish => {
                let found = self.solutions.len();
                Some(self.conclude(format!("Stopped after {} solution(s)", found)))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SudokuPhase {
    Start,
    /// Pick the next empty cell
    Search,
    /// Try the next digit in the cell on top of the stack
    Try,
    /// Take back the digit in the cell on top of the stack
    Undo,
    Done,
}

/// Sudoku by depth-first digit placement
pub struct Sudoku {
    original: SudokuGrid,
    grid: SudokuGrid,
    /// Cells being filled, with the next digit to try in each
    stack: Vec<((usize, usize), u8)>,
    counters: Counters,
    phase: SudokuPhase,
}

impl Sudoku {
    pub fn new(grid: SudokuGrid) -> Self {
        Sudoku {
            original: grid,
            grid,
            stack: Vec::new(),
            counters: Counters::default(),
            phase: SudokuPhase::Start,
        }
    }

    fn frame(&self, focus: Option<(usize, usize)>, solutions: usize) -> Frame {
        Frame::Board(sudoku_frame(&self.grid, &self.original, focus, solutions))
    }

    fn emit(
        &mut self,
        kind: TransitionKind,
        narration: String,
        focus: Option<(usize, usize)>,
    ) -> Transition {
        self.counters.steps += 1;
        Transition::new(kind, narration, self.frame(focus, 0), self.counters)
    }
}

impl Iterator for Sudoku {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        loop {
            match self.phase {
                SudokuPhase::Done => return None,
                SudokuPhase::Start => {
                    self.phase = SudokuPhase::Search;
                    let blanks = SIZE * SIZE - self.grid.filled();
                    return Some(self.emit(
                        TransitionKind::Setup,
                        format!("Starting Sudoku solver: {} empty cells", blanks),
                        None,
                    ));
                }
                SudokuPhase::Search => match self.grid.first_empty() {
                    Some(cell) => {
                        self.stack.push((cell, 1));
                        self.phase = SudokuPhase::Try;
                    }
                    None => {
                        self.phase = SudokuPhase::Done;
                        self.counters.steps += 1;
                        return Some(Transition::conclude(
                            "Sudoku solved!",
                            self.frame(None, 1),
                            self.counters,
                            Outcome::Sudoku(Some(self.grid)),
                        ));
                    }
                },
                SudokuPhase::Try => {
                    let Some(top) = self.stack.last_mut() else {
                        self.phase = SudokuPhase::Undo;
                        continue;
                    };
                    let ((row, col), first) = *top;
                    let mut placed = None;
                    for digit in first..=9 {
                        self.counters.attempts += 1;
                        if self.grid.can_place(row, col, digit) {
                            placed = Some(digit);
                            break;
                        }
                    }

                    match placed {
                        Some(digit) => {
                            if let Some(top) = self.stack.last_mut() {
                                top.1 = digit + 1;
                            }
                            self.grid.set(row, col, digit);
                            self.phase = SudokuPhase::Search;
                            return Some(self.emit(
                                TransitionKind::Choose,
                                format!("Placing {} at ({}, {})", digit, row, col),
                                Some((row, col)),
                            ));
                        }
                        None => {
                            self.stack.pop();
                            self.phase = SudokuPhase::Undo;
                        }
                    }
                }
                SudokuPhase::Undo => {
                    let Some(&((row, col), _)) = self.stack.last() else {
                        self.phase = SudokuPhase::Done;
                        self.counters.steps += 1;
                        return Some(Transition::conclude(
                            "No solution exists for this puzzle",
                            self.frame(None, 0),
                            self.counters,
                            Outcome::Sudoku(None),
                        ));
                    };
                    let digit = self.grid.get(row, col);
                    self.grid.clear(row, col);
                    self.counters.backtracks += 1;
                    self.phase = SudokuPhase::Try;
                    return Some(self.emit(
                        TransitionKind::Undo,
                        format!("Backtracking: removing {} from ({}, {})", digit, row, col),
                        Some((row, col)),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queens_safety_check() {
        let mut queens = NQueens::new(4, None);
        queens.queens = vec![1];
        assert!(!queens.is_safe(1, 0));
        assert!(!queens.is_safe(1, 1));
        assert!(!queens.is_safe(1, 2));
        assert!(queens.is_safe(1, 3));
    }
}
