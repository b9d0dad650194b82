//! 9x9 Sudoku grid
//!
//! Empty cells hold `0`. A grid is only handed to the solver after
//! [`SudokuGrid::new`] confirmed the givens do not already conflict.

use super::errors::InputError;

pub const SIZE: usize = 9;
pub const BOX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SudokuGrid {
    cells: [[u8; SIZE]; SIZE],
}

/// Built-in puzzles, from a quick warm-up to a long backtracking run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SudokuPreset {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl SudokuPreset {
    pub fn grid(self) -> SudokuGrid {
        let cells = match self {
            SudokuPreset::Easy => [
                [5, 3, 0, 0, 7, 0, 0, 0, 0],
                [6, 0, 0, 1, 9, 5, 0, 0, 0],
                [0, 9, 8, 0, 0, 0, 0, 6, 0],
                [8, 0, 0, 0, 6, 0, 0, 0, 3],
                [4, 0, 0, 8, 0, 3, 0, 0, 1],
                [7, 0, 0, 0, 2, 0, 0, 0, 6],
                [0, 6, 0, 0, 0, 0, 2, 8, 0],
                [0, 0, 0, 4, 1, 9, 0, 0, 5],
                [0, 0, 0, 0, 8, 0, 0, 7, 9],
            ],
            SudokuPreset::Medium => [
                [0, 0, 0, 6, 0, 0, 4, 0, 0],
                [7, 0, 0, 0, 0, 3, 6, 0, 0],
                [0, 0, 0, 0, 9, 1, 0, 8, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 5, 0, 1, 8, 0, 0, 0, 3],
                [0, 0, 0, 3, 0, 6, 0, 4, 5],
                [0, 4, 0, 2, 0, 0, 0, 6, 0],
                [9, 0, 3, 0, 0, 0, 0, 0, 0],
                [0, 2, 0, 0, 0, 0, 1, 0, 0],
            ],
            SudokuPreset::Hard => [
                [0, 0, 0, 0, 0, 0, 0, 1, 2],
                [0, 0, 0, 0, 3, 5, 0, 0, 0],
                [0, 0, 0, 6, 0, 0, 0, 7, 0],
                [7, 0, 0, 0, 0, 0, 3, 0, 0],
                [0, 0, 0, 4, 0, 0, 8, 0, 0],
                [1, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 1, 2, 0, 0, 0, 0],
                [0, 8, 0, 0, 0, 0, 0, 4, 0],
                [0, 5, 0, 0, 0, 0, 6, 0, 0],
            ],
            SudokuPreset::Expert => [
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 3, 0, 8, 5],
                [0, 0, 1, 0, 2, 0, 0, 0, 0],
                [0, 0, 0, 5, 0, 7, 0, 0, 0],
                [0, 0, 4, 0, 0, 0, 1, 0, 0],
                [0, 9, 0, 0, 0, 0, 0, 0, 0],
                [5, 0, 0, 0, 0, 0, 0, 7, 3],
                [0, 0, 2, 0, 1, 0, 0, 0, 0],
                [0, 0, 0, 0, 4, 0, 0, 0, 9],
            ],
        };
        // Presets are known-consistent
        SudokuGrid { cells }
    }
}

impl SudokuGrid {
    /// Validate digits and givens
    pub fn new(cells: [[u8; SIZE]; SIZE]) -> Result<Self, InputError> {
        let mut grid = SudokuGrid {
            cells: [[0; SIZE]; SIZE],
        };

        for (row, line) in cells.iter().enumerate() {
            for (col, &digit) in line.iter().enumerate() {
                if digit > 9 {
                    return Err(InputError::InvalidGrid {
                        reason: format!("digit {} at [{},{}]", digit, row, col),
                    });
                }
                if digit != 0 {
                    if !grid.can_place(row, col, digit) {
                        return Err(InputError::InvalidGrid {
                            reason: format!(
                                "{} at [{},{}] conflicts with a given",
                                digit, row, col
                            ),
                        });
                    }
                    grid.cells[row][col] = digit;
                }
            }
        }

        Ok(grid)
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, digit: u8) {
        self.cells[row][col] = digit;
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = 0;
    }

    pub fn rows(&self) -> &[[u8; SIZE]; SIZE] {
        &self.cells
    }

    /// Row, column and 3x3 box check for placing `digit` at an empty cell
    pub fn can_place(&self, row: usize, col: usize, digit: u8) -> bool {
        if (0..SIZE).any(|c| self.cells[row][c] == digit) {
            return false;
        }
        if (0..SIZE).any(|r| self.cells[r][col] == digit) {
            return false;
        }

        let box_row = (row / BOX) * BOX;
        let box_col = (col / BOX) * BOX;
        !(0..BOX).any(|r| (0..BOX).any(|c| self.cells[box_row + r][box_col + c] == digit))
    }

    /// First empty cell in row-major order
    pub fn first_empty(&self) -> Option<(usize, usize)> {
        (0..SIZE * SIZE)
            .map(|i| (i / SIZE, i % SIZE))
            .find(|&(r, c)| self.cells[r][c] == 0)
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().flatten().filter(|&&d| d != 0).count()
    }

    /// Every row, column and box holds 1..=9 exactly once
    pub fn is_solved(&self) -> bool {
        let full = |digits: [u8; SIZE]| {
            let mut seen = [false; SIZE + 1];
            digits.iter().all(|&d| {
                let fresh = d != 0 && !seen[d as usize];
                if fresh {
                    seen[d as usize] = true;
                }
                fresh
            })
        };

        (0..SIZE).all(|i| {
            let row = self.cells[i];
            let col = std::array::from_fn(|r| self.cells[r][i]);
            let (br, bc) = ((i / BOX) * BOX, (i % BOX) * BOX);
            let boxed = std::array::from_fn(|k| self.cells[br + k / BOX][bc + k % BOX]);
            full(row) && full(col) && full(boxed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_consistent() {
        for preset in [
            SudokuPreset::Easy,
            SudokuPreset::Medium,
            SudokuPreset::Hard,
            SudokuPreset::Expert,
        ] {
            let grid = preset.grid();
            assert!(SudokuGrid::new(*grid.rows()).is_ok(), "{:?}", preset);
        }
    }

    #[test]
    fn test_conflicting_givens_rejected() {
        let mut cells = [[0; SIZE]; SIZE];
        cells[0][0] = 5;
        cells[0][8] = 5;
        assert!(SudokuGrid::new(cells).is_err());
    }

    #[test]
    fn test_box_check() {
        let grid = SudokuPreset::Easy.grid();
        // 5 already sits in the top-left box
        assert!(!grid.can_place(1, 1, 5));
        assert!(grid.can_place(0, 2, 4));
        assert_eq!(grid.first_empty(), Some((0, 2)));
    }
}
