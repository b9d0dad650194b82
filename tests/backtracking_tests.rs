// N-Queens and Sudoku search

use algotrace::algorithms::backtracking::{NQueens, Sudoku};
use algotrace::algorithms::{Limits, Outcome, Problem, Transition, TransitionKind};
use algotrace::snapshot::Frame;
use algotrace::structures::grid::{SudokuGrid, SudokuPreset, SIZE};

fn queens(size: usize, limit: Option<usize>) -> Vec<Vec<usize>> {
    match NQueens::new(size, limit).last().and_then(|t| t.outcome) {
        Some(Outcome::Queens(solutions)) => solutions,
        other => panic!("expected queens outcome, got {:?}", other),
    }
}

fn non_attacking(solution: &[usize]) -> bool {
    solution.iter().enumerate().all(|(r1, &c1)| {
        solution
            .iter()
            .enumerate()
            .skip(r1 + 1)
            .all(|(r2, &c2)| c1 != c2 && r1.abs_diff(r2) != c1.abs_diff(c2))
    })
}

#[test]
fn test_four_queens_has_two_solutions() {
    let solutions = queens(4, None);
    assert_eq!(solutions, vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]]);
}

#[test]
fn test_queens_solutions_are_valid() {
    for size in 1..=7 {
        for solution in queens(size, None) {
            assert_eq!(solution.len(), size);
            assert!(non_attacking(&solution), "{:?}", solution);
        }
    }
}

#[test]
fn test_queens_known_counts() {
    let counts: Vec<usize> = (1..=8).map(|n| queens(n, None).len()).collect();
    assert_eq!(counts, vec![1, 0, 0, 2, 10, 4, 40, 92]);
}

#[test]
fn test_queens_solution_limit() {
    assert_eq!(queens(8, Some(10)).len(), 10);
    // Zero means no limit
    assert_eq!(queens(6, Some(0)).len(), 4);
}

#[test]
fn test_queens_board_tracks_placements() {
    for transition in NQueens::new(5, Some(1)) {
        let Frame::Board(board) = &transition.frame else {
            panic!("expected a board frame");
        };
        let placed = board.cells.iter().filter(|&&cell| cell != 0).count();
        assert!(placed <= 5);
        if transition.kind == TransitionKind::Emit {
            assert_eq!(placed, 5);
        }
    }
}

#[test]
fn test_queens_every_board_is_non_attacking() {
    for size in 1..=6 {
        for transition in NQueens::new(size, None) {
            let Frame::Board(board) = &transition.frame else {
                panic!("expected a board frame");
            };
            // One queen per row at most, rows filled from the top
            let columns: Vec<usize> = (0..size)
                .filter_map(|row| (0..size).find(|&col| board.cell(row, col) == 1))
                .collect();
            for row in 0..size {
                let in_row = (0..size).filter(|&col| board.cell(row, col) == 1).count();
                assert!(in_row <= 1, "size {} row {}: {:?}", size, row, board.cells);
            }
            assert!(
                non_attacking(&columns),
                "size {} after {:?}: {:?}",
                size,
                transition.kind,
                board.cells
            );
        }
    }
}

#[test]
fn test_queens_undo_follows_choose() {
    let transitions: Vec<Transition> = NQueens::new(4, None).collect();
    let chosen = transitions
        .iter()
        .filter(|t| t.kind == TransitionKind::Choose)
        .count();
    let undone = transitions
        .iter()
        .filter(|t| t.kind == TransitionKind::Undo)
        .count();
    // Every placement is eventually taken back once the search space is exhausted
    assert_eq!(chosen, undone);
}

#[test]
fn test_sudoku_easy_is_solved() {
    let grid = SudokuPreset::Easy.grid();
    let problem = Problem::Sudoku(grid);
    let outcome = problem
        .transitions(&Limits::default())
        .last()
        .and_then(|t| t.outcome);

    match outcome {
        Some(Outcome::Sudoku(Some(solved))) => {
            assert!(solved.is_solved());
            for row in 0..SIZE {
                for col in 0..SIZE {
                    let given = grid.get(row, col);
                    if given != 0 {
                        assert_eq!(solved.get(row, col), given);
                    }
                }
            }
        }
        other => panic!("expected a solved grid, got {:?}", other),
    }
}

#[test]
fn test_sudoku_givens_never_change() {
    let grid = SudokuPreset::Easy.grid();
    for transition in Sudoku::new(grid).take(500) {
        let Frame::Board(board) = &transition.frame else {
            panic!("expected a board frame");
        };
        for row in 0..SIZE {
            for col in 0..SIZE {
                if board.is_given(row, col) {
                    assert_eq!(board.cell(row, col), grid.get(row, col));
                }
            }
        }
    }
}

#[test]
fn test_sudoku_without_solution() {
    let mut cells = [[0u8; SIZE]; SIZE];
    cells[0] = [1, 2, 3, 4, 5, 6, 7, 8, 0];
    cells[1][8] = 9;
    let grid = SudokuGrid::new(cells).expect("givens do not conflict");

    let outcome = Sudoku::new(grid).last().and_then(|t| t.outcome);
    assert_eq!(outcome, Some(Outcome::Sudoku(None)));
}

#[test]
fn test_every_transition_is_counted() {
    let mut cells = [[0u8; SIZE]; SIZE];
    cells[0] = [1, 2, 3, 4, 5, 6, 7, 8, 0];
    cells[1][8] = 9;
    let unsolvable = SudokuGrid::new(cells).expect("givens do not conflict");

    let problems = [
        Problem::Sudoku(SudokuPreset::Easy.grid()),
        Problem::Sudoku(unsolvable),
        Problem::Queens { size: 4 },
        Problem::Queens { size: 0 },
    ];
    for problem in problems {
        let transitions: Vec<Transition> = problem.transitions(&Limits::default()).collect();
        for (index, transition) in transitions.iter().enumerate() {
            assert_eq!(transition.counters.steps, index + 1, "{}", problem.title());
        }
    }
}
