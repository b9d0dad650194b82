// Rendering is a pure function of the problem and the snapshot

use algotrace::algorithms::{Limits, Problem, TraversalOrder};
use algotrace::cli::Command;
use algotrace::config::Settings;
use algotrace::driver::{Driver, Journal};
use algotrace::snapshot::Snapshot;
use algotrace::structures::grid::SudokuPreset;
use algotrace::structures::interval::{Interval, IntervalPreset, Point};
use algotrace::structures::list::LinkedList;
use algotrace::structures::tree::BinaryTree;
use algotrace::ui::panes::render_structure_pane;
use algotrace::ui::App;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn every_problem() -> Vec<Problem> {
    vec![
        Problem::Cycle(LinkedList::with_cycle(&[3, 2, 0, -4], 1).expect("valid cycle position")),
        Problem::Duplicate(vec![1, 3, 4, 2, 2]),
        Problem::Happy(19),
        Problem::Middle(LinkedList::from_values(&[1, 2, 3, 4, 5])),
        Problem::Merge(IntervalPreset::Calendar.intervals()),
        Problem::Insert {
            existing: vec![Interval::new(1, 2), Interval::new(3, 5), Interval::new(6, 7)],
            new: Interval::new(4, 8),
        },
        Problem::MeetingRooms(IntervalPreset::Busy.intervals()),
        Problem::NonOverlap(IntervalPreset::Complex.intervals()),
        Problem::Queens { size: 5 },
        Problem::Sudoku(SudokuPreset::Easy.grid()),
        Problem::KthLargest {
            values: vec![3, 2, 1, 5, 6, 4],
            k: 2,
        },
        Problem::TopFrequent {
            values: vec![1, 1, 1, 2, 2, 3],
            k: 2,
        },
        Problem::Closest {
            points: vec![Point::new(1, 3), Point::new(-2, 2), Point::new(5, 8)],
            k: 2,
        },
        Problem::Traversal {
            tree: BinaryTree::sample(),
            order: TraversalOrder::Zigzag,
        },
        Problem::PathSum {
            tree: BinaryTree::sample(),
            target: 22,
        },
        Problem::Subsets(vec![1, 2, 3]),
        Problem::Permutations(vec![1, 2, 3]),
        Problem::Combinations {
            values: vec![1, 2, 3, 4],
            k: 2,
        },
    ]
}

fn draw(problem: &Problem, snapshot: &Snapshot, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    let mut scroll = 0;
    terminal
        .draw(|frame| {
            render_structure_pane(frame, frame.area(), problem, snapshot, true, &mut scroll);
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_same_snapshot_same_buffer() {
    for problem in every_problem() {
        let mut snapshot = problem.initial_snapshot();
        for transition in problem.transitions(&Limits::default()).take(40) {
            transition.apply(&mut snapshot);
            let first = draw(&problem, &snapshot, 80, 30);
            let second = draw(&problem, &snapshot, 80, 30);
            assert_eq!(first, second, "{}", problem.title());
        }
    }
}

#[test]
fn test_tiny_areas_do_not_panic() {
    for problem in every_problem() {
        let mut snapshot = problem.initial_snapshot();
        for transition in problem.transitions(&Limits::default()).take(10) {
            transition.apply(&mut snapshot);
            for (width, height) in [(1, 1), (4, 3), (12, 5), (30, 8)] {
                draw(&problem, &snapshot, width, height);
            }
        }
    }
}

#[test]
fn test_structure_pane_shows_title_and_result() {
    let problem = Problem::Merge(IntervalPreset::Calendar.intervals());
    let mut snapshot = problem.initial_snapshot();
    for transition in problem.transitions(&Limits::default()) {
        transition.apply(&mut snapshot);
    }

    let text = buffer_text(&draw(&problem, &snapshot, 80, 20));
    assert!(text.contains("Merge Intervals"));
    assert!(text.contains("[1,6]"));
    assert!(text.contains("[15,18]"));
}

#[test]
fn test_app_renders_every_pane() {
    let problem = Problem::Subsets(vec![1, 2]);
    let driver = Driver::new(problem, &Settings::default());
    let command = Command::Subsets {
        values: Some("1,2".to_string()),
    };
    let mut app = App::new(driver, command, StdRng::seed_from_u64(1));
    let mut journal = Journal::new();
    app.driver.step(&mut journal).expect("step");
    app.journal = journal;

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
    terminal.draw(|frame| app.render(frame)).expect("draw");
    let text = buffer_text(terminal.backend().buffer());

    assert!(text.contains("Subsets"));
    assert!(text.contains("Narration"));
    assert!(text.contains("Stats"));
    assert!(text.contains("Found result: []"));
    assert!(text.contains("Step"));
}

#[test]
fn test_extreme_values_render() {
    let wide = vec![
        Interval::new(0, 1_000_000_000_000_000_000),
        Interval::new(5, 6),
        Interval::new(i64::MIN, i64::MAX),
    ];
    let problems = vec![
        Problem::Merge(wide.clone()),
        Problem::MeetingRooms(wide.clone()),
        Problem::NonOverlap(wide),
        Problem::Insert {
            existing: vec![Interval::new(i64::MIN, -1)],
            new: Interval::new(0, i64::MAX),
        },
        Problem::Closest {
            points: vec![Point::new(i64::MAX, i64::MIN), Point::new(1, 1)],
            k: 1,
        },
        Problem::PathSum {
            tree: BinaryTree::from_level_order(&[Some(i64::MAX), Some(1)]).expect("valid tree"),
            target: 0,
        },
    ];

    for problem in problems {
        let mut snapshot = problem.initial_snapshot();
        for transition in problem.transitions(&Limits::default()) {
            transition.apply(&mut snapshot);
            draw(&problem, &snapshot, 120, 40);
        }
    }
}
