// Animation driver: pacing, stepping, cancellation and history

use algotrace::algorithms::{Outcome, Problem, TransitionKind};
use algotrace::config::Settings;
use algotrace::driver::{Driver, DriverError, Journal, Printer, Sink, Speed};
use algotrace::structures::grid::SudokuPreset;
use algotrace::structures::interval::IntervalPreset;
use std::time::{Duration, Instant};

fn merge_problem() -> Problem {
    Problem::Merge(IntervalPreset::Calendar.intervals())
}

fn driver(problem: Problem) -> Driver {
    Driver::new(problem, &Settings::default())
}

/// Play a run to the end, ticking well past every deadline
fn play_to_end(driver: &mut Driver, journal: &mut Journal) {
    let mut now = Instant::now();
    assert!(driver.start(now));
    while driver.control().is_running {
        driver.tick(now, journal);
        now += Duration::from_secs(10);
    }
}

#[test]
fn test_stepping_matches_playing() {
    let mut stepped = driver(merge_problem());
    let mut stepped_journal = Journal::new();
    while stepped.step(&mut stepped_journal).is_ok() {}

    let mut played = driver(merge_problem());
    let mut played_journal = Journal::new();
    play_to_end(&mut played, &mut played_journal);

    assert_eq!(stepped_journal.output(), played_journal.output());
    assert_eq!(stepped.snapshot(), played.snapshot());
    assert_eq!(
        played_journal.last_conclusion(),
        Some(&played.snapshot().outcome.clone())
    );
    assert!(played.control().is_finished);
}

#[test]
fn test_positions_increase_by_one() {
    let mut driver = driver(Problem::Subsets(vec![1, 2, 3]));
    let mut journal = Journal::new();
    play_to_end(&mut driver, &mut journal);

    let positions = journal.positions();
    let expected: Vec<usize> = (1..=positions.len()).collect();
    assert_eq!(positions, expected);
    assert_eq!(
        driver
            .snapshot()
            .outcome
            .as_ref()
            .map(|o| matches!(o, Outcome::Enumerated(r) if r.len() == 8)),
        Some(true)
    );
}

#[test]
fn test_start_ignored_while_running() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    let t0 = Instant::now();

    assert!(driver.start(t0));
    assert!(driver.tick(t0, &mut journal));
    let position = driver.snapshot().position;

    assert!(!driver.start(t0));
    assert_eq!(driver.snapshot().position, position);
    assert!(driver.control().is_running);
}

#[test]
fn test_tick_waits_for_deadline() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    let t0 = Instant::now();

    driver.start(t0);
    assert!(driver.tick(t0, &mut journal));
    assert!(!driver.tick(t0 + Duration::from_millis(100), &mut journal));
    assert!(!driver.tick(t0 + Duration::from_millis(499), &mut journal));
    assert!(driver.tick(t0 + Duration::from_millis(500), &mut journal));
    assert_eq!(driver.snapshot().position, 2);
}

#[test]
fn test_speed_change_applies_at_next_suspension() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    let t0 = Instant::now();

    driver.start(t0);
    assert!(driver.tick(t0, &mut journal));

    // The pending deadline was armed at normal speed
    driver.set_speed(Speed::Fast);
    assert!(!driver.tick(t0 + Duration::from_millis(300), &mut journal));
    assert!(driver.tick(t0 + Duration::from_millis(500), &mut journal));

    // The next one uses the fast delay
    assert!(!driver.tick(t0 + Duration::from_millis(650), &mut journal));
    assert!(driver.tick(t0 + Duration::from_millis(700), &mut journal));
}

#[test]
fn test_reset_discards_in_flight_transition() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    let t0 = Instant::now();

    driver.start(t0);
    assert!(driver.tick(t0, &mut journal));
    assert_eq!(driver.snapshot().position, 1);

    driver.reset(&mut journal);
    assert_eq!(journal.last_conclusion(), Some(&None));
    assert_eq!(driver.snapshot(), &driver.problem().initial_snapshot());

    // Nothing from the cancelled run may land afterwards
    assert!(!driver.tick(t0 + Duration::from_secs(60), &mut journal));
    assert_eq!(driver.snapshot().position, 0);
    assert_eq!(journal.lines.len(), 1);
    assert!(!driver.control().is_running);
    assert!(!driver.control().is_finished);
}

#[test]
fn test_reset_when_idle_reports_nothing() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    driver.reset(&mut journal);
    assert!(journal.conclusions.is_empty());
}

#[test]
fn test_reset_restores_initial_speed() {
    let settings = Settings::default().with_speed(Speed::Slow);
    let mut driver = Driver::new(merge_problem(), &settings);
    let mut journal = Journal::new();

    driver.set_speed(Speed::Instant);
    assert_eq!(driver.speed(), Speed::Instant);
    driver.reset(&mut journal);
    assert_eq!(driver.speed(), Speed::Slow);
}

#[test]
fn test_step_refused_while_playing() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    driver.start(Instant::now());

    assert_eq!(driver.step(&mut journal), Err(DriverError::Busy));
    assert_eq!(driver.step_back(), Err(DriverError::Busy));

    driver.pause();
    assert!(driver.step(&mut journal).is_ok());
}

#[test]
fn test_step_back_and_replay() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();

    assert_eq!(driver.step_back(), Err(DriverError::AtStart));

    for _ in 0..3 {
        driver.step(&mut journal).expect("step");
    }
    let third = driver.snapshot().clone();
    let lines = journal.output();

    driver.step_back().expect("back to 2");
    driver.step_back().expect("back to 1");
    assert_eq!(driver.snapshot().position, 1);
    assert_eq!(driver.frontier(), 3);

    driver.step(&mut journal).expect("replay 2");
    driver.step(&mut journal).expect("replay 3");
    assert_eq!(driver.snapshot(), &third);
    assert_eq!(journal.output(), lines);

    // Past the frontier the iterator takes over again
    driver.step(&mut journal).expect("step 4");
    assert_eq!(driver.snapshot().position, 4);
}

#[test]
fn test_step_back_after_finish() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    while driver.step(&mut journal).is_ok() {}
    let end = driver.snapshot().position;

    assert_eq!(driver.step(&mut journal), Err(DriverError::Exhausted));
    driver.step_back().expect("history is retained after the run");
    assert_eq!(driver.snapshot().position, end - 1);
    driver.step(&mut journal).expect("replay the last step");
    assert_eq!(driver.snapshot().position, end);
}

#[test]
fn test_history_budget_limits_step_back() {
    let settings = Settings {
        history_limit: 1,
        ..Settings::default()
    };
    let mut driver = Driver::new(merge_problem(), &settings);
    let mut journal = Journal::new();
    driver.step(&mut journal).expect("step");
    driver.step(&mut journal).expect("step");

    assert_eq!(driver.history().len(), 1);
    assert_eq!(driver.step_back(), Err(DriverError::AtStart));
}

#[test]
fn test_next_result_stops_at_emits() {
    let mut driver = driver(Problem::Subsets(vec![1, 2]));
    let mut journal = Journal::new();

    driver.next_result(&mut journal).expect("first result");
    assert_eq!(driver.snapshot().kind, Some(TransitionKind::Emit));
    assert_eq!(driver.snapshot().narration, "Found result: []");

    driver.next_result(&mut journal).expect("second result");
    assert_eq!(driver.snapshot().narration, "Found result: [1]");
    assert_eq!(driver.snapshot().position, 3);
}

#[test]
fn test_set_problem_cancels_run() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    driver.start(Instant::now());

    driver.set_problem(Problem::Happy(19), &mut journal);
    assert_eq!(journal.last_conclusion(), Some(&None));
    assert_eq!(driver.problem(), &Problem::Happy(19));
    assert_eq!(driver.snapshot().position, 0);
    assert!(!driver.control().is_running);
}

#[test]
fn test_printer_writes_narration_and_result() {
    let mut buffer = Vec::new();
    let mut driver = driver(merge_problem());
    {
        let mut printer = Printer::new(&mut buffer);
        while driver.step(&mut printer).is_ok() {}
        printer.finish().expect("write to memory");
    }

    let text = String::from_utf8(buffer).expect("utf-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines.first(),
        Some(&"   1  Sorted intervals by start time: [1,3] [2,6] [8,10] [15,18]")
    );
    assert_eq!(
        lines.last(),
        Some(&"Result: 3 interval(s): [1,6] [8,10] [15,18]")
    );
}

#[test]
fn test_printer_reports_cancellation() {
    let mut buffer = Vec::new();
    {
        let mut printer = Printer::new(&mut buffer);
        printer.conclude(None);
        printer.finish().expect("write to memory");
    }
    assert_eq!(String::from_utf8(buffer).expect("utf-8"), "Cancelled\n");
}

#[test]
fn test_printer_shows_solved_grid() {
    let grid = SudokuPreset::Easy.grid();
    let mut buffer = Vec::new();
    let mut driver = driver(Problem::Sudoku(grid));
    {
        let mut printer = Printer::new(&mut buffer);
        while driver.step(&mut printer).is_ok() {}
        printer.finish().expect("write to memory");
    }

    let text = String::from_utf8(buffer).expect("utf-8");
    let lines: Vec<&str> = text.lines().collect();
    let result = lines
        .iter()
        .position(|line| *line == "Result: Solved")
        .expect("result line");
    let rows = &lines[result + 1..];
    assert_eq!(rows.len(), 9);
    for row in rows {
        let digits: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(digits.len(), 9, "{:?}", row);
        assert!(digits
            .iter()
            .all(|d| d.len() == 1 && ('1'..='9').contains(&d.chars().next().unwrap_or('0'))));
    }
}

#[test]
fn test_journal_rewrites_tail_on_replay() {
    let mut driver = driver(merge_problem());
    let mut journal = Journal::new();
    for _ in 0..4 {
        driver.step(&mut journal).expect("step");
    }
    driver.step_back().expect("step back");
    driver.step_back().expect("step back");
    driver.step(&mut journal).expect("replay");

    assert_eq!(journal.positions(), vec![1, 2, 3]);
}

#[test]
fn test_journal_keeps_latest_lines() {
    let mut driver = driver(Problem::Subsets(vec![1, 2, 3, 4, 5]));
    let mut journal = Journal::with_limit(20);
    while driver.step(&mut journal).is_ok() {}

    let positions = journal.positions();
    assert!(positions.len() <= 20);
    assert_eq!(positions.last().copied(), Some(driver.frontier()));
    assert!(positions.windows(2).all(|pair| pair[1] == pair[0] + 1));
}
