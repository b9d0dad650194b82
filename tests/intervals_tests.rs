// Interval scans

use algotrace::algorithms::{Limits, Outcome, Problem};
use algotrace::cli::Options;
use algotrace::structures::interval::{validate_disjoint, Interval, IntervalPreset};
use algotrace::structures::parse::parse_intervals;
use algotrace::structures::random;
use algotrace::structures::InputError;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn outcome(problem: &Problem) -> Outcome {
    problem
        .transitions(&Limits::default())
        .last()
        .and_then(|t| t.outcome)
        .expect("run should conclude with an outcome")
}

fn merged(problem: &Problem) -> Vec<Interval> {
    match outcome(problem) {
        Outcome::Merged(intervals) => intervals,
        other => panic!("expected merged intervals, got {:?}", other),
    }
}

#[test]
fn test_merge_calendar() {
    let intervals = parse_intervals("[[1,3],[2,6],[8,10],[15,18]]").expect("valid intervals");
    let result = merged(&Problem::Merge(intervals));
    let expected = parse_intervals("[[1,6],[8,10],[15,18]]").expect("valid intervals");
    assert_eq!(result, expected);
}

#[test]
fn test_merge_unsorted_and_touching() {
    let intervals = vec![Interval::new(4, 5), Interval::new(1, 4)];
    assert_eq!(merged(&Problem::Merge(intervals)), vec![Interval::new(1, 5)]);
}

#[test]
fn test_merge_empty() {
    assert_eq!(merged(&Problem::Merge(Vec::new())), Vec::new());
}

#[test]
fn test_merge_result_is_disjoint_and_sorted() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let intervals = random::intervals(&mut rng);
        let result = merged(&Problem::Merge(intervals.clone()));

        for pair in result.windows(2) {
            assert!(pair[0].end < pair[1].start, "{:?}", result);
        }
        // Every input range is covered by one merged range
        for interval in &intervals {
            assert!(result
                .iter()
                .any(|m| m.start <= interval.start && interval.end <= m.end));
        }
        // And the merged ranges cover nothing the inputs do not: compare
        // integer and half-integer points, held doubled
        let low = intervals.iter().map(|i| i.start).min().unwrap_or(0);
        let high = intervals.iter().map(|i| i.end).max().unwrap_or(0);
        for doubled in 2 * low - 2..=2 * high + 2 {
            assert_eq!(
                covers(&intervals, doubled),
                covers(&result, doubled),
                "point {}/2 in {:?} -> {:?}",
                doubled,
                intervals,
                result
            );
        }
    }
}

fn covers(intervals: &[Interval], doubled: i64) -> bool {
    intervals
        .iter()
        .any(|i| 2 * i.start <= doubled && doubled <= 2 * i.end)
}

#[test]
fn test_insert_matches_merge() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let (existing, new) = random::insertion(&mut rng);
        let inserted = merged(&Problem::Insert {
            existing: existing.clone(),
            new,
        });

        let mut union = existing;
        union.push(new);
        assert_eq!(inserted, merged(&Problem::Merge(union)));
    }
}

#[test]
fn test_insert_rejects_overlapping_existing_ranges() {
    let existing = parse_intervals("[1,5] [2,3]").expect("valid intervals");
    assert_eq!(
        validate_disjoint(existing),
        Err(InputError::OverlappingIntervals {
            first: Interval::new(1, 5),
            second: Interval::new(2, 3),
        })
    );

    let touching = parse_intervals("[4,6] [1,4]").expect("valid intervals");
    assert!(validate_disjoint(touching).is_err());

    let options = Options::parse_from([
        "algotrace",
        "insert",
        "--intervals",
        "[1,5] [2,3]",
        "--new",
        "[10,11]",
    ]);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        options.command.problem(&mut rng),
        Err(InputError::OverlappingIntervals { .. })
    ));
}

#[test]
fn test_insert_sorts_disjoint_existing_ranges() {
    let existing = parse_intervals("[6,9] [1,2]").expect("valid intervals");
    let existing = validate_disjoint(existing).expect("disjoint ranges");
    assert_eq!(existing, vec![Interval::new(1, 2), Interval::new(6, 9)]);

    let result = merged(&Problem::Insert {
        existing,
        new: Interval::new(2, 5),
    });
    assert_eq!(result, vec![Interval::new(1, 5), Interval::new(6, 9)]);
}

#[test]
fn test_insert_into_empty() {
    let new = Interval::new(2, 5);
    let result = merged(&Problem::Insert {
        existing: Vec::new(),
        new,
    });
    assert_eq!(result, vec![new]);
}

#[test]
fn test_meeting_rooms() {
    let conflicting = parse_intervals("[[0,30],[5,10],[15,20]]").expect("valid intervals");
    assert_eq!(
        outcome(&Problem::MeetingRooms(conflicting)),
        Outcome::Attendance {
            can_attend: false,
            rooms: 2
        }
    );

    let free = parse_intervals("[[7,10],[2,4]]").expect("valid intervals");
    assert_eq!(
        outcome(&Problem::MeetingRooms(free)),
        Outcome::Attendance {
            can_attend: true,
            rooms: 1
        }
    );
}

#[test]
fn test_meeting_rooms_back_to_back_share_a_room() {
    let intervals = parse_intervals("[[1,5],[5,10]]").expect("valid intervals");
    assert_eq!(
        outcome(&Problem::MeetingRooms(intervals)),
        Outcome::Attendance {
            can_attend: true,
            rooms: 1
        }
    );
}

#[test]
fn test_non_overlap_removals() {
    let intervals = parse_intervals("[[1,2],[2,3],[3,4],[1,3]]").expect("valid intervals");
    match outcome(&Problem::NonOverlap(intervals)) {
        Outcome::Removals { removed, kept } => {
            assert_eq!(removed, 1);
            assert_eq!(kept.len(), 3);
        }
        other => panic!("expected removals, got {:?}", other),
    }
}

#[test]
fn test_non_overlap_kept_ranges_do_not_overlap() {
    for preset in [
        IntervalPreset::Calendar,
        IntervalPreset::Busy,
        IntervalPreset::Sparse,
        IntervalPreset::Complex,
    ] {
        let intervals = preset.intervals();
        match outcome(&Problem::NonOverlap(intervals.clone())) {
            Outcome::Removals { removed, kept } => {
                assert_eq!(removed + kept.len(), intervals.len());
                for pair in kept.windows(2) {
                    assert!(pair[0].end <= pair[1].start, "{:?}", kept);
                }
            }
            other => panic!("expected removals, got {:?}", other),
        }
    }
}
