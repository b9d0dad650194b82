// Fast and slow pointer walks

use algotrace::algorithms::{Limits, Outcome, Problem, Transition, TransitionKind};
use algotrace::snapshot::Frame;
use algotrace::structures::list::LinkedList;

fn run(problem: &Problem) -> Vec<Transition> {
    problem.transitions(&Limits::default()).collect()
}

fn outcome(transitions: &[Transition]) -> Outcome {
    transitions
        .last()
        .and_then(|t| t.outcome.clone())
        .expect("run should conclude with an outcome")
}

fn cursors(transition: &Transition) -> (Option<usize>, Option<usize>) {
    match &transition.frame {
        Frame::Pointers(frame) => (frame.slow, frame.fast),
        other => panic!("expected a pointer frame, got {:?}", other),
    }
}

#[test]
fn test_cycle_detected_quickly() {
    let list = LinkedList::with_cycle(&[4, 1, 2, 3], 1).expect("valid cycle position");
    let transitions = run(&Problem::Cycle(list));

    assert!(transitions.len() <= 8, "took {} transitions", transitions.len());
    match outcome(&transitions) {
        Outcome::Cycle { meeting, heuristic } => {
            assert!(!heuristic);
            // The meeting point lies on the cycle 1 → 2 → 3 → 1
            assert!((1..=3).contains(&meeting));
        }
        other => panic!("expected a cycle, got {:?}", other),
    }
}

#[test]
fn test_acyclic_list_ends_on_tail() {
    for len in 1..=7 {
        let values: Vec<i64> = (0..len).collect();
        let transitions = run(&Problem::Cycle(LinkedList::from_values(&values)));

        assert_eq!(outcome(&transitions), Outcome::NoCycle, "len {}", len);
        let tail = (len - 1) as usize;
        let last = transitions.last().expect("at least one transition");
        assert_eq!(cursors(last), (Some(tail), Some(tail)), "len {}", len);
    }
}

#[test]
fn test_cycle_found_within_list_length() {
    // Includes the single node pointing at itself
    for len in 1..=9i64 {
        for position in 0..len as usize {
            let values: Vec<i64> = (0..len).collect();
            let list = LinkedList::with_cycle(&values, position).expect("valid cycle position");
            let transitions = run(&Problem::Cycle(list));

            assert!(
                transitions.len() <= 2 * len as usize,
                "len {} pos {} took {}",
                len,
                position,
                transitions.len()
            );
            assert!(matches!(
                outcome(&transitions),
                Outcome::Cycle {
                    heuristic: false,
                    ..
                }
            ));
        }
    }
}

#[test]
fn test_empty_list_concludes_immediately() {
    let transitions = run(&Problem::Cycle(LinkedList::from_values(&[])));
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].kind, TransitionKind::Conclude);
    assert_eq!(outcome(&transitions), Outcome::NoCycle);
}

#[test]
fn test_find_duplicate() {
    let transitions = run(&Problem::Duplicate(vec![1, 3, 4, 2, 2]));
    assert_eq!(outcome(&transitions), Outcome::Duplicate(Some(2)));

    let transitions = run(&Problem::Duplicate(vec![3, 1, 3, 4, 2]));
    assert_eq!(outcome(&transitions), Outcome::Duplicate(Some(3)));
}

#[test]
fn test_find_duplicate_second_phase_is_marked() {
    let transitions = run(&Problem::Duplicate(vec![1, 3, 4, 2, 2]));
    let phases: Vec<u8> = transitions
        .iter()
        .filter_map(|t| match &t.frame {
            Frame::Pointers(frame) => Some(frame.phase),
            _ => None,
        })
        .collect();

    assert_eq!(phases.first(), Some(&1));
    assert_eq!(phases.last(), Some(&2));
}

#[test]
fn test_happy_numbers() {
    let transitions = run(&Problem::Happy(19));
    assert_eq!(
        outcome(&transitions),
        Outcome::Happy {
            happy: true,
            heuristic: false
        }
    );

    let transitions = run(&Problem::Happy(2));
    assert_eq!(
        outcome(&transitions),
        Outcome::Happy {
            happy: false,
            heuristic: false
        }
    );
}

#[test]
fn test_happy_step_bound_is_reported() {
    let limits = Limits {
        happy_steps: 1,
        ..Limits::default()
    };
    let transitions: Vec<Transition> = Problem::Happy(2).transitions(&limits).collect();
    assert_eq!(
        outcome(&transitions),
        Outcome::Happy {
            happy: false,
            heuristic: true
        }
    );
}

#[test]
fn test_middle_node() {
    let odd = run(&Problem::Middle(LinkedList::from_values(&[1, 2, 3, 4, 5])));
    assert_eq!(outcome(&odd), Outcome::Middle(Some((2, 3))));

    // Even lengths settle on the first of the two middles
    let even = run(&Problem::Middle(LinkedList::from_values(&[1, 2, 3, 4])));
    assert_eq!(outcome(&even), Outcome::Middle(Some((1, 2))));

    let single = run(&Problem::Middle(LinkedList::from_values(&[7])));
    assert_eq!(outcome(&single), Outcome::Middle(Some((0, 7))));
}

#[test]
fn test_only_last_transition_carries_outcome() {
    let list = LinkedList::with_cycle(&[3, 2, 0, -4], 1).expect("valid cycle position");
    let transitions = run(&Problem::Cycle(list));
    let (last, rest) = transitions.split_last().expect("non-empty run");

    assert!(rest.iter().all(|t| t.outcome.is_none()));
    assert_eq!(last.kind, TransitionKind::Conclude);
}
