//! Fast and slow pointers
//!
//! All four problems walk two cursors over an index-linked structure, the
//! slow one a single hop per iteration and the fast one two hops. Each
//! iteration is one transition.
//!
//! # Termination
//!
//! Floyd's walk over a finite structure meets within `len` iterations, so the
//! list-based walks cap themselves at `max(limits.pointer_steps, len)`; the
//! cap only matters if the links were not what the input provider promised.
//! The happy-number sequence has no structure length to lean on, and its cap
//! stays a heuristic: when it fires the outcome says so.

use super::{Limits, Outcome, Transition, TransitionKind};
use crate::snapshot::{Counters, Frame, PointerFrame};
use crate::structures::list::{LinkedList, ListNode};

/// Nodes for the find-duplicate index graph: slot `i` links to `values[i]`
pub fn index_graph(values: &[usize]) -> Vec<ListNode> {
    values
        .iter()
        .map(|&value| ListNode {
            value: value as i64,
            next: Some(value),
        })
        .collect()
}

/// Sum of the squares of the decimal digits
pub fn digit_square_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        let digit = n % 10;
        sum += digit * digit;
        n /= 10;
    }
    sum
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Start,
    Race,
    /// Fast hit the end; slow finishes the walk to the tail
    CatchUp,
    Done,
}

/// Floyd cycle detection on a linked list
pub struct CycleDetection {
    list: LinkedList,
    frame: PointerFrame,
    counters: Counters,
    bound: usize,
    state: Walk,
}

impl CycleDetection {
    pub fn new(list: LinkedList, limits: &Limits) -> Self {
        CycleDetection {
            bound: limits.pointer_steps.max(list.len()),
            frame: PointerFrame {
                nodes: list.nodes().to_vec(),
                phase: 1,
                ..PointerFrame::default()
            },
            list,
            counters: Counters::default(),
            state: Walk::Start,
        }
    }

    fn emit(&self, kind: TransitionKind, narration: String) -> Transition {
        Transition::new(kind, narration, Frame::Pointers(self.frame.clone()), self.counters)
    }

    fn conclude(&mut self, narration: String, outcome: Outcome) -> Transition {
        self.state = Walk::Done;
        Transition::conclude(narration, Frame::Pointers(self.frame.clone()), self.counters, outcome)
    }

    fn describe(&self, index: usize) -> String {
        match self.list.value_at(index) {
            Some(value) => format!("node {} (value {})", index, value),
            None => format!("node {}", index),
        }
    }
}

impl Iterator for CycleDetection {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        match self.state {
            Walk::Done => None,
            Walk::Start => {
                if self.list.is_empty() {
                    return Some(self.conclude(
                        "Empty list: nothing to walk, so no cycle".to_string(),
                        Outcome::NoCycle,
                    ));
                }
                self.frame.slow = Some(0);
                self.frame.fast = Some(0);
                self.state = Walk::Race;
                Some(self.emit(
                    TransitionKind::Setup,
                    "Slow and fast pointers start at the head (node 0)".to_string(),
                ))
            }
            Walk::Race => {
                let (Some(mut slow), Some(mut fast)) = (self.frame.slow, self.frame.fast) else {
                    self.state = Walk::Done;
                    return None;
                };
                self.counters.steps += 1;
                let step = self.counters.steps;

                if let Some(next) = self.list.next_of(slow) {
                    slow = next;
                }

                let mut reached_end = false;
                match self.list.next_of(fast) {
                    None => reached_end = true,
                    Some(first) => {
                        fast = first;
                        match self.list.next_of(first) {
                            None => reached_end = true,
                            Some(second) => fast = second,
                        }
                    }
                }

                self.frame.slow = Some(slow);
                self.frame.fast = Some(fast);

                if reached_end {
                    if self.list.next_of(slow).is_none() {
                        return Some(self.conclude(
                            format!(
                                "Step {}: fast pointer reached the end. No cycle exists!",
                                step
                            ),
                            Outcome::NoCycle,
                        ));
                    }
                    self.state = Walk::CatchUp;
                    return Some(self.emit(
                        TransitionKind::Advance,
                        format!(
                            "Step {}: fast pointer reached the end at {}, so there is no cycle; \
                             slow walks on to the tail",
                            step,
                            self.describe(fast)
                        ),
                    ));
                }

                if slow == fast {
                    return Some(self.conclude(
                        format!("Step {}: pointers met at node {}! Cycle detected", step, slow),
                        Outcome::Cycle {
                            meeting: slow,
                            heuristic: false,
                        },
                    ));
                }

                if step >= self.bound {
                    log::warn!("cycle detection hit its step bound ({})", self.bound);
                    return Some(self.conclude(
                        format!(
                            "Pointers have not met after {} steps; \
                             assuming a cycle (heuristic, not a proof)",
                            step
                        ),
                        Outcome::Cycle {
                            meeting: slow,
                            heuristic: true,
                        },
                    ));
                }

                Some(self.emit(
                    TransitionKind::Advance,
                    format!(
                        "Step {}: slow moves to {}, fast moves to {}",
                        step,
                        self.describe(slow),
                        self.describe(fast)
                    ),
                ))
            }
            Walk::CatchUp => {
                let slow = self.frame.slow?;
                let Some(next) = self.list.next_of(slow) else {
                    return Some(self.conclude(
                        "Both pointers rest on the tail. No cycle exists!".to_string(),
                        Outcome::NoCycle,
                    ));
                };
                self.counters.steps += 1;
                self.frame.slow = Some(next);

                if self.list.next_of(next).is_none() {
                    return Some(self.conclude(
                        format!(
                            "Slow pointer reached the tail at {}. No cycle exists!",
                            self.describe(next)
                        ),
                        Outcome::NoCycle,
                    ));
                }
                Some(self.emit(
                    TransitionKind::Advance,
                    format!("Slow pointer moves to {}", self.describe(next)),
                ))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    Start,
    Intersect,
    Rewind,
    Entrance,
    Done,
}

/// Floyd's find-the-duplicate over `i → values[i]`
pub struct FindDuplicate {
    values: Vec<usize>,
    frame: PointerFrame,
    counters: Counters,
    bound: usize,
    phase_steps: usize,
    state: Search,
}

impl FindDuplicate {
    pub fn new(values: Vec<usize>, limits: &Limits) -> Self {
        FindDuplicate {
            bound: limits.pointer_steps.max(values.len()),
            frame: PointerFrame {
                nodes: index_graph(&values),
                phase: 1,
                ..PointerFrame::default()
            },
            values,
            counters: Counters::default(),
            phase_steps: 0,
            state: Search::Start,
        }
    }

    fn hop(&self, index: usize) -> usize {
        self.values.get(index).copied().unwrap_or(index)
    }

    fn emit(&self, kind: TransitionKind, narration: String) -> Transition {
        Transition::new(kind, narration, Frame::Pointers(self.frame.clone()), self.counters)
    }

    fn conclude(&mut self, narration: String, outcome: Outcome) -> Transition {
        self.state = Search::Done;
        Transition::conclude(narration, Frame::Pointers(self.frame.clone()), self.counters, outcome)
    }
}

impl Iterator for FindDuplicate {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        match self.state {
            Search::Done => None,
            Search::Start => {
                if self.values.is_empty() {
                    return Some(self.conclude(
                        "Empty array: nothing to search".to_string(),
                        Outcome::Duplicate(None),
                    ));
                }
                self.frame.slow = Some(0);
                self.frame.fast = Some(0);
                self.state = Search::Intersect;
                Some(self.emit(
                    TransitionKind::Setup,
                    "Using array values as indices (Floyd's algorithm); \
                     both pointers start at index 0"
                        .to_string(),
                ))
            }
            Search::Intersect => {
                let (slow, fast) = (self.frame.slow?, self.frame.fast?);
                self.counters.steps += 1;
                self.phase_steps += 1;

                let slow = self.hop(slow);
                let fast = self.hop(self.hop(fast));
                self.frame.slow = Some(slow);
                self.frame.fast = Some(fast);

                if slow == fast {
                    self.state = Search::Rewind;
                    return Some(self.emit(
                        TransitionKind::Advance,
                        format!(
                            "Step {}: slow and fast meet at index {}",
                            self.counters.steps, slow
                        ),
                    ));
                }

                if self.phase_steps >= self.bound {
                    log::warn!("find-duplicate hit its step bound ({})", self.bound);
                    return Some(self.conclude(
                        format!(
                            "Pointers have not met after {} steps; giving up",
                            self.phase_steps
                        ),
                        Outcome::Duplicate(None),
                    ));
                }

                Some(self.emit(
                    TransitionKind::Advance,
                    format!(
                        "Step {}: slow at index {}, fast at index {}",
                        self.counters.steps, slow, fast
                    ),
                ))
            }
            Search::Rewind => {
                self.frame.slow = Some(0);
                self.frame.phase = 2;
                self.phase_steps = 0;

                if self.frame.fast == Some(0) {
                    return Some(self.conclude(
                        "Both pointers already sit at the cycle entrance".to_string(),
                        Outcome::Duplicate(Some(0)),
                    ));
                }
                self.state = Search::Entrance;
                Some(self.emit(
                    TransitionKind::Setup,
                    "Phase 2: reset slow pointer to index 0, move both one step at a time"
                        .to_string(),
                ))
            }
            Search::Entrance => {
                let (slow, fast) = (self.frame.slow?, self.frame.fast?);
                self.counters.steps += 1;
                self.phase_steps += 1;

                let slow = self.hop(slow);
                let fast = self.hop(fast);
                self.frame.slow = Some(slow);
                self.frame.fast = Some(fast);

                if slow == fast {
                    return Some(self.conclude(
                        format!(
                            "Pointers meet at index {}: found duplicate number {}!",
                            slow, slow
                        ),
                        Outcome::Duplicate(Some(slow)),
                    ));
                }

                if self.phase_steps >= self.bound {
                    log::warn!("find-duplicate phase 2 hit its step bound ({})", self.bound);
                    return Some(self.conclude(
                        format!(
                            "Pointers have not met after {} steps; giving up",
                            self.phase_steps
                        ),
                        Outcome::Duplicate(None),
                    ));
                }

                Some(self.emit(
                    TransitionKind::Advance,
                    format!(
                        "Step {}: slow at index {}, fast at index {}",
                        self.counters.steps, slow, fast
                    ),
                ))
            }
        }
    }
}

/// Happy-number check: slow applies the digit-square sum once, fast twice
pub struct HappyNumber {
    start: u64,
    trail: Vec<u64>,
    frame: PointerFrame,
    counters: Counters,
    bound: usize,
    state: Walk,
}

impl HappyNumber {
    pub fn new(start: u64, limits: &Limits) -> Self {
        HappyNumber {
            start,
            trail: vec![start],
            frame: PointerFrame {
                phase: 1,
                ..PointerFrame::default()
            },
            counters: Counters::default(),
            bound: limits.happy_steps,
            state: Walk::Start,
        }
    }

    fn sync_frame(&mut self) {
        self.frame.nodes = self
            .trail
            .iter()
            .enumerate()
            .map(|(i, &value)| ListNode {
                value: value as i64,
                next: (i + 1 < self.trail.len()).then_some(i + 1),
            })
            .collect();
    }

    fn emit(&self, kind: TransitionKind, narration: String) -> Transition {
        Transition::new(kind, narration, Frame::Pointers(self.frame.clone()), self.counters)
    }

    fn conclude(&mut self, narration: String, outcome: Outcome) -> Transition {
        self.state = Walk::Done;
        Transition::conclude(narration, Frame::Pointers(self.frame.clone()), self.counters, outcome)
    }
}

impl Iterator for HappyNumber {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        match self.state {
            Walk::Done | Walk::CatchUp => None,
            Walk::Start => {
                self.sync_frame();
                self.frame.slow = Some(0);
                self.frame.fast = Some(0);
                self.state = Walk::Race;
                Some(self.emit(
                    TransitionKind::Setup,
                    format!("Checking if {} is a happy number", self.start),
                ))
            }
            Walk::Race => {
                self.counters.steps += 1;
                let step = self.counters.steps;

                // The fast cursor sits at trail[2 * step]
                while self.trail.len() < 2 * step + 1 {
                    let last = self.trail[self.trail.len() - 1];
                    self.trail.push(digit_square_sum(last));
                }
                self.sync_frame();
                self.frame.slow = Some(step);
                self.frame.fast = Some(2 * step);

                let slow = self.trail[step];
                let fast = self.trail[2 * step];

                if slow == 1 || fast == 1 {
                    return Some(self.conclude(
                        format!(
                            "Step {}: slow = {}, fast = {}. {} is a happy number (reaches 1)",
                            step, slow, fast, self.start
                        ),
                        Outcome::Happy {
                            happy: true,
                            heuristic: false,
                        },
                    ));
                }

                if slow == fast {
                    return Some(self.conclude(
                        format!(
                            "Step {}: slow and fast both at {}. \
                             {} is not a happy number (cycles without reaching 1)",
                            step, slow, self.start
                        ),
                        Outcome::Happy {
                            happy: false,
                            heuristic: false,
                        },
                    ));
                }

                if step >= self.bound {
                    log::warn!("happy-number check hit its step bound ({})", self.bound);
                    return Some(self.conclude(
                        format!(
                            "No 1 and no meeting after {} steps: \
                             {} is likely not happy (heuristic)",
                            step, self.start
                        ),
                        Outcome::Happy {
                            happy: false,
                            heuristic: true,
                        },
                    ));
                }

                Some(self.emit(
                    TransitionKind::Advance,
                    format!("Step {}: slow = {}, fast = {}", step, slow, fast),
                ))
            }
        }
    }
}

/// Middle node: fast moves two hops per slow hop. Even lengths settle on the
/// first of the two middle nodes.
pub struct FindMiddle {
    list: LinkedList,
    frame: PointerFrame,
    counters: Counters,
    state: Walk,
}

impl FindMiddle {
    pub fn new(list: LinkedList) -> Self {
        FindMiddle {
            frame: PointerFrame {
                nodes: list.nodes().to_vec(),
                phase: 1,
                ..PointerFrame::default()
            },
            list,
            counters: Counters::default(),
            state: Walk::Start,
        }
    }

    fn emit(&self, kind: TransitionKind, narration: String) -> Transition {
        Transition::new(kind, narration, Frame::Pointers(self.frame.clone()), self.counters)
    }
}

impl Iterator for FindMiddle {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        match self.state {
            Walk::Done | Walk::CatchUp => None,
            Walk::Start => {
                if self.list.is_empty() {
                    self.state = Walk::Done;
                    return Some(Transition::conclude(
                        "Empty list has no middle",
                        Frame::Pointers(self.frame.clone()),
                        self.counters,
                        Outcome::Middle(None),
                    ));
                }
                self.frame.slow = Some(0);
                self.frame.fast = Some(0);
                self.state = Walk::Race;
                Some(self.emit(
                    TransitionKind::Setup,
                    format!("Finding middle of a list with {} nodes", self.list.len()),
                ))
            }
            Walk::Race => {
                let (slow, fast) = (self.frame.slow?, self.frame.fast?);

                let hops = self
                    .list
                    .next_of(fast)
                    .and_then(|first| self.list.next_of(first));
                let (Some(fast), Some(slow)) = (hops, self.list.next_of(slow)) else {
                    self.state = Walk::Done;
                    let value = self.list.value_at(slow).unwrap_or_default();
                    return Some(Transition::conclude(
                        format!("Found middle of list: node {} with value {}", slow, value),
                        Frame::Pointers(self.frame.clone()),
                        self.counters,
                        Outcome::Middle(Some((slow, value))),
                    ));
                };

                self.counters.steps += 1;
                self.frame.slow = Some(slow);
                self.frame.fast = Some(fast);

                let value = self.list.value_at(slow).unwrap_or_default();
                Some(self.emit(
                    TransitionKind::Advance,
                    format!(
                        "Step {}: slow at node {} (value {}), fast at node {}",
                        self.counters.steps, slow, value, fast
                    ),
                ))
            }
        }
    }
}
