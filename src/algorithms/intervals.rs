// Interval scans: merge, insert, meeting rooms, non-overlapping removal

use super::{Outcome, Transition, TransitionKind};
use crate::snapshot::{Counters, Frame, Highlight, IntervalFrame};
use crate::structures::interval::{format_intervals, Interval};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Shared bookkeeping for the scanning state machines
struct Scan {
    frame: IntervalFrame,
    counters: Counters,
    done: bool,
}

impl Scan {
    fn sorted_by<K: Ord>(intervals: &[Interval], key: impl Fn(&Interval) -> K) -> Self {
        let mut sorted = intervals.to_vec();
        // Stable, so equal keys keep their input order
        sorted.sort_by_key(key);
        Scan {
            frame: IntervalFrame {
                sorted,
                ..IntervalFrame::default()
            },
            counters: Counters::default(),
            done: false,
        }
    }

    fn len(&self) -> usize {
        self.frame.sorted.len()
    }

    fn emit(
        &mut self,
        kind: TransitionKind,
        highlight: Highlight,
        narration: String,
    ) -> Transition {
        self.counters.steps += 1;
        self.frame.highlight = highlight;
        Transition::new(
            kind,
            narration,
            Frame::Intervals(self.frame.clone()),
            self.counters,
        )
    }

    fn conclude(&mut self, narration: String, outcome: Outcome) -> Transition {
        self.done = true;
        self.counters.steps += 1;
        self.frame.cursor = None;
        self.frame.highlight = Highlight::Idle;
        Transition::conclude(
            narration,
            Frame::Intervals(self.frame.clone()),
            self.counters,
            outcome,
        )
    }
}

/// Merge overlapping ranges. Touching ranges merge too.
pub struct Merge {
    scan: Scan,
    next: Option<usize>,
}

impl Merge {
    pub fn new(intervals: &[Interval]) -> Self {
        Merge {
            scan: Scan::sorted_by(intervals, |interval| interval.start),
            next: None,
        }
    }
}

impl Iterator for Merge {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.scan.done {
            return None;
        }

        let Some(index) = self.next else {
            if self.scan.len() == 0 {
                return Some(self.scan.conclude(
                    "No intervals to merge".to_string(),
                    Outcome::Merged(Vec::new()),
                ));
            }
            self.next = Some(0);
            let narration = format!(
                "Sorted intervals by start time: {}",
                format_intervals(&self.scan.frame.sorted)
            );
            return Some(self.scan.emit(TransitionKind::Setup, Highlight::Idle, narration));
        };

        let Some(&current) = self.scan.frame.sorted.get(index) else {
            let merged = self.scan.frame.accepted.clone();
            return Some(self.scan.conclude(
                format!("Merging complete! Result: {}", format_intervals(&merged)),
                Outcome::Merged(merged),
            ));
        };

        self.next = Some(index + 1);
        self.scan.frame.cursor = Some(index);

        match self.scan.frame.accepted.last_mut() {
            Some(last) if current.start <= last.end => {
                let before = *last;
                last.end = last.end.max(current.end);
                let after = *last;
                self.scan.counters.operations += 1;
                Some(self.scan.emit(
                    TransitionKind::Advance,
                    Highlight::Merging,
                    format!("Overlap found: merging {} with {} → {}", before, current, after),
                ))
            }
            Some(last) => {
                let narration = format!(
                    "No overlap: {} starts after {} ends; adding {}",
                    current, last, current
                );
                self.scan.frame.accepted.push(current);
                Some(self.scan.emit(TransitionKind::Advance, Highlight::Accepted, narration))
            }
            None => {
                self.scan.frame.accepted.push(current);
                Some(self.scan.emit(
                    TransitionKind::Advance,
                    Highlight::Accepted,
                    format!("Starting with first interval: {}", current),
                ))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertPhase {
    Start,
    /// Ranges ending before the new one starts
    Before,
    /// Ranges overlapping the growing new one
    Absorb,
    Commit,
    /// Everything after the inserted range
    After,
}

/// Insert a range into sorted, non-overlapping ranges, merging as needed
pub struct Insert {
    scan: Scan,
    new: Interval,
    index: usize,
    phase: InsertPhase,
}

impl Insert {
    pub fn new(existing: &[Interval], new: Interval) -> Self {
        let mut scan = Scan::sorted_by(existing, |interval| interval.start);
        scan.frame.pending = Some(new);
        Insert {
            scan,
            new,
            index: 0,
            phase: InsertPhase::Start,
        }
    }
}

impl Iterator for Insert {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.scan.done {
            return None;
        }

        loop {
            let current = self.scan.frame.sorted.get(self.index).copied();
            match self.phase {
                InsertPhase::Start => {
                    self.phase = InsertPhase::Before;
                    let narration = format!(
                        "Inserting {} into {}",
                        self.new,
                        format_intervals(&self.scan.frame.sorted)
                    );
                    return Some(self.scan.emit(TransitionKind::Setup, Highlight::Idle, narration));
                }
                InsertPhase::Before => match current {
                    Some(current) if current.end < self.new.start => {
                        self.scan.frame.cursor = Some(self.index);
                        self.scan.frame.accepted.push(current);
                        self.index += 1;
                        return Some(self.scan.emit(
                            TransitionKind::Advance,
                            Highlight::Accepted,
                            format!("{} ends before {} starts; keeping it", current, self.new),
                        ));
                    }
                    _ => self.phase = InsertPhase::Absorb,
                },
                InsertPhase::Absorb => {
                    let pending = self.scan.frame.pending.unwrap_or(self.new);
                    match current {
                        Some(current) if current.start <= pending.end => {
                            let merged = Interval::new(
                                pending.start.min(current.start),
                                pending.end.max(current.end),
                            );
                            self.scan.frame.cursor = Some(self.index);
                            self.scan.frame.pending = Some(merged);
                            self.scan.frame.rejected.push(self.index);
                            self.scan.counters.operations += 1;
                            self.index += 1;
                            return Some(self.scan.emit(
                                TransitionKind::Advance,
                                Highlight::Merging,
                                format!("{} overlaps {}: merged into {}", current, pending, merged),
                            ));
                        }
                        _ => self.phase = InsertPhase::Commit,
                    }
                }
                InsertPhase::Commit => {
                    self.phase = InsertPhase::After;
                    let Some(pending) = self.scan.frame.pending.take() else {
                        continue;
                    };
                    self.scan.frame.accepted.push(pending);
                    return Some(self.scan.emit(
                        TransitionKind::Choose,
                        Highlight::Accepted,
                        format!("Inserted {}", pending),
                    ));
                }
                InsertPhase::After => {
                    let Some(current) = current else {
                        let result = self.scan.frame.accepted.clone();
                        return Some(self.scan.conclude(
                            format!("Insertion complete! Result: {}", format_intervals(&result)),
                            Outcome::Merged(result),
                        ));
                    };
                    self.scan.frame.cursor = Some(self.index);
                    self.scan.frame.accepted.push(current);
                    self.index += 1;
                    return Some(self.scan.emit(
                        TransitionKind::Advance,
                        Highlight::Accepted,
                        format!("{} starts after the inserted range; keeping it", current),
                    ));
                }
            }
        }
    }
}

/// Can one person attend every meeting, and how many rooms would be needed
pub struct MeetingRooms {
    scan: Scan,
    index: usize,
    started: bool,
    /// End times of meetings holding a room, earliest first
    rooms: BinaryHeap<Reverse<(i64, usize)>>,
    peak: usize,
    conflict: bool,
}

impl MeetingRooms {
    pub fn new(intervals: &[Interval]) -> Self {
        MeetingRooms {
            scan: Scan::sorted_by(intervals, |interval| interval.start),
            index: 0,
            started: false,
            rooms: BinaryHeap::new(),
            peak: 0,
            conflict: false,
        }
    }

    fn occupied(&self) -> Vec<Interval> {
        let mut held: Vec<usize> = self.rooms.iter().map(|Reverse((_, idx))| *idx).collect();
        held.sort_unstable();
        held.into_iter()
            .filter_map(|idx| self.scan.frame.sorted.get(idx).copied())
            .collect()
    }
}

impl Iterator for MeetingRooms {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.scan.done {
            return None;
        }

        if !self.started {
            self.started = true;
            if self.scan.len() == 0 {
                return Some(self.scan.conclude(
                    "No meetings: nothing can conflict".to_string(),
                    Outcome::Attendance {
                        can_attend: true,
                        rooms: 0,
                    },
                ));
            }
            let narration = format!(
                "Sorted meetings by start time: {}",
                format_intervals(&self.scan.frame.sorted)
            );
            return Some(self.scan.emit(TransitionKind::Setup, Highlight::Idle, narration));
        }

        let Some(&current) = self.scan.frame.sorted.get(self.index) else {
            let (narration, can_attend) = if self.conflict {
                (
                    format!("Cannot attend all meetings; {} rooms needed", self.peak),
                    false,
                )
            } else {
                ("No conflicts found! Can attend all meetings".to_string(), true)
            };
            return Some(self.scan.conclude(
                narration,
                Outcome::Attendance {
                    can_attend,
                    rooms: self.peak,
                },
            ));
        };

        let index = self.index;
        self.index += 1;
        self.scan.frame.cursor = Some(index);

        while let Some(Reverse((end, _))) = self.rooms.peek() {
            if *end > current.start {
                break;
            }
            self.rooms.pop();
        }
        self.rooms.push(Reverse((current.end, index)));
        self.peak = self.peak.max(self.rooms.len());
        self.scan.frame.accepted = self.occupied();

        let previous = index
            .checked_sub(1)
            .and_then(|prev| self.scan.frame.sorted.get(prev).copied());

        match previous {
            Some(previous) if current.start < previous.end => {
                self.conflict = true;
                self.scan.frame.rejected.push(index);
                self.scan.counters.operations += 1;
                Some(self.scan.emit(
                    TransitionKind::Advance,
                    Highlight::Conflict,
                    format!(
                        "Conflict: {} starts before {} ends; {} room(s) in use",
                        current,
                        previous,
                        self.rooms.len()
                    ),
                ))
            }
            Some(previous) => Some(self.scan.emit(
                TransitionKind::Advance,
                Highlight::Accepted,
                format!(
                    "{} starts after {} ends; {} room(s) in use",
                    current,
                    previous,
                    self.rooms.len()
                ),
            )),
            None => Some(self.scan.emit(
                TransitionKind::Advance,
                Highlight::Accepted,
                format!("First meeting {} takes a room", current),
            )),
        }
    }
}

/// Fewest removals leaving the rest pairwise non-overlapping
pub struct NonOverlap {
    scan: Scan,
    index: usize,
    started: bool,
    last_end: Option<i64>,
    removed: usize,
}

impl NonOverlap {
    pub fn new(intervals: &[Interval]) -> Self {
        NonOverlap {
            scan: Scan::sorted_by(intervals, |interval| interval.end),
            index: 0,
            started: false,
            last_end: None,
            removed: 0,
        }
    }
}

impl Iterator for NonOverlap {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.scan.done {
            return None;
        }

        if !self.started {
            self.started = true;
            if self.scan.len() == 0 {
                return Some(self.scan.conclude(
                    "No intervals: nothing to remove".to_string(),
                    Outcome::Removals {
                        removed: 0,
                        kept: Vec::new(),
                    },
                ));
            }
            let narration = format!(
                "Sorted intervals by end time: {}",
                format_intervals(&self.scan.frame.sorted)
            );
            return Some(self.scan.emit(TransitionKind::Setup, Highlight::Idle, narration));
        }

        let Some(&current) = self.scan.frame.sorted.get(self.index) else {
            let kept = self.scan.frame.accepted.clone();
            return Some(self.scan.conclude(
                format!(
                    "Need to remove {} interval(s); kept {}",
                    self.removed,
                    format_intervals(&kept)
                ),
                Outcome::Removals {
                    removed: self.removed,
                    kept,
                },
            ));
        };

        let index = self.index;
        self.index += 1;
        self.scan.frame.cursor = Some(index);

        match self.last_end {
            Some(end) if current.start < end => {
                self.removed += 1;
                self.scan.frame.rejected.push(index);
                self.scan.counters.operations += 1;
                Some(self.scan.emit(
                    TransitionKind::Advance,
                    Highlight::Conflict,
                    format!(
                        "{} starts before {} (last kept end); removing it",
                        current, end
                    ),
                ))
            }
            _ => {
                self.last_end = Some(current.end);
                self.scan.frame.accepted.push(current);
                Some(self.scan.emit(
                    TransitionKind::Advance,
                    Highlight::Accepted,
                    format!("Keeping {}", current),
                ))
            }
        }
    }
}
