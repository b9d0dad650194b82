// Top-K selection with a heap bounded to K entries

use super::{Outcome, Transition, TransitionKind};
use crate::snapshot::{Candidate, Counters, Frame, HeapFrame, HeapOrder, Ranked};
use crate::structures::interval::Point;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Heap storage; `Min` evicts the smallest key, `Max` the largest
enum Storage {
    Min(BinaryHeap<Reverse<Ranked>>),
    Max(BinaryHeap<Ranked>),
}

impl Storage {
    fn new(order: HeapOrder) -> Self {
        match order {
            HeapOrder::Min => Storage::Min(BinaryHeap::new()),
            HeapOrder::Max => Storage::Max(BinaryHeap::new()),
        }
    }

    fn push(&mut self, item: Ranked) {
        match self {
            Storage::Min(heap) => heap.push(Reverse(item)),
            Storage::Max(heap) => heap.push(item),
        }
    }

    fn pop(&mut self) -> Option<Ranked> {
        match self {
            Storage::Min(heap) => heap.pop().map(|Reverse(item)| item),
            Storage::Max(heap) => heap.pop(),
        }
    }

    fn peek(&self) -> Option<Ranked> {
        match self {
            Storage::Min(heap) => heap.peek().map(|Reverse(item)| *item),
            Storage::Max(heap) => heap.peek().copied(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Storage::Min(heap) => heap.len(),
            Storage::Max(heap) => heap.len(),
        }
    }

    /// Entries in array order, root first
    fn items(&self) -> Vec<Ranked> {
        match self {
            Storage::Min(heap) => heap.iter().map(|Reverse(item)| *item).collect(),
            Storage::Max(heap) => heap.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Start,
    Push,
    Evict,
    Finish,
    Done,
}

/// Feeds candidates into the bounded heap, one push or eviction per transition
struct HeapScan {
    candidates: Vec<Ranked>,
    heap: Storage,
    frame: HeapFrame,
    counters: Counters,
    index: usize,
    step: Step,
    setup: String,
}

impl HeapScan {
    fn new(candidates: Vec<Ranked>, order: HeapOrder, capacity: usize, setup: String) -> Self {
        HeapScan {
            candidates,
            heap: Storage::new(order),
            frame: HeapFrame {
                order,
                capacity,
                ..HeapFrame::default()
            },
            counters: Counters::default(),
            index: 0,
            step: Step::Start,
            setup,
        }
    }

    fn emit(&mut self, kind: TransitionKind, narration: String) -> Transition {
        self.counters.steps += 1;
        self.frame.items = self.heap.items();
        Transition::new(kind, narration, Frame::Heap(self.frame.clone()), self.counters)
    }

    /// Advance the scan; `finish` builds the outcome from the final heap
    fn advance(
        &mut self,
        finish: impl FnOnce(&Storage, usize) -> (String, Outcome),
    ) -> Option<Transition> {
        match self.step {
            Step::Done => None,
            Step::Start => {
                if self.candidates.is_empty() || self.frame.capacity == 0 {
                    self.step = Step::Finish;
                    return self.advance(finish);
                }
                self.step = Step::Push;
                let setup = std::mem::take(&mut self.setup);
                Some(self.emit(TransitionKind::Setup, setup))
            }
            Step::Push => {
                let Some(&item) = self.candidates.get(self.index) else {
                    self.step = Step::Finish;
                    return self.advance(finish);
                };
                self.frame.cursor = Some(self.index);
                self.frame.evicted = None;
                self.index += 1;
                self.heap.push(item);
                self.counters.operations += 1;

                self.step = if self.heap.len() > self.frame.capacity {
                    Step::Evict
                } else if self.index >= self.candidates.len() {
                    Step::Finish
                } else {
                    Step::Push
                };
                Some(self.emit(
                    TransitionKind::Advance,
                    format!("Adding {} to heap", item.candidate),
                ))
            }
            Step::Evict => {
                let evicted = self.heap.pop();
                self.frame.evicted = evicted;
                self.counters.operations += 1;
                self.step = if self.index >= self.candidates.len() {
                    Step::Finish
                } else {
                    Step::Push
                };
                let narration = match evicted {
                    Some(item) => format!(
                        "Heap size exceeds {}, removing {}",
                        self.frame.capacity, item.candidate
                    ),
                    None => "Heap is empty".to_string(),
                };
                Some(self.emit(TransitionKind::Advance, narration))
            }
            Step::Finish => {
                self.step = Step::Done;
                self.counters.steps += 1;
                self.frame.cursor = None;
                self.frame.evicted = None;
                self.frame.items = self.heap.items();
                let (narration, outcome) = finish(&self.heap, self.candidates.len());
                Some(Transition::conclude(
                    narration,
                    Frame::Heap(self.frame.clone()),
                    self.counters,
                    outcome,
                ))
            }
        }
    }
}

/// Entries sorted with the largest key first
fn descending(heap: &Storage) -> Vec<Ranked> {
    let mut items = heap.items();
    items.sort_by(|a, b| b.cmp(a));
    items
}

/// K-th largest element via a min-heap of the K largest seen so far
pub struct KthLargest {
    scan: HeapScan,
    k: usize,
}

impl KthLargest {
    pub fn new(values: &[i64], k: usize) -> Self {
        let candidates = values
            .iter()
            .map(|&value| Ranked {
                key: value,
                candidate: Candidate::Number(value),
            })
            .collect();
        KthLargest {
            scan: HeapScan::new(
                candidates,
                HeapOrder::Min,
                k,
                format!("Finding {}-th largest element using a min-heap of size {}", k, k),
            ),
            k,
        }
    }
}

impl Iterator for KthLargest {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        let k = self.k;
        self.scan.advance(|heap, total| {
            let top: Vec<i64> = descending(heap).iter().map(|item| item.key).collect();
            if k == 0 || total < k {
                return (
                    format!("Only {} element(s): there is no {}-th largest", total, k),
                    Outcome::KthLargest { kth: None, top },
                );
            }
            let kth = heap.peek().map(|item| item.key);
            let narration = match kth {
                Some(value) => format!("The {}-th largest element is {}", k, value),
                None => "Heap is empty".to_string(),
            };
            (narration, Outcome::KthLargest { kth, top })
        })
    }
}

/// Count occurrences, ascending by value
pub fn count_frequencies(values: &[i64]) -> Vec<(i64, usize)> {
    let mut counts: FxHashMap<i64, usize> = FxHashMap::default();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut entries: Vec<(i64, usize)> = counts.into_iter().collect();
    entries.sort_unstable();
    entries
}

/// Top-K frequent values via a min-heap keyed on count
pub struct TopFrequent {
    scan: HeapScan,
    k: usize,
}

impl TopFrequent {
    pub fn new(values: &[i64], k: usize) -> Self {
        let counts = count_frequencies(values);
        let summary: Vec<String> = counts
            .iter()
            .map(|(value, count)| format!("{}:{}", value, count))
            .collect();
        let candidates = counts
            .iter()
            .map(|&(value, count)| Ranked {
                key: count as i64,
                candidate: Candidate::Frequent { value, count },
            })
            .collect();
        TopFrequent {
            scan: HeapScan::new(
                candidates,
                HeapOrder::Min,
                k,
                format!("Frequency map: {{{}}}", summary.join(", ")),
            ),
            k,
        }
    }
}

impl Iterator for TopFrequent {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        let k = self.k;
        self.scan.advance(|heap, _| {
            let top: Vec<(i64, usize)> = descending(heap)
                .into_iter()
                .filter_map(|item| match item.candidate {
                    Candidate::Frequent { value, count } => Some((value, count)),
                    _ => None,
                })
                .collect();
            let values: Vec<String> = top.iter().map(|(value, _)| value.to_string()).collect();
            (
                format!("Top {} frequent elements: [{}]", k, values.join(", ")),
                Outcome::TopFrequent(top),
            )
        })
    }
}

/// K closest points to the origin via a max-heap keyed on squared distance
pub struct Closest {
    scan: HeapScan,
    k: usize,
}

impl Closest {
    pub fn new(points: &[Point], k: usize) -> Self {
        let candidates = points
            .iter()
            .map(|&point| Ranked {
                key: point.distance_sq(),
                candidate: Candidate::Point(point),
            })
            .collect();
        Closest {
            scan: HeapScan::new(
                candidates,
                HeapOrder::Max,
                k,
                format!("Finding {} closest points using a max-heap by distance", k),
            ),
            k,
        }
    }
}

impl Iterator for Closest {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        let k = self.k;
        self.scan.advance(|heap, _| {
            let mut items = heap.items();
            items.sort();
            let points: Vec<Point> = items
                .into_iter()
                .filter_map(|item| match item.candidate {
                    Candidate::Point(point) => Some(point),
                    _ => None,
                })
                .collect();
            let shown: Vec<String> = points.iter().map(Point::to_string).collect();
            (
                format!("{} closest points: {}", k, shown.join(" ")),
                Outcome::Closest(points),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_frequencies_sorted_by_value() {
        let counts = count_frequencies(&[3, 1, 1, 2, 1, 3]);
        assert_eq!(counts, vec![(1, 3), (2, 1), (3, 2)]);
    }
}
