//! Subsets, permutations and combinations
//!
//! All three share one explicit-stack backtracker. Each stack entry owns its
//! own copy of the chosen indices, so taking a choice back is just dropping
//! the entry.

use super::{Outcome, Transition, TransitionKind};
use crate::snapshot::{ChoiceFrame, Counters, Frame};

/// `2^n`, saturating
pub fn subset_count(n: usize) -> u128 {
    u32::try_from(n)
        .ok()
        .and_then(|n| 1u128.checked_shl(n))
        .unwrap_or(u128::MAX)
}

/// `n!`, saturating
pub fn permutation_count(n: usize) -> u128 {
    (1..=n as u128).fold(1u128, |acc, i| acc.saturating_mul(i))
}

/// `C(n, k)`, zero when `k > n`
pub fn combination_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    // Each partial product is itself a binomial coefficient, so the division
    // is exact
    (0..k).fold(1u128, |acc, i| acc.saturating_mul(n - i) / (i + 1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Subsets,
    Permutations,
    Combinations(usize),
}

#[derive(Debug, Clone)]
struct Branch {
    /// Indices chosen on the way to this branch
    chosen: Vec<usize>,
    /// Next candidate index to try
    next: usize,
    entered: bool,
}

/// Explicit-stack enumeration of subsets, permutations or combinations
pub struct Enumeration {
    values: Vec<i64>,
    kind: Kind,
    stack: Vec<Branch>,
    frame: ChoiceFrame,
    counters: Counters,
    done: bool,
}

impl Enumeration {
    pub fn subsets(values: &[i64]) -> Self {
        Self::new(values, Kind::Subsets)
    }

    pub fn permutations(values: &[i64]) -> Self {
        Self::new(values, Kind::Permutations)
    }

    pub fn combinations(values: &[i64], k: usize) -> Self {
        Self::new(values, Kind::Combinations(k))
    }

    fn new(values: &[i64], kind: Kind) -> Self {
        Enumeration {
            values: values.to_vec(),
            kind,
            stack: vec![Branch {
                chosen: Vec::new(),
                next: 0,
                entered: false,
            }],
            frame: ChoiceFrame::default(),
            counters: Counters::default(),
            done: false,
        }
    }

    fn produces_result(&self, chosen: &[usize]) -> bool {
        match self.kind {
            Kind::Subsets => true,
            Kind::Permutations => chosen.len() == self.values.len(),
            Kind::Combinations(k) => chosen.len() == k,
        }
    }

    /// Next index this branch may add, at or after `branch.next`
    fn candidate(&self, branch: &Branch) -> Option<usize> {
        let n = self.values.len();
        match self.kind {
            Kind::Subsets => (branch.next < n).then_some(branch.next),
            Kind::Combinations(k) => {
                if branch.chosen.len() >= k {
                    None
                } else {
                    (branch.next < n).then_some(branch.next)
                }
            }
            Kind::Permutations => {
                (branch.next..n).find(|index| !branch.chosen.contains(index))
            }
        }
    }

    /// Where a child branch starts looking for its own candidates
    fn child_start(&self, index: usize) -> usize {
        match self.kind {
            Kind::Permutations => 0,
            _ => index + 1,
        }
    }

    fn pick(&self, chosen: &[usize]) -> Vec<i64> {
        chosen.iter().filter_map(|&i| self.values.get(i).copied()).collect()
    }

    fn emit(&mut self, kind: TransitionKind, narration: String) -> Transition {
        self.counters.steps += 1;
        Transition::new(kind, narration, Frame::Choices(self.frame.clone()), self.counters)
    }

    fn conclude(&mut self) -> Transition {
        self.done = true;
        self.counters.steps += 1;
        self.frame.path.clear();
        let results = self.frame.results.clone();
        let noun = match self.kind {
            Kind::Subsets => "subsets",
            Kind::Permutations => "permutations",
            Kind::Combinations(_) => "combinations",
        };
        Transition::conclude(
            format!("Generated all {} {}", results.len(), noun),
            Frame::Choices(self.frame.clone()),
            self.counters,
            Outcome::Enumerated(results),
        )
    }
}

impl Iterator for Enumeration {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.done {
            return None;
        }

        let Some(top) = self.stack.last() else {
            return Some(self.conclude());
        };
        let chosen = top.chosen.clone();

        if !top.entered {
            if let Some(top) = self.stack.last_mut() {
                top.entered = true;
            }
            if self.produces_result(&chosen) {
                let result = self.pick(&chosen);
                self.frame.path = result.clone();
                self.frame.results.push(result.clone());
                return Some(self.emit(
                    TransitionKind::Emit,
                    format!("Found result: {}", Outcome::Traversal(result)),
                ));
            }
        }

        let candidate = self.stack.last().and_then(|top| self.candidate(top));
        match candidate {
            Some(index) => {
                if let Some(top) = self.stack.last_mut() {
                    top.next = index + 1;
                }
                let mut next_chosen = chosen;
                next_chosen.push(index);
                let start = self.child_start(index);
                self.stack.push(Branch {
                    next: start,
                    chosen: next_chosen.clone(),
                    entered: false,
                });
                self.counters.attempts += 1;
                let value = self.values.get(index).copied().unwrap_or_default();
                self.frame.path = self.pick(&next_chosen);
                Some(self.emit(TransitionKind::Choose, format!("Trying to add {}", value)))
            }
            None => {
                self.stack.pop();
                let Some(&last) = chosen.last() else {
                    return Some(self.conclude());
                };
                self.counters.backtracks += 1;
                let value = self.values.get(last).copied().unwrap_or_default();
                self.frame.path = self.pick(&chosen[..chosen.len() - 1]);
                Some(self.emit(TransitionKind::Undo, format!("Backtracking: removing {}", value)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        assert_eq!(subset_count(0), 1);
        assert_eq!(subset_count(3), 8);
        assert_eq!(permutation_count(0), 1);
        assert_eq!(permutation_count(4), 24);
        assert_eq!(combination_count(5, 2), 10);
        assert_eq!(combination_count(4, 4), 1);
        assert_eq!(combination_count(2, 3), 0);
    }
}
