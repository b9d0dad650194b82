//! Binary tree traversals and root-to-leaf path sum
//!
//! The depth-first orders share one explicit stack of `(node, ready)` pairs:
//! a node popped unready is expanded into its children and itself (now
//! ready) in the order the traversal needs, a node popped ready is visited.
//! Expansion is bookkeeping and produces no transition; every visit does.

use super::{Outcome, Transition, TransitionKind, TraversalOrder};
use crate::snapshot::{Counters, Frame, TreeFrame};
use crate::structures::tree::{BinaryTree, NodeId};
use std::collections::VecDeque;

pub struct Traversal {
    tree: BinaryTree,
    order: TraversalOrder,
    stack: Vec<(NodeId, bool)>,
    queue: VecDeque<(NodeId, usize)>,
    /// Zigzag values collected for the level being read
    level_values: Vec<i64>,
    level: usize,
    frame: TreeFrame,
    counters: Counters,
    started: bool,
    done: bool,
}

impl Traversal {
    pub fn new(tree: BinaryTree, order: TraversalOrder) -> Self {
        Traversal {
            tree,
            order,
            stack: Vec::new(),
            queue: VecDeque::new(),
            level_values: Vec::new(),
            level: 0,
            frame: TreeFrame::default(),
            counters: Counters::default(),
            started: false,
            done: false,
        }
    }

    fn emit(&mut self, kind: TransitionKind, narration: String) -> Transition {
        self.counters.steps += 1;
        Transition::new(kind, narration, Frame::Tree(self.frame.clone()), self.counters)
    }

    fn conclude(&mut self) -> Transition {
        self.done = true;
        self.counters.steps += 1;
        self.frame.current = None;
        let order = self.frame.order.clone();
        let narration = if order.is_empty() {
            format!("{} traversal of an empty tree: []", self.order)
        } else {
            format!("{} traversal complete: {}", self.order, Outcome::Traversal(order.clone()))
        };
        Transition::conclude(
            narration,
            Frame::Tree(self.frame.clone()),
            self.counters,
            Outcome::Traversal(order),
        )
    }

    /// Push an unready node's children and itself so it is visited in order
    fn expand(&mut self, id: NodeId) {
        let (left, right) = match self.tree.node(id) {
            Some(node) => (node.left, node.right),
            None => return,
        };
        match self.order {
            TraversalOrder::Preorder => {
                self.stack.extend(right.map(|r| (r, false)));
                self.stack.extend(left.map(|l| (l, false)));
                self.stack.push((id, true));
            }
            TraversalOrder::Inorder => {
                self.stack.extend(right.map(|r| (r, false)));
                self.stack.push((id, true));
                self.stack.extend(left.map(|l| (l, false)));
            }
            _ => {
                self.stack.push((id, true));
                self.stack.extend(right.map(|r| (r, false)));
                self.stack.extend(left.map(|l| (l, false)));
            }
        }
    }

    fn visit(&mut self, id: NodeId, level: Option<usize>) -> Option<i64> {
        let value = self.tree.value(id)?;
        self.frame.current = Some(id);
        self.frame.visited.push(id);
        self.frame.level = level;
        self.counters.operations += 1;
        Some(value)
    }

    fn enqueue_children(&mut self, id: NodeId, level: usize) {
        if let Some(node) = self.tree.node(id) {
            let (left, right) = (node.left, node.right);
            self.queue.extend(left.map(|l| (l, level + 1)));
            self.queue.extend(right.map(|r| (r, level + 1)));
        }
    }

    fn next_depth_first(&mut self) -> Option<Transition> {
        while let Some((id, ready)) = self.stack.pop() {
            if !ready {
                self.expand(id);
                continue;
            }
            let Some(value) = self.visit(id, None) else {
                continue;
            };
            self.frame.order.push(value);
            return Some(self.emit(TransitionKind::Advance, format!("Visiting node {}", value)));
        }
        Some(self.conclude())
    }

    fn next_level_order(&mut self) -> Option<Transition> {
        while let Some((id, level)) = self.queue.pop_front() {
            self.enqueue_children(id, level);
            let Some(value) = self.visit(id, Some(level)) else {
                continue;
            };
            self.frame.order.push(value);
            return Some(self.emit(
                TransitionKind::Advance,
                format!("Level {}: visiting node {}", level, value),
            ));
        }
        Some(self.conclude())
    }

    fn next_zigzag(&mut self) -> Option<Transition> {
        let level_ended = match self.queue.front() {
            Some(&(_, level)) => level != self.level,
            None => true,
        };

        if level_ended && !self.level_values.is_empty() {
            let mut values = std::mem::take(&mut self.level_values);
            let reversed = self.level % 2 == 1;
            if reversed {
                values.reverse();
            }
            self.frame.order.extend(&values);
            let direction = if reversed { "right to left" } else { "left to right" };
            let narration = format!(
                "Level {} read {}: {}",
                self.level,
                direction,
                Outcome::Traversal(values)
            );
            return Some(self.emit(TransitionKind::Emit, narration));
        }

        while let Some((id, level)) = self.queue.pop_front() {
            self.level = level;
            self.enqueue_children(id, level);
            let Some(value) = self.visit(id, Some(level)) else {
                continue;
            };
            self.level_values.push(value);
            return Some(self.emit(
                TransitionKind::Advance,
                format!("Level {}: collecting node {}", level, value),
            ));
        }
        Some(self.conclude())
    }
}

impl Iterator for Traversal {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            let Some(root) = self.tree.root() else {
                return Some(self.conclude());
            };
            match self.order {
                TraversalOrder::LevelOrder | TraversalOrder::Zigzag => {
                    self.queue.push_back((root, 0))
                }
                _ => self.stack.push((root, false)),
            }
            return Some(self.emit(
                TransitionKind::Setup,
                format!("Starting {} traversal", self.order.to_string().to_lowercase()),
            ));
        }

        match self.order {
            TraversalOrder::LevelOrder => self.next_level_order(),
            TraversalOrder::Zigzag => self.next_zigzag(),
            _ => self.next_depth_first(),
        }
    }
}

/// Root-to-leaf paths whose values add up to a target
pub struct PathSum {
    tree: BinaryTree,
    target: i64,
    /// Pending nodes with the path that reaches them (root first) and the
    /// path's sum, widened to `i128`
    stack: Vec<(NodeId, Vec<NodeId>, i128)>,
    frame: TreeFrame,
    counters: Counters,
    started: bool,
    done: bool,
}

impl PathSum {
    pub fn new(tree: BinaryTree, target: i64) -> Self {
        PathSum {
            tree,
            target,
            stack: Vec::new(),
            frame: TreeFrame::default(),
            counters: Counters::default(),
            started: false,
            done: false,
        }
    }

    fn values(&self, path: &[NodeId]) -> Vec<i64> {
        path.iter().filter_map(|&id| self.tree.value(id)).collect()
    }

    fn emit(&mut self, kind: TransitionKind, narration: String) -> Transition {
        self.counters.steps += 1;
        Transition::new(kind, narration, Frame::Tree(self.frame.clone()), self.counters)
    }

    fn conclude(&mut self) -> Transition {
        self.done = true;
        self.counters.steps += 1;
        self.frame.current = None;
        self.frame.path.clear();
        let paths = self.frame.paths.clone();
        let narration = format!("Search complete: {} path(s) sum to {}", paths.len(), self.target);
        Transition::conclude(
            narration,
            Frame::Tree(self.frame.clone()),
            self.counters,
            Outcome::Paths(paths),
        )
    }
}

impl Iterator for PathSum {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            let Some(root) = self.tree.root() else {
                return Some(self.conclude());
            };
            let value = self.tree.value(root).unwrap_or_default();
            self.stack.push((root, vec![root], i128::from(value)));
            return Some(self.emit(
                TransitionKind::Setup,
                format!("Searching root-to-leaf paths summing to {}", self.target),
            ));
        }

        let Some((id, path, sum)) = self.stack.pop() else {
            return Some(self.conclude());
        };

        let (left, right) = match self.tree.node(id) {
            Some(node) => (node.left, node.right),
            None => (None, None),
        };
        for child in [right, left].into_iter().flatten() {
            let mut child_path = path.clone();
            child_path.push(child);
            let child_sum = sum + i128::from(self.tree.value(child).unwrap_or_default());
            self.stack.push((child, child_path, child_sum));
        }

        let values = self.values(&path);
        self.frame.current = Some(id);
        self.frame.visited.push(id);
        self.frame.path = path;
        self.counters.operations += 1;

        if self.tree.is_leaf(id) && sum == i128::from(self.target) {
            self.frame.paths.push(values.clone());
            return Some(self.emit(
                TransitionKind::Emit,
                format!("Found path {} with sum {}", Outcome::Traversal(values), sum),
            ));
        }

        let narration = if self.tree.is_leaf(id) {
            format!("Leaf reached: {} sums to {}", Outcome::Traversal(values), sum)
        } else {
            format!("Path {} so far sums to {}", Outcome::Traversal(values), sum)
        };
        Some(self.emit(TransitionKind::Advance, narration))
    }
}
