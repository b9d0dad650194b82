//! Binary tree arena
//!
//! Nodes are addressed by [`NodeId`], an index into the arena. Trees are built
//! from level-order listings where `None` marks a missing child, the same
//! layout used by most textbook problem statements.

use super::errors::InputError;
use std::collections::VecDeque;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BinaryTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl BinaryTree {
    /// Default demo tree: a complete tree over fifteen values
    pub fn sample() -> Self {
        Self::complete(&[10, 5, 15, 3, 7, 12, 20, 1, 4, 6, 8, 11, 13, 18, 25])
    }

    /// Complete tree where `values[i]` has children `2i + 1` and `2i + 2`
    pub fn complete(values: &[i64]) -> Self {
        let nodes = values
            .iter()
            .enumerate()
            .map(|(i, &value)| TreeNode {
                value,
                left: (2 * i + 1 < values.len()).then_some(2 * i + 1),
                right: (2 * i + 2 < values.len()).then_some(2 * i + 2),
            })
            .collect();

        BinaryTree {
            nodes,
            root: (!values.is_empty()).then_some(0),
        }
    }

    /// Level-order listing with gaps: children are assigned to the present
    /// nodes in queue order, and a `None` consumes a child slot.
    pub fn from_level_order(values: &[Option<i64>]) -> Result<Self, InputError> {
        let mut tree = BinaryTree::default();

        let mut entries = values.iter().copied();
        let root_value = match entries.next() {
            None => return Ok(tree),
            Some(None) => {
                return if values.iter().all(Option::is_none) {
                    Ok(tree)
                } else {
                    Err(InputError::OrphanedTreeValues)
                };
            }
            Some(Some(value)) => value,
        };

        let root = tree.push(root_value);
        tree.root = Some(root);

        let mut queue = VecDeque::from([root]);
        while let Some(parent) = queue.pop_front() {
            match entries.next() {
                None => break,
                Some(Some(value)) => {
                    let child = tree.push(value);
                    tree.nodes[parent].left = Some(child);
                    queue.push_back(child);
                }
                Some(None) => {}
            }
            match entries.next() {
                None => break,
                Some(Some(value)) => {
                    let child = tree.push(value);
                    tree.nodes[parent].right = Some(child);
                    queue.push_back(child);
                }
                Some(None) => {}
            }
        }

        if entries.any(|entry| entry.is_some()) {
            return Err(InputError::OrphanedTreeValues);
        }

        Ok(tree)
    }

    fn push(&mut self, value: i64) -> NodeId {
        self.nodes.push(TreeNode {
            value,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn value(&self, id: NodeId) -> Option<i64> {
        self.nodes.get(id).map(|node| node.value)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.left.is_none() && node.right.is_none())
    }

    /// Node ids grouped by depth, left to right
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = Vec::new();
        let mut current: Vec<NodeId> = self.root.into_iter().collect();

        while !current.is_empty() {
            let next = current
                .iter()
                .filter_map(|&id| self.nodes.get(id))
                .flat_map(|node| node.left.into_iter().chain(node.right))
                .collect();
            levels.push(current);
            current = next;
        }

        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_tree_layout() {
        let tree = BinaryTree::complete(&[1, 2, 3, 4]);
        let root = tree.node(0).unwrap();
        assert_eq!(root.left, Some(1));
        assert_eq!(root.right, Some(2));
        assert_eq!(tree.node(1).unwrap().left, Some(3));
        assert_eq!(tree.node(1).unwrap().right, None);
        assert_eq!(tree.levels(), vec![vec![0], vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_level_order_with_gaps() {
        let tree =
            BinaryTree::from_level_order(&[Some(1), None, Some(2), Some(3)]).unwrap();
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.left, None);
        let right = tree.node(root.right.unwrap()).unwrap();
        assert_eq!(right.value, 2);
        assert_eq!(tree.value(right.left.unwrap()), Some(3));
    }

    #[test]
    fn test_level_order_rejects_orphans() {
        assert_eq!(
            BinaryTree::from_level_order(&[None, Some(1)]),
            Err(InputError::OrphanedTreeValues)
        );
        assert_eq!(
            BinaryTree::from_level_order(&[Some(1), None, None, Some(4)]),
            Err(InputError::OrphanedTreeValues)
        );
    }

    #[test]
    fn test_empty_tree() {
        assert!(BinaryTree::from_level_order(&[]).unwrap().is_empty());
        assert!(BinaryTree::complete(&[]).is_empty());
    }
}
