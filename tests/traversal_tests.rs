// Binary tree traversals and path sum

use algotrace::algorithms::traversal::{PathSum, Traversal};
use algotrace::algorithms::{Outcome, TransitionKind, TraversalOrder};
use algotrace::snapshot::Frame;
use algotrace::structures::parse::parse_tree;
use algotrace::structures::tree::BinaryTree;

fn traverse(tree: &BinaryTree, order: TraversalOrder) -> Vec<i64> {
    match Traversal::new(tree.clone(), order).last().and_then(|t| t.outcome) {
        Some(Outcome::Traversal(values)) => values,
        other => panic!("expected a traversal, got {:?}", other),
    }
}

fn paths(tree: &BinaryTree, target: i64) -> Vec<Vec<i64>> {
    match PathSum::new(tree.clone(), target).last().and_then(|t| t.outcome) {
        Some(Outcome::Paths(paths)) => paths,
        other => panic!("expected paths, got {:?}", other),
    }
}

#[test]
fn test_depth_first_orders() {
    let tree = BinaryTree::sample();
    assert_eq!(
        traverse(&tree, TraversalOrder::Preorder),
        vec![10, 5, 3, 1, 4, 7, 6, 8, 15, 12, 11, 13, 20, 18, 25]
    );
    assert_eq!(
        traverse(&tree, TraversalOrder::Inorder),
        vec![1, 3, 4, 5, 6, 7, 8, 10, 11, 12, 13, 15, 18, 20, 25]
    );
    assert_eq!(
        traverse(&tree, TraversalOrder::Postorder),
        vec![1, 4, 3, 6, 8, 7, 5, 11, 13, 12, 18, 25, 20, 15, 10]
    );
}

#[test]
fn test_level_and_zigzag_orders() {
    let tree = BinaryTree::sample();
    assert_eq!(
        traverse(&tree, TraversalOrder::LevelOrder),
        vec![10, 5, 15, 3, 7, 12, 20, 1, 4, 6, 8, 11, 13, 18, 25]
    );
    assert_eq!(
        traverse(&tree, TraversalOrder::Zigzag),
        vec![10, 15, 5, 3, 7, 12, 20, 25, 18, 13, 11, 8, 6, 4, 1]
    );
}

#[test]
fn test_zigzag_emits_once_per_level() {
    let emits = Traversal::new(BinaryTree::sample(), TraversalOrder::Zigzag)
        .filter(|t| t.kind == TransitionKind::Emit)
        .count();
    assert_eq!(emits, 4);
}

#[test]
fn test_sparse_tree() {
    let listing = parse_tree("1, null, 2, 3").expect("valid listing");
    let tree = BinaryTree::from_level_order(&listing).expect("valid tree");
    assert_eq!(traverse(&tree, TraversalOrder::Inorder), vec![1, 3, 2]);
    assert_eq!(traverse(&tree, TraversalOrder::Preorder), vec![1, 2, 3]);
}

#[test]
fn test_empty_tree() {
    let tree = BinaryTree::default();
    for order in [
        TraversalOrder::Preorder,
        TraversalOrder::Inorder,
        TraversalOrder::Postorder,
        TraversalOrder::LevelOrder,
        TraversalOrder::Zigzag,
    ] {
        let transitions: Vec<_> = Traversal::new(tree.clone(), order).collect();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].outcome, Some(Outcome::Traversal(Vec::new())));
    }
}

#[test]
fn test_every_node_visited_once() {
    let tree = BinaryTree::sample();
    let last = Traversal::new(tree.clone(), TraversalOrder::Postorder)
        .last()
        .expect("run should conclude");
    let Frame::Tree(frame) = last.frame else {
        panic!("expected a tree frame");
    };
    let mut visited = frame.visited.clone();
    visited.sort_unstable();
    visited.dedup();
    assert_eq!(visited.len(), tree.len());
    assert_eq!(frame.visited.len(), tree.len());
}

#[test]
fn test_path_sum() {
    let tree = BinaryTree::sample();
    assert_eq!(paths(&tree, 22), vec![vec![10, 5, 3, 4]]);
    assert_eq!(paths(&tree, 70), vec![vec![10, 15, 20, 25]]);
    assert!(paths(&tree, 23).is_empty());
}

#[test]
fn test_path_sum_several_paths() {
    let listing =
        parse_tree("5, 4, 8, 11, null, 13, 4, 7, 2, null, null, 5, 1").expect("valid listing");
    let tree = BinaryTree::from_level_order(&listing).expect("valid tree");
    assert_eq!(
        paths(&tree, 22),
        vec![vec![5, 4, 11, 2], vec![5, 8, 4, 5]]
    );
}

#[test]
fn test_path_sum_with_extreme_values() {
    let tree = BinaryTree::from_level_order(&[Some(i64::MAX), Some(1), Some(-5)])
        .expect("valid tree");
    assert!(paths(&tree, i64::MIN).is_empty());
    assert_eq!(paths(&tree, i64::MAX - 5), vec![vec![i64::MAX, -5]]);

    let tree = BinaryTree::from_level_order(&[Some(i64::MIN), Some(-1)]).expect("valid tree");
    assert!(paths(&tree, i64::MAX).is_empty());
}
