use std::collections::BTreeSet;

use mtv_layout::highlight_best_per_depth;
use mtv_trace::{aggregate, Node, NodeId, NodeStatus, SearchTree};

#[test]
fn test_root_only() {
    let tree = SearchTree::new(Node::container(String::new()));
    assert_eq!(highlight_best_per_depth(&tree), BTreeSet::from([NodeId(0)]));
}

#[test]
fn test_best_per_level() {
    // Q values set directly: root -> a (0.2), b (0.8); a -> a1 (0.3); b -> b1 (0.1)
    let mut tree = SearchTree::new(Node::container(String::new()));
    let a = tree.push_child(tree.root(), Node::candidate("a".into(), 0.0));
    let b = tree.push_child(tree.root(), Node::candidate("b".into(), 0.0));
    let a1 = tree.push_child(a, Node::candidate("a1".into(), 0.0));
    let b1 = tree.push_child(b, Node::candidate("b1".into(), 0.0));
    for (id, q) in [(a, 0.2), (b, 0.8), (a1, 0.3), (b1, 0.1)] {
        tree[id].q = q;
    }

    assert_eq!(highlight_best_per_depth(&tree), BTreeSet::from([tree.root(), b, a1]));
}

#[test]
fn test_tie_goes_to_first_in_level_order() {
    let mut tree = SearchTree::new(Node::container(String::new()));
    let first = tree.push_child(tree.root(), Node::candidate("x".into(), 0.5));
    tree.push_child(tree.root(), Node::candidate("y".into(), 0.5));
    aggregate(&mut tree);

    let highlights = highlight_best_per_depth(&tree);
    assert!(highlights.contains(&first));
    assert_eq!(highlights.len(), 2);
}

#[test]
fn test_resolved_subtree_value_wins_over_higher_local_reward() {
    // a has the larger fast reward, but b's resolved child lifts b's Q.
    let mut tree = SearchTree::new(Node::container(String::new()));
    let a = tree.push_child(tree.root(), Node::candidate("a".into(), 0.6));
    let mut b_node = Node::candidate("b".into(), 0.4);
    b_node.status = NodeStatus::Resolved("ok".into());
    let b = tree.push_child(tree.root(), b_node);
    let mut b1 = Node::candidate("b1".into(), 0.5);
    b1.status = NodeStatus::Resolved("ok".into());
    tree.push_child(b, b1);
    aggregate(&mut tree);

    let highlights = highlight_best_per_depth(&tree);
    assert!(highlights.contains(&b));
    assert!(!highlights.contains(&a));
}

#[test]
fn test_unchosen_candidate_never_beats_chosen_branch() {
    let mut tree = SearchTree::new(Node::container(String::new()));
    let high = tree.push_child(tree.root(), Node::candidate("high".into(), 0.9));
    let mut low = Node::candidate("low".into(), 0.4);
    low.status = NodeStatus::Resolved("ok".into());
    let low = tree.push_child(tree.root(), low);
    aggregate(&mut tree);

    let highlights = highlight_best_per_depth(&tree);
    assert!(highlights.contains(&low));
    assert!(!highlights.contains(&high));
}
