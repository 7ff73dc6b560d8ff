//! Bottom-up Q-value rollup.

use crate::tree::{NodeId, SearchTree};

/// Recompute `q` for every node and return the root's value.
///
/// `Q(n) = reward(n) + sum of Q(c)` over children `c` whose status is
/// resolved. Only the chosen path is scored: pending (`Init`) and unchosen
/// (`null`) children are not descended into, and their whole subtree is
/// reset to `q = 0.0`. Not incremental: run again after any change to a
/// reward or status.
pub fn aggregate(tree: &mut SearchTree) -> f64 {
    let root = tree.root();
    let q = rollup(tree, root);
    tracing::debug!(root_q = q, nodes = tree.node_count(), "Aggregated Q values");
    q
}

fn rollup(tree: &mut SearchTree, id: NodeId) -> f64 {
    let children = tree[id].children.clone();
    let mut total = tree[id].reward;

    for child in children {
        if tree[child].status.is_resolved() {
            total += rollup(tree, child);
        } else {
            clear(tree, child);
        }
    }

    tree[id].q = total;
    total
}

fn clear(tree: &mut SearchTree, id: NodeId) {
    let mut stack = vec![id];
    while let Some(id) = stack.pop() {
        let node = &mut tree[id];
        node.q = 0.0;
        stack.extend(node.children.iter().copied());
    }
}
