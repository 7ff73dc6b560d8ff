use std::collections::BTreeSet;

use mtv_trace::{NodeId, SearchTree};

/// The highest-Q node at every depth.
///
/// Ties go to the node met first in level order. Run
/// [`mtv_trace::aggregate`] first; stale Q values give a stale answer.
pub fn highlight_best_per_depth(tree: &SearchTree) -> BTreeSet<NodeId> {
    tree.depth_groups()
        .iter()
        .filter_map(|level| best_of(tree, level))
        .collect()
}

fn best_of(tree: &SearchTree, level: &[NodeId]) -> Option<NodeId> {
    let mut best: Option<NodeId> = None;
    for &id in level {
        match best {
            None => best = Some(id),
            Some(current) => {
                if tree[id].q > tree[current].q {
                    best = Some(id);
                }
            }
        }
    }
    best
}
