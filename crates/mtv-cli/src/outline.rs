//! Plain-text outline of a search tree for terminals.

use std::collections::BTreeSet;
use std::fmt::Write;

use mtv_trace::{NodeId, SearchTree, BREAK};

/// One line per node in pre-order, indented two spaces per depth level.
///
/// Highlighted nodes are marked with `*`:
///
/// ```text
/// * #0 [Init] Start Planning  R=0.0 Q=0.9
///     #1 [null] Browse menu  R=0.4 Q=0.0
///   * #2 [Product found] Use search  R=0.9 Q=0.9
/// ```
pub fn render_outline(tree: &SearchTree, highlights: &BTreeSet<NodeId>) -> String {
    let mut out = String::new();
    let mut stack = vec![(tree.root(), 0usize)];

    while let Some((id, depth)) = stack.pop() {
        let node = &tree[id];
        let mark = if highlights.contains(&id) { '*' } else { ' ' };
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{}{mark} #{id} [{}] {}  R={:?} Q={:?}",
            "  ".repeat(depth),
            flatten(&node.status.to_string()),
            flatten(&node.summary),
            node.reward,
            node.q,
        );
        stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }

    out
}

fn flatten(text: &str) -> String {
    text.replace(BREAK, " ").replace('\n', " ")
}
