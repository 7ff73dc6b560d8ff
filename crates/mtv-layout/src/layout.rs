//! Recursive left-to-right hierarchical placement.
//!
//! Depth maps to `x`; siblings are stacked along `y` in insertion order,
//! each centered in its own slice of the parent's vertical span:
//!
//! 1. The root sits at `(origin_x, center_y)` with span `root_span`
//! 2. A node with `k` children gives each child the span `span / k`,
//!    floored at `min_span`
//! 3. Children sit one `horizontal_gap` to the right of their parent, the
//!    block of child slices centered on the parent's `y`
//!
//! The floor keeps dense subtrees from collapsing onto one row; the block
//! then extends past the parent's span but stays centered on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mtv_trace::{NodeId, SearchTree};

/// Geometry of the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical span allocated to the root.
    pub root_span: f64,
    /// Horizontal distance between a parent and its children.
    pub horizontal_gap: f64,
    /// `x` of the root.
    pub origin_x: f64,
    /// `y` of the root.
    pub center_y: f64,
    /// Smallest vertical span a child may receive.
    pub min_span: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_span: 110.0,
            horizontal_gap: 20.0,
            origin_x: 0.0,
            center_y: 20.0,
            min_span: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Node positions keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    pub positions: BTreeMap<NodeId, Point>,
}

impl Layout {
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Position every node reachable from the root.
pub fn compute_layout(tree: &SearchTree, config: &LayoutConfig) -> Layout {
    let mut layout = Layout::default();
    let origin = Point {
        x: config.origin_x,
        y: config.center_y,
    };
    place(tree, tree.root(), origin, config.root_span, config, &mut layout);

    tracing::debug!(nodes = layout.len(), "Computed tree layout");
    layout
}

fn place(
    tree: &SearchTree,
    id: NodeId,
    at: Point,
    span: f64,
    config: &LayoutConfig,
    layout: &mut Layout,
) {
    layout.positions.insert(id, at);

    let children = tree.children(id);
    if children.is_empty() {
        return;
    }

    let count = children.len() as f64;
    let dy = (span / count).max(config.min_span);
    let x = at.x + config.horizontal_gap;
    let mut y = at.y - count * dy / 2.0 - dy / 2.0;

    for &child in children {
        y += dy;
        place(tree, child, Point { x, y }, dy, config, layout);
    }
}
