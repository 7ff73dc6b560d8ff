//! Renderer-agnostic chart description.
//!
//! A [`Scene`] carries everything a plotting front end needs to draw the
//! search tree: one rounded box per node with its label and hover text,
//! parent-to-child edges, legend entries and axis ranges. It holds no
//! renderer types and serializes to plain JSON.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mtv_trace::{Node, NodeId, SearchTree, BREAK};

use crate::layout::{Layout, Point};

/// Styling of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub box_width: f64,
    pub box_height: f64,
    pub corner_radius: f64,
    /// Fill of highlighted (agent choice) nodes.
    pub highlight_color: String,
    /// Fill of every other node.
    pub candidate_color: String,
    pub title: String,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            box_width: 18.0,
            box_height: 4.0,
            corner_radius: 1.0,
            highlight_color: "pink".to_string(),
            candidate_color: "#FFD700".to_string(),
            title: "Agent Thinking Process".to_string(),
            x_range: [-10.0, 80.0],
            y_range: [0.0, 40.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub hover: String,
    pub fill: String,
    /// SVG path of the rounded box around the node.
    pub outline: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub title: String,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    pub legend: Vec<LegendEntry>,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
}

/// Assemble the chart for a laid-out tree.
///
/// Nodes and edges are listed in pre-order from the root. Nodes missing from
/// `layout` are skipped together with their edges.
pub fn build_scene(
    tree: &SearchTree,
    layout: &Layout,
    highlights: &BTreeSet<NodeId>,
    config: &SceneConfig,
) -> Scene {
    let mut scene = Scene {
        title: config.title.clone(),
        nodes: Vec::with_capacity(tree.node_count()),
        edges: Vec::new(),
        legend: vec![
            LegendEntry {
                name: "Agent Choice".to_string(),
                color: config.highlight_color.clone(),
            },
            LegendEntry {
                name: "Candidate".to_string(),
                color: config.candidate_color.clone(),
            },
        ],
        x_range: config.x_range,
        y_range: config.y_range,
    };

    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let Some(at) = layout.position(id) else {
            continue;
        };
        let node = &tree[id];
        let highlighted = highlights.contains(&id);

        scene.nodes.push(SceneNode {
            id,
            x: at.x,
            y: at.y,
            label: node.summary.clone(),
            hover: hover_text(node),
            fill: if highlighted {
                config.highlight_color.clone()
            } else {
                config.candidate_color.clone()
            },
            outline: rounded_box(at, config),
            highlighted,
        });

        for &child in &node.children {
            if let Some(to) = layout.position(child) {
                scene.edges.push(SceneEdge {
                    from: id,
                    to: child,
                    x0: at.x,
                    y0: at.y,
                    x1: to.x,
                    y1: to.y,
                });
            }
        }
        stack.extend(node.children.iter().rev());
    }

    scene
}

/// Hover text: id, reward, Q, action, state and status.
pub fn hover_text(node: &Node) -> String {
    let block = |text: &Option<String>| match text {
        Some(text) => format!("{BREAK}{text}"),
        None => "null".to_string(),
    };

    [
        format!("<b>State {}</b>", node.id),
        format!("<b>Reward:</b> {:?}", node.reward),
        format!("<b>Q:</b> {:?}", node.q),
        format!("<b>In Action:</b> {}", block(&node.action)),
        format!("<b>State Info:</b> {}", block(&node.state_info)),
        format!("<b>Status:</b> {}", node.status),
    ]
    .join(BREAK)
}

fn rounded_box(at: Point, config: &SceneConfig) -> String {
    let r = config.corner_radius;
    let left = at.x - config.box_width / 2.0;
    let right = at.x + config.box_width / 2.0;
    let bottom = at.y - config.box_height / 2.0;
    let top = at.y + config.box_height / 2.0;

    // Counter-clockwise from the bottom edge: (line end, corner, curve end).
    let sides = [
        ((right - r, bottom), (right, bottom), (right, bottom + r)),
        ((right, top - r), (right, top), (right - r, top)),
        ((left + r, top), (left, top), (left, top - r)),
        ((left, bottom + r), (left, bottom), (left + r, bottom)),
    ];

    let mut path = format!("M{}", xy((left + r, bottom)));
    for (line_end, corner, curve_end) in sides {
        path.push_str(&format!(" L{} Q{} {}", xy(line_end), xy(corner), xy(curve_end)));
    }
    path.push_str(" Z");
    path
}

fn xy((x, y): (f64, f64)) -> String {
    format!("{x},{y}")
}
