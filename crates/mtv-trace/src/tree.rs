//! Id-addressed node arena for the reconstructed search tree.

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Label shown on nodes that never received a summary.
pub const DEFAULT_SUMMARY: &str = "Start Planning";

// ---------------------------------------------------------------------------
// Identifiers and status
// ---------------------------------------------------------------------------

/// Identity of a node within one [`SearchTree`].
///
/// Ids are handed out in creation order starting at 0 and double as the
/// node's display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Evaluation status of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum NodeStatus {
    /// Just created, not yet evaluated.
    Init,
    /// Candidate that was scored but not (yet) chosen.
    Null,
    /// Outcome text reported by the trace for a chosen branch.
    Resolved(String),
}

impl NodeStatus {
    /// Whether this node's value rolls up into its parent's Q.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init => write!(f, "Init"),
            Self::Null => write!(f, "null"),
            Self::Resolved(text) => write!(f, "{text}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One point in the search tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Strategy text that led here from the parent. `None` for containers.
    pub action: Option<String>,
    /// Reflowed state description. `None` until a candidate is expanded.
    pub state_info: Option<String>,
    pub status: NodeStatus,
    pub reward: f64,
    /// Aggregated value. Stale until [`crate::aggregate`] runs.
    pub q: f64,
    pub summary: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    /// A container node for an accepted state.
    pub fn container(state_info: String) -> Self {
        Self {
            id: NodeId(0),
            action: None,
            state_info: Some(state_info),
            status: NodeStatus::Init,
            reward: 0.0,
            q: 0.0,
            summary: DEFAULT_SUMMARY.to_string(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// A scored candidate that has not been expanded.
    pub fn candidate(action: String, reward: f64) -> Self {
        Self {
            id: NodeId(0),
            action: Some(action),
            state_info: None,
            status: NodeStatus::Null,
            reward,
            q: 0.0,
            summary: DEFAULT_SUMMARY.to_string(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

// ---------------------------------------------------------------------------
// SearchTree
// ---------------------------------------------------------------------------

/// The node table. Sole owner of every node; parent and child links are ids.
///
/// A tree always holds its root, so every traversal has a starting point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Start a tree from its root node. The root always receives id 0.
    pub fn new(mut root: Node) -> Self {
        root.id = NodeId(0);
        root.parent = None;
        root.children.clear();
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The id the next inserted node will receive.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len())
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Insert `node` as the last child of `parent` and return its new id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = self.next_id();
        node.id = id;
        node.parent = Some(parent);
        node.children.clear();
        self[parent].children.push(id);
        self.nodes.push(node);
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Nodes in id (creation) order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Ids of every node whose action text equals `action`, in id order.
    pub fn find_by_action(&self, action: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.action.as_deref() == Some(action))
            .map(|n| n.id)
            .collect()
    }

    /// Level-order grouping of the nodes reachable from the root.
    ///
    /// `groups[d]` holds the nodes at depth `d` in left-to-right order.
    pub fn depth_groups(&self) -> Vec<Vec<NodeId>> {
        let mut groups: Vec<Vec<NodeId>> = Vec::new();
        let mut queue = VecDeque::from([(self.root(), 0usize)]);

        while let Some((id, depth)) = queue.pop_front() {
            if groups.len() <= depth {
                groups.push(Vec::new());
            }
            groups[depth].push(id);
            for &child in self.children(id) {
                queue.push_back((child, depth + 1));
            }
        }

        groups
    }
}

impl Index<NodeId> for SearchTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for SearchTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
