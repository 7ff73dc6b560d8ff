//! Trace text to scene in one call.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mtv_trace::{aggregate, parse_trace_with, NodeId, ParserConfig, SearchTree, TraceError};

use crate::highlight::highlight_best_per_depth;
use crate::layout::{compute_layout, Layout, LayoutConfig};
use crate::scene::{build_scene, Scene, SceneConfig};

/// Settings for every stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub parser: ParserConfig,
    pub layout: LayoutConfig,
    pub scene: SceneConfig,
}

/// Everything produced for one trace.
#[derive(Debug, Clone, Serialize)]
pub struct Visualization {
    pub tree: SearchTree,
    pub root_q: f64,
    pub layout: Layout,
    pub highlights: BTreeSet<NodeId>,
    pub scene: Scene,
}

/// Parse, aggregate, lay out, highlight and build the scene.
///
/// Callers holding a growing trace run this again on the full text; nothing
/// is carried over between calls.
pub fn visualize(text: &str, config: &PipelineConfig) -> Result<Visualization, TraceError> {
    let mut tree = parse_trace_with(text, &config.parser)?;
    let root_q = aggregate(&mut tree);
    let layout = compute_layout(&tree, &config.layout);
    let highlights = highlight_best_per_depth(&tree);
    let scene = build_scene(&tree, &layout, &highlights, &config.scene);

    tracing::debug!(
        nodes = tree.node_count(),
        highlighted = highlights.len(),
        root_q,
        "Built visualization"
    );

    Ok(Visualization {
        tree,
        root_q,
        layout,
        highlights,
        scene,
    })
}
