//! MTV Layout - turn a search tree into something drawable
//!
//! Places every node of a [`mtv_trace::SearchTree`] on a left-to-right
//! hierarchical grid, picks the best node per depth for highlighting and
//! describes the resulting chart in a renderer-agnostic [`Scene`].

pub mod highlight;
pub mod layout;
pub mod pipeline;
pub mod scene;

pub use highlight::highlight_best_per_depth;
pub use layout::{compute_layout, Layout, LayoutConfig, Point};
pub use pipeline::{visualize, PipelineConfig, Visualization};
pub use scene::{build_scene, LegendEntry, Scene, SceneConfig, SceneEdge, SceneNode};
