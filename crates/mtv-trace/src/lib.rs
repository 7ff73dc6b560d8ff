//! MTV Trace - search tree reconstruction from agent planning traces
//!
//! Reads the marker-delimited text log a planning agent writes while it
//! explores strategies, rebuilds the search tree in an id-addressed arena
//! and rolls node rewards up into Q-values.

pub mod aggregate;
pub mod error;
pub mod parser;
pub mod reflow;
pub mod schema;
pub mod tree;

pub use aggregate::aggregate;
pub use error::*;
pub use parser::{parse_trace, parse_trace_with, ParseContext, ParserConfig};
pub use reflow::{reflow, BREAK, LABEL_WIDTH, LINE_WIDTH};
pub use schema::{MarkerEvent, MarkerSpec, Schema};
pub use tree::*;
