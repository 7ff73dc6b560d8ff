//! Trace extraction from saved agent session logs.
//!
//! A session log is the JSON array of every event message the agent process
//! sent. Browsing actions carry the planner's output in `args.thought`,
//! either as raw trace text or as a JSON planning record whose `full_output`
//! field holds the trace. Search traces mention `MCTS`; single-step traces
//! only carry `State` blocks.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use mtv_trace::Schema;

const BROWSE_ACTION: &str = "browse_interactive";
const SEARCH_TAG: &str = "MCTS";
const SINGLE_STEP_TAG: &str = "State";

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("event log is not a JSON array")]
    NotAnArray,

    #[error("event {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("failed to parse event log: {0}")]
    Json(#[from] serde_json::Error),
}

/// One trace recovered from a browsing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    /// Position among the log's browsing actions, starting at 0.
    pub index: usize,
    pub schema: Schema,
    pub trace: String,
}

/// Parse a session log file's text and extract its traces.
pub fn parse_event_log(text: &str) -> Result<Vec<ReplayStep>, ReplayError> {
    let value: Value = serde_json::from_str(text)?;
    let messages = value.as_array().ok_or(ReplayError::NotAnArray)?;
    extract_steps(messages)
}

/// Extract every trace carried by browsing actions, in log order.
pub fn extract_steps(messages: &[Value]) -> Result<Vec<ReplayStep>, ReplayError> {
    let mut steps = Vec::new();
    let browsing = messages
        .iter()
        .filter(|m| m.get("action").and_then(Value::as_str) == Some(BROWSE_ACTION));

    for (index, message) in browsing.enumerate() {
        let Some(thought) = message
            .get("args")
            .and_then(|args| args.get("thought"))
            .and_then(Value::as_str)
        else {
            continue;
        };

        let schema = if thought.contains(SEARCH_TAG) {
            Schema::Search
        } else if thought.contains(SINGLE_STEP_TAG) {
            Schema::SingleStep
        } else {
            continue;
        };

        let trace = trace_text(index, thought)?;
        tracing::debug!(index, %schema, bytes = trace.len(), "Extracted replay step");
        steps.push(ReplayStep {
            index,
            schema,
            trace,
        });
    }

    Ok(steps)
}

fn trace_text(index: usize, thought: &str) -> Result<String, ReplayError> {
    if !thought.starts_with('{') {
        return Ok(thought.to_string());
    }

    let record: Value = serde_json::from_str(thought).map_err(|e| ReplayError::InvalidRecord {
        index,
        reason: format!("planning record is not valid JSON: {e}"),
    })?;
    record
        .get("full_output")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ReplayError::InvalidRecord {
            index,
            reason: "planning record has no string 'full_output' field".to_string(),
        })
}
