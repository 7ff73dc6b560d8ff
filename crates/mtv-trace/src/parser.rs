//! Line-oriented state machine that rebuilds the search tree from a trace.
//!
//! The parser reads one line at a time with no lookahead. A line either
//! matches a marker of the active [`Schema`] and triggers its
//! [`MarkerEvent`], or it is continuation text for whichever multi-line field
//! is currently open.
//!
//! All running state lives in a [`ParseContext`], so independent parses never
//! share anything and the transition function can be driven line by line.

use serde::{Deserialize, Serialize};

use crate::reflow::{reflow, BREAK, LABEL_WIDTH, LINE_WIDTH};
use crate::schema::{MarkerEvent, MarkerSpec, Schema};
use crate::tree::{Node, NodeId, NodeStatus, SearchTree};
use crate::TraceError;

/// Parser settings: trace dialect and reflow widths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub schema: Schema,
    /// Column width for state, strategy and status text.
    pub line_width: usize,
    /// Column width for summary labels.
    pub label_width: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            schema: Schema::Search,
            line_width: LINE_WIDTH,
            label_width: LABEL_WIDTH,
        }
    }
}

impl ParserConfig {
    pub fn for_schema(schema: Schema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }
}

/// Multi-line field currently collecting continuation lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    Idle,
    State,
    NextState,
}

/// Parse `text` written in `schema` with default reflow widths.
pub fn parse_trace(text: &str, schema: Schema) -> Result<SearchTree, TraceError> {
    parse_trace_with(text, &ParserConfig::for_schema(schema))
}

/// Parse `text` with explicit parser settings.
pub fn parse_trace_with(text: &str, config: &ParserConfig) -> Result<SearchTree, TraceError> {
    let mut ctx = ParseContext::new(config.clone());
    for line in text.trim().lines() {
        ctx.feed_line(line)?;
    }
    ctx.finish()
}

// ---------------------------------------------------------------------------
// Parse context
// ---------------------------------------------------------------------------

/// Running state of one parse.
#[derive(Debug)]
pub struct ParseContext {
    config: ParserConfig,
    tree: Option<SearchTree>,
    /// Node that new candidates attach to.
    current_container: Option<NodeId>,
    buffer: BufferMode,
    state_buffer: String,
    next_state_buffer: String,
    candidate_text: Option<String>,
    summary_text: Option<String>,
    grounding_text: Option<String>,
    /// Candidate named by the last expansion marker.
    pending_candidate: Option<NodeId>,
    /// 1-based number of the line being processed.
    line: usize,
}

impl ParseContext {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            tree: None,
            current_container: None,
            buffer: BufferMode::Idle,
            state_buffer: String::new(),
            next_state_buffer: String::new(),
            candidate_text: None,
            summary_text: None,
            grounding_text: None,
            pending_candidate: None,
            line: 0,
        }
    }

    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    pub fn current_container(&self) -> Option<NodeId> {
        self.current_container
    }

    pub fn pending_candidate(&self) -> Option<NodeId> {
        self.pending_candidate
    }

    pub fn buffer_mode(&self) -> BufferMode {
        self.buffer
    }

    /// Process the next trace line.
    pub fn feed_line(&mut self, line: &str) -> Result<(), TraceError> {
        self.line += 1;

        let Some(spec) = self.config.schema.classify(line) else {
            self.append_continuation(line);
            return Ok(());
        };

        let value = if spec.event.takes_value() {
            self.marker_value(line, spec)?
        } else {
            ""
        };
        self.apply(spec.event, value)
    }

    /// Finish the parse and hand over the tree.
    pub fn finish(self) -> Result<SearchTree, TraceError> {
        let tree = self.tree.ok_or(TraceError::MalformedTrace)?;
        tracing::info!(
            schema = %self.config.schema,
            nodes = tree.node_count(),
            lines = self.line,
            "Parsed search trace"
        );
        Ok(tree)
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn apply(&mut self, event: MarkerEvent, value: &str) -> Result<(), TraceError> {
        match event {
            MarkerEvent::StateStart => {
                self.buffer = BufferMode::State;
                let text = self.wide(value);
                push_chunk(&mut self.state_buffer, &text);
            }
            MarkerEvent::ReasoningStart => self.open_container(),
            MarkerEvent::CandidateText => {
                self.candidate_text = Some(self.wide(value));
            }
            MarkerEvent::SummaryText => {
                self.summary_text = Some(self.label(value));
            }
            MarkerEvent::GroundingText => {
                self.grounding_text = Some(self.wide(value));
            }
            MarkerEvent::FastReward => self.score_candidate(value)?,
            MarkerEvent::Expansion => self.resolve_expansion(value)?,
            MarkerEvent::NextStateStart => {
                self.pending_candidate.ok_or_else(|| {
                    self.unresolved("next state without a resolved expansion target")
                })?;
                self.buffer = BufferMode::NextState;
                let text = self.wide(value);
                push_chunk(&mut self.next_state_buffer, &text);
            }
            MarkerEvent::Status => self.promote_pending(value)?,
            MarkerEvent::ContainerStatus => {
                let status = NodeStatus::Resolved(self.wide(value));
                let container = self.require_container("container status")?;
                let tree = self.tree_mut("container status")?;
                tree[container].status = status;
            }
            MarkerEvent::ActionSummary => self.add_single_step_child(value)?,
        }
        Ok(())
    }

    fn open_container(&mut self) {
        if self.buffer == BufferMode::State {
            self.buffer = BufferMode::Idle;
        }
        let node = Node::container(std::mem::take(&mut self.state_buffer));

        let id = match self.tree.as_mut() {
            Some(tree) => {
                let parent = self.current_container.unwrap_or_else(|| tree.root());
                tree.push_child(parent, node)
            }
            None => {
                let tree = SearchTree::new(node);
                let root = tree.root();
                self.tree = Some(tree);
                root
            }
        };

        tracing::debug!(node = %id, line = self.line, "Opened container node");
        self.current_container = Some(id);
    }

    fn score_candidate(&mut self, value: &str) -> Result<(), TraceError> {
        let reward: f64 = value.trim().parse().map_err(|_| TraceError::InvalidReward {
            line: self.line,
            value: value.to_string(),
        })?;
        let container = self.require_container("fast reward")?;
        let action = self.candidate_text.clone().ok_or_else(|| {
            self.unresolved("fast reward without a preceding strategy candidate")
        })?;

        let mut node = Node::candidate(action, reward);
        if let Some(summary) = &self.summary_text {
            node = node.with_summary(summary.clone());
        }

        let line = self.line;
        let id = self.tree_mut("fast reward")?.push_child(container, node);
        tracing::debug!(node = %id, parent = %container, reward, line, "Scored candidate node");
        Ok(())
    }

    fn resolve_expansion(&mut self, value: &str) -> Result<(), TraceError> {
        let expanded = self.wide(value);
        let line = self.line;
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| self.unresolved("expansion before any reasoning marker"))?;

        // Last match wins when several candidates share the same text.
        let matches = tree.find_by_action(&expanded);
        if matches.len() > 1 {
            tracing::warn!(
                line,
                candidates = ?matches,
                "Ambiguous expansion: several candidates share this strategy text, using the last"
            );
        }

        self.pending_candidate = matches.last().copied();
        match self.pending_candidate {
            Some(id) => tracing::debug!(node = %id, line, "Resolved expansion target"),
            None => tracing::warn!(line, "Expansion names no known candidate"),
        }
        Ok(())
    }

    fn promote_pending(&mut self, value: &str) -> Result<(), TraceError> {
        let target = self
            .pending_candidate
            .ok_or_else(|| self.unresolved("status without a resolved expansion target"))?;
        let status = NodeStatus::Resolved(self.wide(value));
        let state_info = std::mem::take(&mut self.next_state_buffer);

        let line = self.line;
        let tree = self.tree_mut("status")?;
        let node = tree.get_mut(target).ok_or_else(|| TraceError::UnresolvedReference {
            line,
            reason: format!("expansion target {target} is not in the node table"),
        })?;
        node.state_info = Some(state_info);
        node.status = status;

        tracing::debug!(node = %target, line, "Promoted candidate to current container");
        self.current_container = Some(target);
        self.pending_candidate = None;
        if self.buffer == BufferMode::NextState {
            self.buffer = BufferMode::Idle;
        }
        Ok(())
    }

    fn add_single_step_child(&mut self, value: &str) -> Result<(), TraceError> {
        let container = self.require_container("summary")?;
        let strategy = self
            .candidate_text
            .as_deref()
            .ok_or_else(|| self.unresolved("summary without a preceding active strategy"))?;
        let grounding = self
            .grounding_text
            .as_deref()
            .ok_or_else(|| self.unresolved("summary without a preceding action"))?;

        let action = format!("{strategy}{BREAK}<b>Grounding</b>: {grounding}");
        let node = Node::candidate(action, 0.0).with_summary(self.label(value));

        let line = self.line;
        let id = self.tree_mut("summary")?.push_child(container, node);
        tracing::debug!(node = %id, parent = %container, line, "Added single-step node");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn append_continuation(&mut self, line: &str) {
        let text = self.wide(line);
        match self.buffer {
            BufferMode::State => push_chunk(&mut self.state_buffer, &text),
            BufferMode::NextState => push_chunk(&mut self.next_state_buffer, &text),
            BufferMode::Idle => {
                tracing::trace!(line = self.line, "Dropping unrecognized line");
            }
        }
    }

    fn marker_value<'a>(&self, line: &'a str, spec: &MarkerSpec) -> Result<&'a str, TraceError> {
        line.split_once(": ")
            .map(|(_, value)| value)
            .ok_or_else(|| TraceError::MissingValue {
                line: self.line,
                marker: spec.prefix.to_string(),
            })
    }

    fn require_container(&self, marker: &str) -> Result<NodeId, TraceError> {
        self.current_container
            .ok_or_else(|| self.unresolved(&format!("{marker} before any reasoning marker")))
    }

    fn tree_mut(&mut self, marker: &str) -> Result<&mut SearchTree, TraceError> {
        let line = self.line;
        self.tree.as_mut().ok_or_else(|| TraceError::UnresolvedReference {
            line,
            reason: format!("{marker} before any reasoning marker"),
        })
    }

    fn unresolved(&self, reason: &str) -> TraceError {
        TraceError::UnresolvedReference {
            line: self.line,
            reason: reason.to_string(),
        }
    }

    fn wide(&self, text: &str) -> String {
        reflow(text, self.config.line_width)
    }

    fn label(&self, text: &str) -> String {
        reflow(text, self.config.label_width)
    }
}

fn push_chunk(buffer: &mut String, text: &str) {
    buffer.push_str(text);
    buffer.push_str(BREAK);
}
