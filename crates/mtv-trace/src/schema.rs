//! Marker vocabularies of the two trace schemas.
//!
//! Both schemas share one parser; a schema only decides which line prefixes
//! are recognized and which parser event each prefix triggers.

use serde::{Deserialize, Serialize};

/// Parser event triggered by a recognized marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEvent {
    /// Start accumulating the current state description.
    StateStart,
    /// Close the state description and open a container node.
    ReasoningStart,
    /// Capture the strategy text for the next candidate.
    CandidateText,
    /// Capture the short label for the next candidate.
    SummaryText,
    /// Score and create a candidate node.
    FastReward,
    /// Name the candidate about to be expanded.
    Expansion,
    /// Start accumulating the expanded candidate's state.
    NextStateStart,
    /// Promote the expanded candidate to the current container.
    Status,
    /// Set the status of the current container directly.
    ContainerStatus,
    /// Capture the grounding text for the next single-step child.
    GroundingText,
    /// Create a fully formed single-step child node.
    ActionSummary,
}

impl MarkerEvent {
    /// Whether the marker line carries a `": "` separated value.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::ReasoningStart)
    }
}

/// A line prefix and the event it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpec {
    pub prefix: &'static str,
    pub event: MarkerEvent,
}

const fn marker(prefix: &'static str, event: MarkerEvent) -> MarkerSpec {
    MarkerSpec { prefix, event }
}

const SEARCH_MARKERS: &[MarkerSpec] = &[
    marker("*State*", MarkerEvent::StateStart),
    marker("*Replan Reasoning*", MarkerEvent::ReasoningStart),
    marker("*Strategy Candidate*", MarkerEvent::CandidateText),
    marker("*Summary*", MarkerEvent::SummaryText),
    marker("*Fast Reward*", MarkerEvent::FastReward),
    marker("*Expanded Strategy*", MarkerEvent::Expansion),
    marker("*Next State*", MarkerEvent::NextStateStart),
    marker("*Status*", MarkerEvent::Status),
];

const SINGLE_STEP_MARKERS: &[MarkerSpec] = &[
    marker("*State*", MarkerEvent::StateStart),
    marker("*Replan Reasoning*", MarkerEvent::ReasoningStart),
    marker("*Replan Status*", MarkerEvent::ContainerStatus),
    marker("*Active Strategy*", MarkerEvent::CandidateText),
    marker("*Action*", MarkerEvent::GroundingText),
    marker("*Summary", MarkerEvent::ActionSummary),
];

/// Which trace dialect a log is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schema {
    /// Search mode: fast-reward / expansion / next-state markers.
    #[default]
    Search,
    /// Single-step mode: active-strategy / action / summary markers.
    SingleStep,
}

impl Schema {
    pub fn markers(self) -> &'static [MarkerSpec] {
        match self {
            Self::Search => SEARCH_MARKERS,
            Self::SingleStep => SINGLE_STEP_MARKERS,
        }
    }

    /// First marker of this schema that prefixes `line`.
    pub fn classify(self, line: &str) -> Option<&'static MarkerSpec> {
        self.markers().iter().find(|m| line.starts_with(m.prefix))
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::SingleStep => write!(f, "single-step"),
        }
    }
}

impl std::str::FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "search" | "mcts" => Ok(Self::Search),
            "single-step" | "single_step" | "onestep" => Ok(Self::SingleStep),
            other => Err(format!(
                "unknown trace schema '{other}' (expected 'search' or 'single-step')"
            )),
        }
    }
}
