//! MTV CLI - configuration, replayed event logs and text output for the
//! `mtv` binary.

pub mod commands;
pub mod config;
pub mod outline;
pub mod replay;

pub use config::{ConfigError, LoggingConfig, MtvConfig};
pub use replay::{extract_steps, parse_event_log, ReplayError, ReplayStep};
