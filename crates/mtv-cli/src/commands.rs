//! Subcommand implementations behind the `mtv` binary.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use mtv_layout::{visualize, PipelineConfig, Scene};
use mtv_trace::Schema;

use crate::config::MtvConfig;
use crate::outline::render_outline;
use crate::replay::parse_event_log;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Trace file to read; stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Trace schema, overriding the config file
    #[arg(long)]
    pub schema: Option<Schema>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Trace file to read; stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Trace schema, overriding the config file
    #[arg(long)]
    pub schema: Option<Schema>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Saved session log (JSON array of event messages)
    pub log: PathBuf,

    /// Only render this step (0-based browsing action index)
    #[arg(long)]
    pub step: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Outcome of one replayed step.
#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub index: usize,
    pub schema: Schema,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn render(args: RenderArgs, config: &MtvConfig) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    let pipeline = pipeline_for(config, args.schema);
    let vis = visualize(&text, &pipeline).context("failed to build visualization")?;

    tracing::info!(
        nodes = vis.tree.node_count(),
        root_q = vis.root_q,
        "Rendered trace"
    );
    println!("{}", to_json(&vis.scene, args.pretty)?);
    Ok(())
}

pub fn tree(args: TreeArgs, config: &MtvConfig) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    let pipeline = pipeline_for(config, args.schema);
    let vis = visualize(&text, &pipeline).context("failed to build visualization")?;

    print!("{}", render_outline(&vis.tree, &vis.highlights));
    Ok(())
}

pub fn replay(args: ReplayArgs, config: &MtvConfig) -> Result<()> {
    let text = std::fs::read_to_string(&args.log)
        .with_context(|| format!("failed to read session log {}", args.log.display()))?;
    let steps = parse_event_log(&text)
        .with_context(|| format!("failed to extract traces from {}", args.log.display()))?;

    let mut outputs = Vec::new();
    for step in steps {
        if args.step.is_some_and(|wanted| wanted != step.index) {
            continue;
        }
        let pipeline = pipeline_for(config, Some(step.schema));
        let output = match visualize(&step.trace, &pipeline) {
            Ok(vis) => ReplayOutput {
                index: step.index,
                schema: step.schema,
                scene: Some(vis.scene),
                error: None,
            },
            Err(e) => {
                tracing::warn!(index = step.index, error = %e, "Skipping unparseable replay step");
                ReplayOutput {
                    index: step.index,
                    schema: step.schema,
                    scene: None,
                    error: Some(e.to_string()),
                }
            }
        };
        outputs.push(output);
    }

    if let Some(wanted) = args.step {
        anyhow::ensure!(!outputs.is_empty(), "session log has no trace at step {wanted}");
    }

    tracing::info!(steps = outputs.len(), "Replayed session log");
    println!("{}", to_json(&outputs, args.pretty)?);
    Ok(())
}

fn pipeline_for(config: &MtvConfig, schema: Option<Schema>) -> PipelineConfig {
    let mut pipeline = config.pipeline();
    if let Some(schema) = schema {
        pipeline.parser.schema = schema;
    }
    pipeline
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read trace {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read trace from stdin")?;
            Ok(text)
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
