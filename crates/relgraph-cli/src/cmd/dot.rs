//! `relgraph dot`: simplify relations and write the graph description.
//!
//! All output is rendered into memory first and written only once the whole
//! run has succeeded, so a failed run leaves stdout (or `--output`) untouched.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use relgraph_core::ErrorCode;
use relgraph_core::config::EffectiveConfig;
use relgraph_graph::{render_dot, render_raw, simplify};
use tracing::info;

use super::{load_context, load_metadata, load_relations, pick_path, reported};
use crate::output::{CliError, OutputMode, render_error};

/// Arguments for `relgraph dot`.
#[derive(Args, Debug, Default)]
pub struct DotArgs {
    /// Relation file, one `<left> <right> <predicate>` triple per line.
    /// Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Node metadata table (JSON or YAML) with per-node label and color.
    #[arg(long, value_name = "FILE")]
    pub nodes: Option<PathBuf>,

    /// Context file, one node identifier per line.
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Write the graph description here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Draw every relation as given, without simplification.
    #[arg(long, conflicts_with = "context")]
    pub raw: bool,
}

/// Execute `relgraph dot`.
pub fn run_dot(args: &DotArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let relations = reported(output, load_relations(args.input.as_deref()))?;
    let metadata = reported(
        output,
        load_metadata(pick_path(args.nodes.as_ref(), config.nodes.as_ref())),
    )?;

    let document = if args.raw {
        render_raw(&relations, &metadata)
    } else {
        let context = reported(
            output,
            load_context(pick_path(args.context.as_ref(), config.context.as_ref())),
        )?;
        let (graphs, _) = reported(output, simplify(&relations, &context))?;
        render_dot(&graphs, &metadata, &context)
    };

    info!(bytes = document.len(), raw = args.raw, "rendered graph description");

    let written = match &args.output {
        Some(path) => std::fs::write(path, &document)
            .with_context(|| format!("failed to write {}", path.display())),
        None => write_stdout(&document),
    };
    if let Err(err) = &written {
        render_error(
            output,
            &CliError::with_code(format!("{err:#}"), ErrorCode::InternalUnexpected),
        )?;
    }
    written
}

fn write_stdout(document: &str) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(document.as_bytes())
        .context("failed to write to stdout")?;
    out.flush().context("failed to flush stdout")
}
