//! `relgraph stats`: node and edge counts after every pipeline stage.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use relgraph_core::config::EffectiveConfig;
use relgraph_graph::{SimplifyStats, simplify};

use super::{load_context, load_relations, pick_path, reported};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `relgraph stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// Relation file. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Context file, one node identifier per line.
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,
}

/// Execute `relgraph stats`.
pub fn run_stats(
    args: &StatsArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let relations = reported(output, load_relations(args.input.as_deref()))?;
    let context = reported(
        output,
        load_context(pick_path(args.context.as_ref(), config.context.as_ref())),
    )?;
    let (_, stats) = reported(output, simplify(&relations, &context))?;

    render_mode(output, &stats, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &SimplifyStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "stage  nodes  equivalence  containment  overlap")?;
    for stage in &stats.stages {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            stage.stage,
            stage.nodes,
            stage.equivalence_edges,
            stage.containment_edges,
            stage.overlap_edges
        )?;
    }
    Ok(())
}

fn render_stats_pretty(stats: &SimplifyStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Input")?;
    pretty_kv(w, "relations", stats.relations.to_string())?;
    pretty_kv(w, "context", stats.context.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Stages")?;
    writeln!(
        w,
        "{:<10} {:>8} {:>12} {:>12} {:>8}",
        "stage", "nodes", "equivalence", "containment", "overlap"
    )?;
    pretty_rule(w)?;
    for stage in &stats.stages {
        writeln!(
            w,
            "{:<10} {:>8} {:>12} {:>12} {:>8}",
            stage.stage,
            stage.nodes,
            stage.equivalence_edges,
            stage.containment_edges,
            stage.overlap_edges
        )?;
    }
    Ok(())
}
