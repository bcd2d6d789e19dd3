#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use relgraph_core::config::resolve_config;
use relgraph_core::{ErrorCode, timing};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "relgraph: simplify variant/allele relations into a minimal graph",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit per-stage timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format for reports and errors.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self, configured: &str) -> OutputMode {
        resolve_output_mode(self.format, self.json, configured)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Render relations as a Graphviz DOT graph",
        long_about = "Read relation triples, collapse equivalence classes, reduce containment \
                      to direct edges, prune redundant overlap and write a DOT graph.",
        after_help = "EXAMPLES:\n    # Simplify a relation file\n    relgraph dot --input relations.txt > graph.dot\n\n    # Label nodes and focus on two alleles\n    relgraph dot -i relations.txt --nodes nodes.yaml --context focus.txt -o graph.dot\n\n    # Draw the relations without simplification\n    relgraph dot -i relations.txt --raw"
    )]
    Dot(cmd::dot::DotArgs),

    #[command(
        about = "Report graph sizes after each pipeline stage",
        after_help = "EXAMPLES:\n    # Stage table\n    relgraph stats --input relations.txt\n\n    # Emit machine-readable output\n    relgraph stats --input relations.txt --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    relgraph completions bash\n\n    # Generate zsh completions\n    relgraph completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("RELGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "relgraph=debug,relgraph_core=debug,relgraph_graph=debug,info"
        } else {
            "relgraph=info,relgraph_core=info,relgraph_graph=info,warn"
        })
    });

    let format = env::var("RELGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.json) {
        Ok(config) => config,
        Err(err) => {
            let fallback = cli.format.unwrap_or(OutputMode::Text);
            render_error(
                fallback,
                &CliError::with_code(format!("{err:#}"), ErrorCode::ConfigParseError),
            )?;
            return Err(err);
        }
    };
    let output = cli.output_mode(&config.resolved_output);

    let command_result = match cli.command {
        Commands::Dot(ref args) => {
            timing::timed("cmd.dot", || cmd::dot::run_dot(args, output, &config))
        }
        Commands::Stats(ref args) => {
            timing::timed("cmd.stats", || cmd::stats::run_stats(args, output, &config))
        }
        Commands::Completions(ref args) => timing::timed("cmd.completions", || {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }),
    };

    if timing_enabled {
        let report = timing::collect_report();
        if output.is_json() {
            eprintln!("{}", serde_json::to_string_pretty(&report.to_json())?);
        } else if report.is_empty() {
            eprintln!("timing report: no samples recorded");
        } else {
            eprintln!("timing report:");
            eprintln!("{}", report.display_table());
            eprintln!("timing report (json):");
            eprintln!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
    }

    command_result
}
