pub mod completions;
pub mod dot;
pub mod stats;

use std::io;
use std::path::{Path, PathBuf};

use relgraph_core::context::read_context;
use relgraph_core::parser::{parse_relations, read_relations};
use relgraph_core::{ContextSet, NodeTable, Relation, RelationError};
use tracing::debug;

use crate::output::{CliError, OutputMode, render_error};

/// Read relations from `path`, or from stdin when no path is given.
pub fn load_relations(path: Option<&Path>) -> Result<Vec<Relation>, RelationError> {
    match path {
        Some(path) => read_relations(path),
        None => {
            debug!("reading relations from stdin");
            parse_relations(io::stdin().lock())
        }
    }
}

/// Load the node metadata table. No path means an empty table.
pub fn load_metadata(path: Option<&Path>) -> Result<NodeTable, RelationError> {
    path.map_or_else(|| Ok(NodeTable::new()), NodeTable::load)
}

/// Load the context set. No path means an empty context.
pub fn load_context(path: Option<&Path>) -> Result<ContextSet, RelationError> {
    path.map_or_else(|| Ok(ContextSet::new()), read_context)
}

/// Prefer the explicit argument, falling back to the configured default.
pub fn pick_path<'a>(explicit: Option<&'a PathBuf>, configured: Option<&'a PathBuf>) -> Option<&'a Path> {
    explicit.or(configured).map(PathBuf::as_path)
}

/// Render a failed result's error to stderr and hand it back as `anyhow`.
pub fn reported<T, E>(output: OutputMode, result: Result<T, E>) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
    for<'e> CliError: From<&'e E>,
{
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}
