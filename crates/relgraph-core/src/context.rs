//! Context set: the caller's nodes of primary interest.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::RelationError;
use crate::relation::NodeId;

/// Nodes of interest. Empty means "no restriction".
pub type ContextSet = BTreeSet<NodeId>;

/// Read a context set, one identifier per line.
///
/// Lines are trimmed and blank lines are skipped.
///
/// # Errors
///
/// Returns [`RelationError::Read`] if the reader fails.
pub fn parse_context<R: BufRead>(reader: R) -> Result<ContextSet, RelationError> {
    let mut context = ContextSet::new();
    for line in reader.lines() {
        let line = line.map_err(|source| RelationError::Read {
            what: "context".to_string(),
            source,
        })?;
        let id = line.trim();
        if !id.is_empty() {
            context.insert(id.to_string());
        }
    }
    Ok(context)
}

/// Read a context file from disk.
///
/// # Errors
///
/// Returns [`RelationError::Read`] if the file cannot be opened or read.
pub fn read_context(path: &Path) -> Result<ContextSet, RelationError> {
    let file = File::open(path).map_err(|source| RelationError::Read {
        what: path.display().to_string(),
        source,
    })?;
    parse_context(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_id_per_line() {
        let context = parse_context("CYP2D6*4\n  CYP2D6*10 \n\nCYP2D6*4\n".as_bytes()).expect("parse");
        let ids: Vec<&str> = context.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["CYP2D6*10", "CYP2D6*4"]);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = read_context(Path::new("/nonexistent/context.txt")).expect_err("missing");
        assert!(matches!(err, RelationError::Read { .. }));
    }
}
