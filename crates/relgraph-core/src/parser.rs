//! Line parser for the relation stream.
//!
//! # Format
//!
//! ```text
//! <left> <right> <predicate> [ignored trailing fields]
//! ```
//!
//! Fields are separated by any ASCII whitespace. Only the first three fields
//! are read; anything after them (scores, annotations) is ignored. Blank lines
//! are skipped. Parsing is all-or-nothing: the first bad line aborts the read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::RelationError;
use crate::relation::{Predicate, Relation};

/// Parse one relation line.
///
/// Returns `Ok(None)` for blank lines. `line_no` is 1-based and only used
/// for error reporting.
///
/// # Errors
///
/// - [`RelationError::MalformedInputLine`] if fewer than three fields exist.
/// - [`RelationError::UnknownPredicate`] if the third field is not a
///   predicate token.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Relation>, RelationError> {
    let mut fields = line.split_ascii_whitespace();
    let (left, right, token) = match (fields.next(), fields.next(), fields.next()) {
        (None, _, _) => return Ok(None),
        (Some(left), Some(right), Some(token)) => (left, right, token),
        _ => {
            return Err(RelationError::MalformedInputLine {
                line: line_no,
                content: line.trim().to_string(),
            });
        }
    };

    let predicate: Predicate = token.parse().map_err(|_| RelationError::UnknownPredicate {
        line: line_no,
        token: token.to_string(),
    })?;

    Ok(Some(Relation::new(left, right, predicate)))
}

/// Parse every relation from a buffered reader.
///
/// # Errors
///
/// Returns the first parse error, or [`RelationError::Read`] if the reader
/// fails.
#[instrument(skip(reader))]
pub fn parse_relations<R: BufRead>(reader: R) -> Result<Vec<Relation>, RelationError> {
    let mut relations = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| RelationError::Read {
            what: "relation stream".to_string(),
            source,
        })?;
        if let Some(relation) = parse_line(&line, idx + 1)? {
            relations.push(relation);
        }
    }
    debug!(count = relations.len(), "parsed relations");
    Ok(relations)
}

/// Parse relations from a file on disk.
///
/// # Errors
///
/// See [`parse_relations`]; opening the file can also fail with
/// [`RelationError::Read`].
pub fn read_relations(path: &Path) -> Result<Vec<Relation>, RelationError> {
    let file = File::open(path).map_err(|source| RelationError::Read {
        what: path.display().to_string(),
        source,
    })?;
    parse_relations(BufReader::new(file))
}
