//! Per-node display metadata supplied by an external collaborator.
//!
//! The table maps node identifiers to a `{label, color}` record. Nodes the
//! table does not know are rendered with empty attributes; a missing entry is
//! never an error.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::RelationError;
use crate::relation::NodeId;

/// Display record for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl NodeAttributes {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            label: Some(label.into()),
        }
    }

    /// Attributes as `(key, value)` pairs in their stable output order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(color) = &self.color {
            pairs.push(("color", color.as_str()));
        }
        if let Some(label) = &self.label {
            pairs.push(("label", label.as_str()));
        }
        pairs
    }
}

/// Node metadata keyed by identifier, iterated in identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeTable {
    entries: BTreeMap<NodeId, NodeAttributes>,
}

impl NodeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<NodeId>, attributes: NodeAttributes) {
        self.entries.insert(id.into(), attributes);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NodeAttributes> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeAttributes)> {
        self.entries.iter()
    }

    /// Load a table from a JSON or YAML file, chosen by extension.
    ///
    /// `.json` is read as JSON; `.yaml`, `.yml` and anything else as YAML
    /// (YAML is a superset of JSON for this shape).
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::Read`] if the file cannot be read, or
    /// [`RelationError::Metadata`] if its content does not parse.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, RelationError> {
        let content = std::fs::read_to_string(path).map_err(|source| RelationError::Read {
            what: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let table: Self = if is_json {
            serde_json::from_str(&content).map_err(|e| RelationError::Metadata {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| RelationError::Metadata {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        debug!(nodes = table.len(), "loaded node metadata");
        Ok(table)
    }
}

impl FromIterator<(NodeId, NodeAttributes)> for NodeTable {
    fn from_iter<I: IntoIterator<Item = (NodeId, NodeAttributes)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pairs_are_color_then_label() {
        let attrs = NodeAttributes::new("*4", "red");
        assert_eq!(attrs.pairs(), vec![("color", "red"), ("label", "*4")]);
        assert!(NodeAttributes::default().pairs().is_empty());
    }

    #[test]
    fn loads_yaml_with_partial_records() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "CYP2D6*4:\n  label: \"*4\"\n  color: \"#ff0000\"\nvariant_12:\n  label: NG_008376.4:g.6866G>A"
        )
        .expect("write");

        let table = NodeTable::load(file.path()).expect("load");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("CYP2D6*4"),
            Some(&NodeAttributes::new("*4", "#ff0000"))
        );
        assert_eq!(
            table.get("variant_12").and_then(|a| a.color.as_deref()),
            None
        );
    }

    #[test]
    fn loads_json_by_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, r#"{{"b": {{"label": "B", "color": "blue"}}, "a": {{}}}}"#).expect("write");

        let table = NodeTable::load(file.path()).expect("load");
        let ids: Vec<&str> = table.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn malformed_metadata_is_reported() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, "[1, 2").expect("write");

        let err = NodeTable::load(file.path()).expect_err("bad json");
        assert!(matches!(err, RelationError::Metadata { .. }));
    }
}
