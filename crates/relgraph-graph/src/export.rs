//! Graphviz DOT export.
//!
//! # Output
//!
//! ```text
//! digraph {
//! "<id>" [color="<color>",label="<label>"];
//! "<u>" -> "<v>";
//! "<a>" -> "<b>" [arrowsize=0, color="black:invis:black"];
//! "<a>" -> "<b>" [arrowsize=0, style=dashed];
//! }
//! ```
//!
//! Node lines come first, in identifier order. Edge lines follow: equivalence,
//! then containment (container → contained), then overlap, each in edge-set
//! order. Equivalence and overlap are drawn as arrowless edges between a
//! [`canonical_pair`], so both operand orders of the same relation render
//! identically.

use std::fmt;

use relgraph_core::{ContextSet, NodeAttributes, NodeTable, Predicate, Relation};
use tracing::instrument;

use crate::build::RelationGraphs;
use crate::graph::canonical_pair;

/// Flatten the final graphs back into typed relations.
///
/// Containment edges come out as [`Predicate::Contains`] with the container
/// on the left.
#[must_use]
pub fn export_relations(graphs: &RelationGraphs) -> Vec<Relation> {
    let equivalent = graphs
        .equivalence
        .edges()
        .map(|(a, b)| Relation::new(a, b, Predicate::Equivalent));
    let containment = graphs
        .containment
        .edges()
        .map(|(a, b)| Relation::new(a, b, Predicate::Contains));
    let overlap = graphs
        .overlap
        .edges()
        .map(|(a, b)| Relation::new(a, b, Predicate::Overlap));

    equivalent.chain(containment).chain(overlap).collect()
}

/// Select node metadata for the export.
///
/// The table holds every node of the final graphs plus every context node.
/// Nodes missing from `metadata` get empty attributes.
#[must_use]
pub fn node_table(graphs: &RelationGraphs, metadata: &NodeTable, context: &ContextSet) -> NodeTable {
    graphs
        .node_ids()
        .into_iter()
        .chain(context.iter().cloned())
        .map(|id| {
            let attributes = metadata.get(&id).cloned().unwrap_or_default();
            (id, attributes)
        })
        .collect()
}

/// Render one relation as a DOT edge line. Disjoint pairs render nothing.
#[must_use]
pub fn write_edge(relation: &Relation) -> Option<String> {
    let Relation { left, right, predicate } = relation;
    match predicate {
        Predicate::Contains => Some(format!("{} -> {};", quote(left), quote(right))),
        Predicate::IsContained => Some(format!("{} -> {};", quote(right), quote(left))),
        Predicate::Equivalent => {
            let (a, b) = canonical_pair(left, right);
            Some(format!(
                "{} -> {} [arrowsize=0, color=\"black:invis:black\"];",
                quote(a),
                quote(b)
            ))
        }
        Predicate::Overlap => {
            let (a, b) = canonical_pair(left, right);
            Some(format!("{} -> {} [arrowsize=0, style=dashed];", quote(a), quote(b)))
        }
        Predicate::Disjoint => None,
    }
}

/// Render one node line.
#[must_use]
pub fn write_node(id: &str, attributes: &NodeAttributes) -> String {
    let attrs = attributes
        .pairs()
        .into_iter()
        .map(|(key, value)| format!("{key}={}", quote(value)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{} [{attrs}];", quote(id))
}

/// Every line of a DOT document, without line terminators.
pub fn dot_lines<'a>(
    relations: &'a [Relation],
    nodes: &'a NodeTable,
) -> impl Iterator<Item = String> + 'a {
    std::iter::once("digraph {".to_string())
        .chain(nodes.iter().map(|(id, attributes)| write_node(id, attributes)))
        .chain(relations.iter().filter_map(write_edge))
        .chain(std::iter::once("}".to_string()))
}

/// Write a complete DOT document.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_dot<W: fmt::Write>(out: &mut W, relations: &[Relation], nodes: &NodeTable) -> fmt::Result {
    for line in dot_lines(relations, nodes) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn collect_document(relations: &[Relation], nodes: &NodeTable) -> String {
    dot_lines(relations, nodes).fold(String::new(), |mut out, line| {
        out.push_str(&line);
        out.push('\n');
        out
    })
}

/// Render simplified graphs as a DOT document.
#[must_use]
#[instrument(skip_all)]
pub fn render_dot(graphs: &RelationGraphs, metadata: &NodeTable, context: &ContextSet) -> String {
    let relations = export_relations(graphs);
    let nodes = node_table(graphs, metadata, context);
    collect_document(&relations, &nodes)
}

/// Render relations as given, without simplification.
///
/// Every non-disjoint relation becomes one edge line, in input order; the
/// node table holds every node that appears in such a relation.
#[must_use]
#[instrument(skip_all, fields(relations = relations.len()))]
pub fn render_raw(relations: &[Relation], metadata: &NodeTable) -> String {
    let nodes: NodeTable = relations
        .iter()
        .filter(|r| r.predicate != Predicate::Disjoint)
        .flat_map(|r| [r.left.clone(), r.right.clone()])
        .map(|id| {
            let attributes = metadata.get(&id).cloned().unwrap_or_default();
            (id, attributes)
        })
        .collect();
    collect_document(relations, &nodes)
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}
