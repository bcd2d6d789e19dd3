//! Restrict the graphs to a neighborhood of the caller's nodes of interest.
//!
//! Starting from the context set:
//!
//! 1. add every containment ancestor of a context node;
//! 2. add every direct overlap neighbor of a context node;
//! 3. add the full equivalence class of every node collected so far.
//!
//! The three graphs are then cut down to the subgraph induced by that set.

use std::collections::BTreeSet;

use relgraph_core::{ContextSet, NodeId};
use tracing::{debug, instrument};

use crate::build::RelationGraphs;

/// Compute the closure of `context` over `graphs`.
#[must_use]
pub fn context_closure(graphs: &RelationGraphs, context: &ContextSet) -> BTreeSet<NodeId> {
    let mut nodes: BTreeSet<NodeId> = context.clone();

    for node in context {
        if graphs.containment.contains_node(node) {
            nodes.extend(graphs.containment.ancestors(node));
        }
        if graphs.overlap.contains_node(node) {
            nodes.extend(graphs.overlap.neighbors(node).into_iter().map(str::to_string));
        }
    }

    let selected: Vec<NodeId> = nodes.iter().cloned().collect();
    for node in &selected {
        if graphs.equivalence.contains_node(node) {
            nodes.extend(graphs.equivalence.component_of(node));
        }
    }

    nodes
}

/// Restrict all three graphs to the closure of `context`.
///
/// An empty context applies no restriction.
#[must_use]
#[instrument(skip(graphs, context), fields(context = context.len()))]
pub fn select_context(graphs: RelationGraphs, context: &ContextSet) -> RelationGraphs {
    if context.is_empty() {
        return graphs;
    }

    let nodes = context_closure(&graphs, context);
    debug!(selected = nodes.len(), "context closure");

    RelationGraphs {
        equivalence: graphs.equivalence.induced_subgraph(&nodes),
        containment: graphs.containment.induced_subgraph(&nodes),
        overlap: graphs.overlap.induced_subgraph(&nodes),
    }
}
