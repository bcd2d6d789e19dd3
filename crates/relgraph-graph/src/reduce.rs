//! Transitive reduction of the containment graph.
//!
//! An edge `A → C` is redundant when a longer path `A → B → … → C` exists.
//! Removing every redundant edge yields the minimal graph with the same
//! reachability, so the export shows direct containment only.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument, warn};

use crate::graph::ContainmentGraph;

/// Compute the transitive reduction of a DAG.
///
/// Returns a new graph with the same nodes but only the edges needed to
/// preserve reachability. An edge `(u, v)` is removed if there exists
/// another path `u → … → v` of length ≥ 2.
///
/// # Algorithm
///
/// Process nodes in reverse topological order (sinks first). For each node
/// `u`, the set of nodes reachable from `u` is the union of its successors
/// and their reachable sets. Edge `(u, v)` is redundant iff `v` is reachable
/// from some other successor `w ≠ v` of `u`.
///
/// The input must be acyclic (see [`crate::cycles::check_acyclic`]); a cyclic
/// graph is returned unchanged.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn transitive_reduction(graph: &ContainmentGraph) -> ContainmentGraph {
    let g = graph.inner();

    let Ok(topo) = toposort(g, None) else {
        warn!("containment graph is cyclic; skipping transitive reduction");
        return graph.clone();
    };

    let mut reachable: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::with_capacity(g.node_count());
    for &u in topo.iter().rev() {
        let mut reach_u: HashSet<NodeIndex> = HashSet::new();
        for v in g.neighbors_directed(u, Direction::Outgoing) {
            reach_u.insert(v);
            if let Some(rv) = reachable.get(&v) {
                reach_u.extend(rv.iter().copied());
            }
        }
        reachable.insert(u, reach_u);
    }

    let is_redundant = |u: NodeIndex, v: NodeIndex| {
        g.neighbors_directed(u, Direction::Outgoing)
            .filter(|&w| w != v)
            .any(|w| reachable.get(&w).is_some_and(|rw| rw.contains(&v)))
    };

    let kept: Vec<(String, String)> = g
        .edge_references()
        .filter(|e| !is_redundant(e.source(), e.target()))
        .map(|e| (g[e.source()].clone(), g[e.target()].clone()))
        .collect();

    debug!(
        removed = g.edge_count() - kept.len(),
        "reduced containment graph"
    );

    ContainmentGraph::from_parts(graph.nodes().map(str::to_string), kept)
}
