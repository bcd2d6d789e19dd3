//! Partition a flat relation list into the three typed graphs.
//!
//! ## Edge Direction
//!
//! Containment edges always point from container to contained:
//!
//! - `contains(a, b)` adds `a → b`
//! - `is_contained(a, b)` adds `b → a`
//!
//! Equivalence and overlap are undirected. Disjoint pairs are dropped.

#![allow(clippy::module_name_repetitions)]

use relgraph_core::{NodeId, Predicate, Relation};
use tracing::{debug, instrument};

use crate::graph::{ContainmentGraph, EquivalenceGraph, OverlapGraph};

/// The three graphs the pipeline threads from stage to stage.
#[derive(Debug, Clone, Default)]
pub struct RelationGraphs {
    pub equivalence: EquivalenceGraph,
    pub containment: ContainmentGraph,
    pub overlap: OverlapGraph,
}

impl RelationGraphs {
    /// Every node present in any of the three graphs.
    #[must_use]
    pub fn node_ids(&self) -> std::collections::BTreeSet<NodeId> {
        self.equivalence
            .nodes()
            .chain(self.containment.nodes())
            .chain(self.overlap.nodes())
            .map(str::to_string)
            .collect()
    }
}

/// Build the equivalence, containment and overlap graphs from `relations`.
///
/// Input order does not matter: each graph is canonicalized on construction.
#[instrument(skip(relations), fields(relations = relations.len()))]
pub fn build_graphs(relations: &[Relation]) -> RelationGraphs {
    let mut equivalent: Vec<(NodeId, NodeId)> = Vec::new();
    let mut containment: Vec<(NodeId, NodeId)> = Vec::new();
    let mut overlap: Vec<(NodeId, NodeId)> = Vec::new();
    let mut disjoint = 0_usize;

    for relation in relations {
        let pair = (relation.left.clone(), relation.right.clone());
        match relation.predicate {
            Predicate::Equivalent => equivalent.push(pair),
            Predicate::Contains => containment.push(pair),
            Predicate::IsContained => containment.push((pair.1, pair.0)),
            Predicate::Overlap => overlap.push(pair),
            Predicate::Disjoint => disjoint += 1,
        }
    }

    let graphs = RelationGraphs {
        equivalence: EquivalenceGraph::from_edges(equivalent),
        containment: ContainmentGraph::from_edges(containment),
        overlap: OverlapGraph::from_edges(overlap),
    };

    debug!(
        equivalence_edges = graphs.equivalence.edge_count(),
        containment_edges = graphs.containment.edge_count(),
        overlap_edges = graphs.overlap.edge_count(),
        disjoint,
        "built relation graphs"
    );

    graphs
}
