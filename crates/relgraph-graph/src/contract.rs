//! Collapse equivalence classes to a single representative.
//!
//! Each connected component of the equivalence graph is represented by its
//! lexicographically smallest member. Containment and overlap edges touching
//! any other member are moved onto the representative; self-loops this
//! produces are dropped and duplicates merged.
//!
//! The returned equivalence graph is a star per class, `representative -
//! member`, recording which nodes were merged so a representative can be
//! expanded back into its class later.

use std::collections::HashMap;

use relgraph_core::NodeId;
use tracing::{debug, instrument};

use crate::build::RelationGraphs;
use crate::graph::EquivalenceGraph;

/// Contract every equivalence class onto its representative.
#[must_use]
#[instrument(skip(graphs), fields(
    equivalence_nodes = graphs.equivalence.node_count(),
))]
pub fn contract_equivalent(graphs: RelationGraphs) -> RelationGraphs {
    let representatives = representative_map(&graphs.equivalence);

    let collapsed = EquivalenceGraph::from_edges(
        representatives
            .iter()
            .map(|(member, rep)| (rep.clone(), member.clone())),
    );

    let containment = graphs
        .containment
        .relabel(|id| representative_of(&representatives, id));
    let overlap = graphs
        .overlap
        .relabel(|id| representative_of(&representatives, id));

    debug!(
        merged = representatives.len(),
        containment_edges = containment.edge_count(),
        overlap_edges = overlap.edge_count(),
        "contracted equivalence classes"
    );

    RelationGraphs {
        equivalence: collapsed,
        containment,
        overlap,
    }
}

fn representative_of<'a>(representatives: &'a HashMap<NodeId, NodeId>, id: &'a str) -> &'a str {
    representatives.get(id).map_or(id, String::as_str)
}

/// Map every non-representative class member to its representative.
///
/// Representatives themselves are not keys.
fn representative_map(equivalence: &EquivalenceGraph) -> HashMap<NodeId, NodeId> {
    let mut map = HashMap::new();
    for component in equivalence.connected_components() {
        let mut members = component.into_iter();
        let Some(representative) = members.next() else {
            continue;
        };
        for member in members {
            map.insert(member, representative.clone());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_graphs;
    use relgraph_core::{Predicate, Relation};

    fn rel(a: &str, b: &str, p: Predicate) -> Relation {
        Relation::new(a, b, p)
    }

    #[test]
    fn representative_is_smallest_member() {
        let graphs = build_graphs(&[
            rel("c", "b", Predicate::Equivalent),
            rel("b", "a", Predicate::Equivalent),
        ]);
        let contracted = contract_equivalent(graphs);
        let edges = contracted.equivalence.edge_pairs();
        assert_eq!(
            edges,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string())
            ]
        );
    }

    #[test]
    fn containment_and_overlap_move_to_representative() {
        let graphs = build_graphs(&[
            rel("A", "B", Predicate::Equivalent),
            rel("B", "C", Predicate::Contains),
            rel("B", "D", Predicate::Overlap),
        ]);
        let contracted = contract_equivalent(graphs);
        assert!(contracted.containment.contains_edge("A", "C"));
        assert!(!contracted.containment.contains_node("B"));
        assert!(contracted.overlap.contains_edge("A", "D"));
        assert!(!contracted.overlap.contains_node("B"));
    }

    #[test]
    fn rewrite_drops_self_loops() {
        let graphs = build_graphs(&[
            rel("A", "B", Predicate::Equivalent),
            rel("A", "B", Predicate::Contains),
            rel("A", "B", Predicate::Overlap),
        ]);
        let contracted = contract_equivalent(graphs);
        assert_eq!(contracted.containment.edge_count(), 0);
        assert_eq!(contracted.overlap.edge_count(), 0);
    }

    #[test]
    fn rewrite_merges_parallel_edges() {
        let graphs = build_graphs(&[
            rel("A", "B", Predicate::Equivalent),
            rel("A", "X", Predicate::Contains),
            rel("B", "X", Predicate::Contains),
        ]);
        let contracted = contract_equivalent(graphs);
        assert_eq!(contracted.containment.edge_count(), 1);
    }

    #[test]
    fn nodes_outside_classes_are_untouched() {
        let graphs = build_graphs(&[rel("P", "Q", Predicate::Contains)]);
        let contracted = contract_equivalent(graphs);
        assert!(contracted.equivalence.is_empty());
        assert!(contracted.containment.contains_edge("P", "Q"));
    }
}
