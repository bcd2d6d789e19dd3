//! Overlap pruning.
//!
//! Overlap edges are only worth drawing when containment does not already
//! explain them. Two passes run in order:
//!
//! 1. [`overlap_without_common_ancestor`] drops an edge when both endpoints
//!    have containers and share at least one.
//! 2. [`most_specific_overlap`] drops an edge `(n, t)` when `n` also overlaps
//!    a node that `t` contains, then removes nodes left without edges.
//!
//! Both passes only ever remove edges.

use std::collections::{BTreeSet, HashMap, HashSet};

use relgraph_core::NodeId;
use tracing::{debug, instrument};

use crate::graph::{ContainmentGraph, OverlapGraph};

/// Run both overlap passes in order.
#[must_use]
pub fn filter_overlap(containment: &ContainmentGraph, overlap: &OverlapGraph) -> OverlapGraph {
    let selected = overlap_without_common_ancestor(containment, overlap);
    most_specific_overlap(containment, &selected)
}

/// Pass A: drop overlap edges whose endpoints share a container.
///
/// An edge survives if either endpoint has no containment ancestors or the
/// two ancestor sets are disjoint. The result holds only surviving edges and
/// their endpoints.
#[must_use]
#[instrument(skip_all, fields(edges = overlap.edge_count()))]
pub fn overlap_without_common_ancestor(
    containment: &ContainmentGraph,
    overlap: &OverlapGraph,
) -> OverlapGraph {
    let ancestors: HashMap<&str, BTreeSet<NodeId>> = containment
        .nodes()
        .filter_map(|node| {
            let found = containment.ancestors(node);
            (!found.is_empty()).then_some((node, found))
        })
        .collect();

    let selected = OverlapGraph::from_edges(
        overlap
            .edges()
            .filter(|(lhs, rhs)| match (ancestors.get(lhs), ancestors.get(rhs)) {
                (Some(a), Some(b)) => a.is_disjoint(b),
                _ => true,
            })
            .map(|(lhs, rhs)| (lhs.to_string(), rhs.to_string())),
    );

    debug!(
        removed = overlap.edge_count() - selected.edge_count(),
        "dropped overlap with common ancestor"
    );
    selected
}

/// Pass B: keep only the most specific overlap per node.
///
/// For a node `n` with overlap targets `ti` and `tj` that are both in the
/// containment graph, if `ti` is an ancestor of `tj` the edge `(n, ti)` is
/// dropped. Targets unrelated by containment are left alone. All removals
/// are decided against the input graph, then applied at once; nodes left
/// without edges are removed.
#[must_use]
#[instrument(skip_all, fields(edges = overlap.edge_count()))]
pub fn most_specific_overlap(containment: &ContainmentGraph, overlap: &OverlapGraph) -> OverlapGraph {
    let mut to_remove: HashSet<(NodeId, NodeId)> = HashSet::new();

    for node in overlap.nodes() {
        let targets: Vec<&str> = overlap
            .neighbors(node)
            .into_iter()
            .filter(|t| containment.contains_node(t))
            .collect();

        for (i, lhs) in targets.iter().enumerate() {
            for rhs in &targets[i + 1..] {
                if containment.reaches(lhs, rhs) {
                    to_remove.insert((node.to_string(), (*lhs).to_string()));
                } else if containment.reaches(rhs, lhs) {
                    to_remove.insert((node.to_string(), (*rhs).to_string()));
                }
            }
        }
    }

    let pruned = overlap.without_edges(&to_remove).without_isolates();
    debug!(
        removed = overlap.edge_count() - pruned.edge_count(),
        "kept most specific overlap"
    );
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(edges: &[(&str, &str)]) -> Vec<(NodeId, NodeId)> {
        edges
            .iter()
            .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
            .collect()
    }

    fn containment(edges: &[(&str, &str)]) -> ContainmentGraph {
        ContainmentGraph::from_edges(owned(edges))
    }

    fn overlap(edges: &[(&str, &str)]) -> OverlapGraph {
        OverlapGraph::from_edges(owned(edges))
    }

    #[test]
    fn shared_container_suppresses_overlap() {
        let c = containment(&[("P", "x"), ("P", "y")]);
        let o = overlap(&[("x", "y")]);
        let selected = overlap_without_common_ancestor(&c, &o);
        assert_eq!(selected.edge_count(), 0);
        assert!(selected.is_empty());
    }

    #[test]
    fn disjoint_ancestry_keeps_overlap() {
        let c = containment(&[("P", "x"), ("Q", "y")]);
        let o = overlap(&[("x", "y")]);
        assert_eq!(overlap_without_common_ancestor(&c, &o).edge_count(), 1);
    }

    #[test]
    fn endpoint_without_container_keeps_overlap() {
        let c = containment(&[("P", "x"), ("y", "z")]);
        let o = overlap(&[("x", "y"), ("x", "q")]);
        let selected = overlap_without_common_ancestor(&c, &o);
        assert_eq!(selected.edge_count(), 2);
    }

    #[test]
    fn transitive_common_ancestor_counts() {
        let c = containment(&[("R", "P"), ("P", "x"), ("R", "y")]);
        let o = overlap(&[("x", "y")]);
        assert_eq!(overlap_without_common_ancestor(&c, &o).edge_count(), 0);
    }

    #[test]
    fn ancestor_target_dropped_for_descendant() {
        // n overlaps both T and its descendant t; keep only n-t.
        let c = containment(&[("T", "t")]);
        let o = overlap(&[("n", "T"), ("n", "t")]);
        let pruned = most_specific_overlap(&c, &o);
        assert_eq!(pruned.edge_pairs(), owned(&[("n", "t")]));
    }

    #[test]
    fn unrelated_targets_both_survive() {
        let c = containment(&[("T", "a"), ("U", "b")]);
        let o = overlap(&[("n", "T"), ("n", "U")]);
        assert_eq!(most_specific_overlap(&c, &o).edge_count(), 2);
    }

    #[test]
    fn targets_outside_containment_are_ignored() {
        let c = containment(&[("T", "a")]);
        let o = overlap(&[("n", "T"), ("n", "free")]);
        assert_eq!(most_specific_overlap(&c, &o).edge_count(), 2);
    }

    #[test]
    fn isolated_nodes_are_removed() {
        let c = containment(&[("T", "t")]);
        let o = overlap(&[("n", "T"), ("n", "t"), ("T", "z")]);
        let pruned = most_specific_overlap(&c, &o);
        assert!(!pruned.contains_edge("n", "T"));
        assert!(pruned.contains_node("T"), "T still overlaps z");

        let o = overlap(&[("n", "T"), ("n", "t")]);
        let pruned = most_specific_overlap(&c, &o);
        assert!(!pruned.contains_node("T"), "T lost its only edge");
    }

    #[test]
    fn filter_never_adds_edges() {
        let c = containment(&[("A", "B"), ("B", "C")]);
        let o = overlap(&[("B", "X"), ("C", "X"), ("A", "Y"), ("X", "Y")]);
        let filtered = filter_overlap(&c, &o);
        for (a, b) in filtered.edges() {
            assert!(o.contains_edge(a, b));
        }
        assert!(filtered.edge_count() <= o.edge_count());
    }
}
