//! Cycle detection for the containment graph.
//!
//! Containment is assumed to be acyclic. Equivalence contraction can still
//! close a cycle when the upstream comparison is inconsistent (for example
//! `A ⊃ C`, `C ⊃ B` and `A ≡ B`), so the pipeline checks before reducing.

use petgraph::algo::tarjan_scc;
use relgraph_core::NodeId;
use tracing::warn;

use crate::error::GraphError;
use crate::graph::ContainmentGraph;

/// Find all cycles currently present in `graph`.
///
/// Each entry is the sorted member list of one strongly connected component
/// with more than one node. Entries are sorted. Self-loops cannot occur since
/// [`ContainmentGraph`] drops them on construction.
#[must_use]
pub fn find_all_cycles(graph: &ContainmentGraph) -> Vec<Vec<NodeId>> {
    let inner = graph.inner();
    let mut cycles: Vec<Vec<NodeId>> = tarjan_scc(inner)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| {
            let mut ids: Vec<NodeId> = component.into_iter().map(|idx| inner[idx].clone()).collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

/// Fail with [`GraphError::ContainmentCycle`] if `graph` is not a DAG.
///
/// # Errors
///
/// Returns the first cycle (in sorted order) when any exists.
pub fn check_acyclic(graph: &ContainmentGraph) -> Result<(), GraphError> {
    let cycles = find_all_cycles(graph);
    if cycles.len() > 1 {
        warn!(count = cycles.len(), "multiple containment cycles");
    }
    match cycles.into_iter().next() {
        Some(members) => Err(GraphError::ContainmentCycle { members }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> ContainmentGraph {
        ContainmentGraph::from_edges(
            edges
                .iter()
                .map(|(a, b)| ((*a).to_string(), (*b).to_string())),
        )
    }

    #[test]
    fn dag_has_no_cycles() {
        let g = graph(&[("a", "b"), ("b", "c"), ("a", "c")]);
        assert!(find_all_cycles(&g).is_empty());
        assert!(check_acyclic(&g).is_ok());
    }

    #[test]
    fn two_node_cycle_reported_sorted() {
        let g = graph(&[("b", "a"), ("a", "b"), ("b", "c")]);
        assert_eq!(find_all_cycles(&g), vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn check_acyclic_returns_first_cycle() {
        let g = graph(&[("x", "y"), ("y", "x"), ("b", "c"), ("c", "a"), ("a", "b")]);
        let err = check_acyclic(&g).expect_err("cyclic");
        assert_eq!(
            err,
            GraphError::ContainmentCycle {
                members: vec!["a".to_string(), "b".to_string(), "c".to_string()]
            }
        );
        assert_eq!(err.to_string(), "containment cycle between a, b, c");
    }
}
