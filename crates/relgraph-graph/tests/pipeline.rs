//! Known-topology regression tests for the full pipeline.
//!
//! Each test feeds a hand-written relation list through `simplify` and
//! checks the exact graphs or DOT text that comes out.

use relgraph_core::parser::parse_relations;
use relgraph_core::{ContextSet, NodeAttributes, NodeTable, Predicate, Relation};
use relgraph_graph::export::{export_relations, node_table};
use relgraph_graph::{GraphError, render_dot, simplify};

fn relations(text: &str) -> Vec<Relation> {
    parse_relations(text.as_bytes()).expect("valid relation text")
}

fn context(ids: &[&str]) -> ContextSet {
    ids.iter().map(|s| (*s).to_string()).collect()
}

fn pairs(edges: &[(&str, &str)]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
        .collect()
}

const SCENARIO: &str = "\
A B equivalent
A C contains
B D overlap
C D overlap
X Y disjoint
";

#[test]
fn scenario_graphs() {
    let (graphs, _) = simplify(&relations(SCENARIO), &ContextSet::new()).expect("simplify");

    assert_eq!(graphs.equivalence.edge_pairs(), pairs(&[("A", "B")]));
    assert_eq!(graphs.containment.edge_pairs(), pairs(&[("A", "C")]));
    // D overlaps both A and C. A contains C, so only D-C is kept.
    assert_eq!(graphs.overlap.edge_pairs(), pairs(&[("C", "D")]));
    assert!(!graphs.node_ids().contains("X"));
}

#[test]
fn scenario_dot_output() {
    let (graphs, _) = simplify(&relations(SCENARIO), &ContextSet::new()).expect("simplify");

    let mut metadata = NodeTable::new();
    metadata.insert("A", NodeAttributes::new("*1", "green"));
    metadata.insert("C", NodeAttributes::new("*4", "red"));

    let dot = render_dot(&graphs, &metadata, &ContextSet::new());
    assert_eq!(
        dot,
        "digraph {
\"A\" [color=\"green\",label=\"*1\"];
\"B\" [];
\"C\" [color=\"red\",label=\"*4\"];
\"D\" [];
\"B\" -> \"A\" [arrowsize=0, color=\"black:invis:black\"];
\"A\" -> \"C\";
\"D\" -> \"C\" [arrowsize=0, style=dashed];
}
"
    );
}

#[test]
fn context_forces_unconnected_nodes_into_table() {
    let ctx = context(&["X"]);
    let (graphs, _) = simplify(&relations(SCENARIO), &ctx).expect("simplify");
    assert!(graphs.node_ids().is_empty());

    let dot = render_dot(&graphs, &NodeTable::new(), &ctx);
    assert_eq!(dot, "digraph {\n\"X\" [];\n}\n");
}

#[test]
fn context_pulls_in_containers_and_equivalents() {
    let ctx = context(&["C"]);
    let (graphs, _) = simplify(&relations(SCENARIO), &ctx).expect("simplify");

    let ids: Vec<String> = graphs.node_ids().into_iter().collect();
    assert_eq!(ids, vec!["A", "B", "C", "D"]);
}

#[test]
fn input_order_does_not_change_output() {
    let forward = relations(SCENARIO);
    let mut backward: Vec<Relation> = forward.iter().map(Relation::converse).collect();
    backward.reverse();

    let render = |rels: &[Relation]| {
        let (graphs, _) = simplify(rels, &ContextSet::new()).expect("simplify");
        render_dot(&graphs, &NodeTable::new(), &ContextSet::new())
    };
    assert_eq!(render(&forward), render(&backward));
}

#[test]
fn allele_hierarchy_reduces_to_direct_containment() {
    // *4 restates every pair it reaches through *2.
    let text = "\
*4 *2 contains
*4 v1 contains
*4 v2 contains
*4 v3 contains
*2 v1 contains
*2 v2 contains
v3 *4 is_contained
";
    let (graphs, _) = simplify(&relations(text), &ContextSet::new()).expect("simplify");
    assert_eq!(
        graphs.containment.edge_pairs(),
        pairs(&[("*2", "v1"), ("*2", "v2"), ("*4", "*2"), ("*4", "v3")])
    );
}

#[test]
fn equivalent_alleles_share_one_node() {
    let text = "\
*10 *10x2 equivalent
*10x2 *36 equivalent
*10 v7 contains
*36 v8 contains
*10x2 v9 overlap
";
    let (graphs, _) = simplify(&relations(text), &ContextSet::new()).expect("simplify");

    assert_eq!(
        graphs.equivalence.edge_pairs(),
        pairs(&[("*10", "*10x2"), ("*10", "*36")])
    );
    assert_eq!(
        graphs.containment.edge_pairs(),
        pairs(&[("*10", "v7"), ("*10", "v8")])
    );
    assert_eq!(graphs.overlap.edge_pairs(), pairs(&[("*10", "v9")]));
}

#[test]
fn overlap_between_siblings_is_suppressed() {
    let text = "\
P a contains
P b contains
a b overlap
a q overlap
";
    let (graphs, _) = simplify(&relations(text), &ContextSet::new()).expect("simplify");
    assert_eq!(graphs.overlap.edge_pairs(), pairs(&[("a", "q")]));
}

#[test]
fn exported_relations_are_typed() {
    let (graphs, _) = simplify(&relations(SCENARIO), &ContextSet::new()).expect("simplify");
    let exported = export_relations(&graphs);
    assert_eq!(
        exported,
        vec![
            Relation::new("A", "B", Predicate::Equivalent),
            Relation::new("A", "C", Predicate::Contains),
            Relation::new("C", "D", Predicate::Overlap),
        ]
    );

    let table = node_table(&graphs, &NodeTable::new(), &context(&["Z"]));
    assert!(table.contains("Z"));
    assert_eq!(table.len(), 5);
}

#[test]
fn inconsistent_containment_is_rejected() {
    let text = "\
A C contains
C B contains
A B equivalent
";
    let err = simplify(&relations(text), &ContextSet::new()).expect_err("cycle");
    assert!(matches!(err, GraphError::ContainmentCycle { .. }));
}
