#![no_main]

use libfuzzer_sys::fuzz_target;
use relgraph_core::parser::parse_relations;
use relgraph_core::{ContextSet, NodeTable, Relation};
use relgraph_graph::{render_dot, simplify};

fuzz_target!(|data: &[u8]| {
    let Ok(relations) = parse_relations(data) else {
        return;
    };

    let forward = simplify(&relations, &ContextSet::new())
        .map(|(graphs, _)| render_dot(&graphs, &NodeTable::new(), &ContextSet::new()));

    let flipped: Vec<Relation> = relations.iter().rev().map(Relation::converse).collect();
    let backward = simplify(&flipped, &ContextSet::new())
        .map(|(graphs, _)| render_dot(&graphs, &NodeTable::new(), &ContextSet::new()));

    assert_eq!(forward, backward);
});
