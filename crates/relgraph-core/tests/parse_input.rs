//! Relation and context parsing against generated input.

use proptest::prelude::*;
use relgraph_core::context::parse_context;
use relgraph_core::parser::parse_relations;
use relgraph_core::{Predicate, Relation, RelationError};

fn arb_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9*._-]{1,8}"
}

fn arb_relation() -> impl Strategy<Value = Relation> {
    (arb_id(), arb_id(), prop::sample::select(Predicate::ALL.to_vec()))
        .prop_map(|(left, right, predicate)| Relation::new(left, right, predicate))
}

/// Render a relation with varied spacing, case and trailing fields.
fn render_line(relation: &Relation, style: u8) -> String {
    let token = relation.predicate.as_str();
    match style % 4 {
        0 => format!("{} {} {}", relation.left, relation.right, token),
        1 => format!("\t{}\t\t{}  {}  ", relation.left, relation.right, token.to_uppercase()),
        2 => format!("{} {} {} 0.97 extra", relation.left, relation.right, token),
        _ => format!("  {}   {}\t{}\r", relation.left, relation.right, token),
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn rendered_relations_parse_back(
        relations in prop::collection::vec((arb_relation(), any::<u8>()), 0..32),
        blank_every in 2usize..6,
    ) {
        let mut text = String::new();
        for (i, (relation, style)) in relations.iter().enumerate() {
            if i % blank_every == 0 {
                text.push_str("   \n");
            }
            text.push_str(&render_line(relation, *style));
            text.push('\n');
        }

        let parsed = parse_relations(text.as_bytes()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected: Vec<Relation> = relations.into_iter().map(|(r, _)| r).collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn first_bad_line_aborts_the_read(
        good in prop::collection::vec(arb_relation(), 0..8),
        bad in "[a-z]{1,6} [a-z]{1,6} nonsense[a-z]{0,4}",
    ) {
        let mut text: String = good.iter().map(|r| render_line(r, 0) + "\n").collect();
        text.push_str(&bad);
        text.push('\n');
        text.push_str("a b contains\n");

        match parse_relations(text.as_bytes()) {
            Err(RelationError::UnknownPredicate { line, .. }) => prop_assert_eq!(line, good.len() + 1),
            other => prop_assert!(false, "expected unknown predicate, got {:?}", other),
        }
    }

    #[test]
    fn context_is_a_trimmed_set(ids in prop::collection::vec(arb_id(), 0..16)) {
        let text: String = ids.iter().map(|id| format!("  {id}\t\n\n")).collect();
        let context = parse_context(text.as_bytes()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected: std::collections::BTreeSet<String> = ids.into_iter().collect();
        prop_assert_eq!(context, expected);
    }
}

#[test]
fn short_line_reports_its_number() {
    let err = parse_relations("a b contains\n\nc d\n".as_bytes()).expect_err("short line");
    match err {
        RelationError::MalformedInputLine { line, content } => {
            assert_eq!(line, 3);
            assert_eq!(content, "c d");
        }
        other => panic!("unexpected error: {other}"),
    }
}
