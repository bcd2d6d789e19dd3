#![no_main]

use libfuzzer_sys::fuzz_target;
use relgraph_core::RelationError;
use relgraph_core::parser::parse_line;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    match parse_line(line, 1) {
        Ok(None) => assert!(line.split_ascii_whitespace().next().is_none()),
        Ok(Some(relation)) => {
            let mut fields = line.split_ascii_whitespace();
            assert_eq!(fields.next(), Some(relation.left.as_str()));
            assert_eq!(fields.next(), Some(relation.right.as_str()));
        }
        Err(RelationError::MalformedInputLine { line: 1, .. })
        | Err(RelationError::UnknownPredicate { line: 1, .. }) => {}
        Err(other) => panic!("unexpected error kind: {other}"),
    }
});
