//! Property-based tests: stringify/parse round trips and scanner totality.

use libokra::{parse, parse_document, scan, stringify, Map, TokenType, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "([a-zA-Z0-9#:=?/\\\\.\u{a0}\u{3000}-][a-zA-Z0-9 #:=?/\\\\.\t-]{0,12})?"
            .prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
        prop::num::f64::NORMAL.prop_map(Value::Number),
        (-1000i32..1000).prop_map(Value::from),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[ \t]?[a-zA-Z_#:=?/\\\\]([a-zA-Z0-9_ #:=?/\\\\-]{0,8}[a-zA-Z0-9_# \t])?"
}

/// Collections are never empty: an empty object reads back as an array.
fn collection(inner: impl Strategy<Value = Value> + Clone) -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(inner.clone(), 1..5).prop_map(Value::Array),
        prop::collection::vec((key(), inner), 1..5)
            .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map>())),
    ]
}

fn document() -> impl Strategy<Value = Value> {
    let tree = scalar().prop_recursive(4, 32, 5, |inner| collection(inner));
    collection(tree)
}

proptest! {
    #[test]
    fn prop_stringify_then_parse(value in document()) {
        let text = stringify(&value).unwrap();
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "{:?} failed to parse: {:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap(), value);
    }

    #[test]
    fn prop_stringify_indents_with_tabs_only(value in document()) {
        let text = stringify(&value).unwrap();
        for line in text.lines() {
            prop_assert!(!line.starts_with(' '), "line {:?} starts with a space", line);
        }
    }

    #[test]
    fn prop_scan_is_total(source in "[a-z \t:=?/#\\\\\r\n]{0,64}") {
        let tokens = scan(&source);
        prop_assert_eq!(tokens.last().map(|t| t.typ), Some(TokenType::Eof));
        prop_assert_eq!(tokens[0].typ, TokenType::Indent);

        // Only padding whitespace is dropped between tokens.
        let rebuilt: String = tokens.iter().map(|t| t.value.as_str()).collect();
        let skipped = source.chars().filter(|c| *c == ' ' || *c == '\t').count()
            - rebuilt.chars().filter(|c| *c == ' ' || *c == '\t').count();
        prop_assert_eq!(rebuilt.len() + skipped, source.len());

        let mut last = 0;
        for token in &tokens {
            prop_assert!(token.loc.offset >= last);
            last = token.loc.offset;
        }
    }

    #[test]
    fn prop_parse_never_panics(source in "[a-z \t:=?/#\\\\\n]{0,64}") {
        let document = parse_document(&scan(&source));
        for error in &document.errors {
            prop_assert!(error.line() >= 1 && error.col() >= 1);
        }
    }
}
