//! Phase 3: Resolver
//!
//! Turns the syntax tree into a plain [`Value`]. Associative lists become
//! objects, all other lists become arrays. Errors recorded in the document
//! are not re-raised; whatever tree was recovered is resolved as is.

use crate::ast::{Document, List, Node};
use crate::value::{Map, Value};

/// Resolve a parsed document into a value.
#[tracing::instrument(skip_all, fields(entries = document.root.entries.len()))]
pub fn resolve(document: &Document) -> Value {
    resolve_list(&document.root)
}

/// Resolve a single list node.
pub fn resolve_list(list: &List) -> Value {
    if list.associative {
        // A later duplicate key overwrites the earlier value in place.
        let mut obj = Map::with_capacity(list.entries.len());
        for entry in &list.entries {
            if let Some(key) = &entry.key {
                obj.insert(key.value.clone(), resolve_node(&entry.value));
            }
        }
        Value::Object(obj)
    } else {
        Value::Array(
            list.entries
                .iter()
                .map(|entry| resolve_node(&entry.value))
                .collect(),
        )
    }
}

fn resolve_node(node: &Node) -> Value {
    match node {
        Node::List(list) => resolve_list(list),
        Node::String(s) => Value::String(s.clone()),
        Node::Number(n) => Value::Number(*n),
        Node::Boolean(b) => Value::Bool(*b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use crate::scanner::scan;

    fn resolve_source(source: &str) -> Value {
        resolve(&parse_document(&scan(source)))
    }

    #[test]
    fn test_nested_array_in_object() {
        let value = resolve_source("list/\n\t= 1\n\t= 2\n");
        let expected: Value = [(
            "list",
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]),
        )]
        .into_iter()
        .collect();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let value = resolve_source("a: 1\nb: 2\na: 3\n");
        let obj = value.as_object().cloned().unwrap_or_default();
        let pairs: Vec<(&str, &str)> = obj
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap_or_default()))
            .collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_empty_document_is_empty_array() {
        assert_eq!(resolve_source(""), Value::Array(Vec::new()));
        assert_eq!(resolve_source("# only a comment\n"), Value::Array(Vec::new()));
    }

    #[test]
    fn test_partial_tree_skips_unkeyed_entries() {
        let doc = parse_document(&scan("a: 1\n= 2\nb? no\n"));
        assert!(!doc.is_ok());
        let expected: Value = [("a", Value::from("1")), ("b", Value::from(false))]
            .into_iter()
            .collect();
        assert_eq!(resolve(&doc), expected);
    }

    #[test]
    fn test_keyed_entries_in_array_keep_values() {
        let doc = parse_document(&scan("= 1\nb= 2\n"));
        assert_eq!(doc.errors.len(), 1);
        assert_eq!(
            resolve(&doc),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }
}
