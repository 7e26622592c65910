//! Syntax tree produced by the parser.

use crate::error::ParseError;

/// A parsed document: the root list plus every error found along the way.
///
/// `root` is filled in even when errors were reported, holding whatever
/// entries could be recovered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub root: List,
    pub errors: Vec<ParseError>,
}

impl Document {
    /// True when parsing reported no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }
}

/// A block of entries at one indentation depth.
///
/// Whether the list is associative is fixed by its first entry: a keyed
/// first entry makes a map, an unkeyed one a sequence. Empty lists are
/// non-associative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    pub associative: bool,
    pub entries: Vec<Entry>,
}

/// One line of a list, with its optional key.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Option<Key>,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub value: String,
}

impl Key {
    /// Build a key from raw key text. Escapes are resolved first, then
    /// unescaped spaces and tabs are trimmed from both ends.
    pub(crate) fn from_raw(raw: &str) -> Self {
        let mut chars: Vec<(char, bool)> = Vec::with_capacity(raw.len());
        let mut rest = raw.chars();
        while let Some(ch) = rest.next() {
            match ch {
                '\\' => chars.push((rest.next().unwrap_or('\\'), true)),
                ch => chars.push((ch, false)),
            }
        }

        let padding = |&(ch, escaped): &(char, bool)| !escaped && (ch == ' ' || ch == '\t');
        let start = chars.iter().position(|c| !padding(c)).unwrap_or(chars.len());
        let end = chars.iter().rposition(|c| !padding(c)).map_or(start, |i| i + 1);
        let value = chars[start..end].iter().map(|&(ch, _)| ch).collect();
        Self { value }
    }
}

/// The value of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    List(List),
    String(String),
    Number(f64),
    Boolean(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_raw() {
        assert_eq!(Key::from_raw("name ").value, "name");
        assert_eq!(Key::from_raw("a\\:b").value, "a:b");
        assert_eq!(Key::from_raw("\\#tag").value, "#tag");
        assert_eq!(Key::from_raw("back\\\\slash").value, "back\\slash");
        assert_eq!(Key::from_raw("dangling\\").value, "dangling\\");
        assert_eq!(Key::from_raw("  k \t").value, "k");
    }

    #[test]
    fn test_key_keeps_escaped_padding() {
        assert_eq!(Key::from_raw("a\\ ").value, "a ");
        assert_eq!(Key::from_raw("a\\  ").value, "a ");
        assert_eq!(Key::from_raw("\\ a").value, " a");
        assert_eq!(Key::from_raw("\\\t").value, "\t");
        assert_eq!(Key::from_raw("\u{a0}k\u{a0}").value, "\u{a0}k\u{a0}");
    }

    #[test]
    fn test_default_document_is_ok() {
        let doc = Document::default();
        assert!(doc.is_ok());
        assert!(doc.first_error().is_none());
        assert!(!doc.root.associative);
    }
}
