//! Phase 2: Parser
//!
//! The parser walks the token stream with a cursor and builds a [`Document`].
//! It tracks the indentation depth of the list being parsed; a line indented
//! less than that depth belongs to an ancestor, so its `Indent` token is
//! handed back and the nested list returns.
//!
//! Parsing never aborts. Each failure is recorded and the rest of the
//! offending line is skipped, so one pass reports every independent problem.

use std::borrow::Cow;

use crate::ast::{Document, Entry, Key, List, Node};
use crate::error::{ParseError, Result};
use crate::token::{Token, TokenType};

/// Parse a token stream into a document.
///
/// The stream is expected to end with an `Eof` token, as produced by
/// [`scan`](crate::scan); one is appended if it is missing.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_document(tokens: &[Token]) -> Document {
    let mut parser = Parser::new(tokens);
    let root = parser.parse_list(0);
    tracing::debug!(
        entries = root.entries.len(),
        errors = parser.errors.len(),
        "parsed document"
    );
    Document {
        root,
        errors: parser.errors,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListMode {
    Unknown,
    Associative,
    NotAssociative,
}

/// Outcome of parsing one line of a list.
enum Line {
    Entry(Entry),
    Blank,
    Dedent,
}

struct Parser<'t> {
    tokens: Cow<'t, [Token]>,
    offset: usize,
    errors: Vec<ParseError>,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        let tokens = match tokens.last() {
            Some(last) if last.typ == TokenType::Eof => Cow::Borrowed(tokens),
            last => {
                let loc = last.map(|t| t.loc).unwrap_or_default();
                let mut owned = tokens.to_vec();
                owned.push(Token::eof(loc));
                Cow::Owned(owned)
            }
        };
        Self {
            tokens,
            offset: 0,
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.offset.min(last)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().typ == TokenType::Eof
    }

    /// Consume the current token. The cursor never moves past `Eof`.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.offset += 1;
        }
        token
    }

    /// Hand the previous token back to the stream.
    fn backup(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    fn expect(&mut self, typ: TokenType, expected: &str) -> Result<Token> {
        if self.peek().typ != typ {
            return Err(ParseError::unexpected(self.peek(), expected));
        }
        Ok(self.advance())
    }

    /// Consume the line break ending an entry, unless input ends here.
    fn end_of_line(&mut self) -> Result<()> {
        if !self.is_at_end() {
            self.expect(TokenType::Newline, "expected line break after value")?;
        }
        Ok(())
    }

    /// Discard the rest of the current line, including its line break.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.advance().typ == TokenType::Newline {
                break;
            }
        }
    }

    fn parse_list(&mut self, depth: usize) -> List {
        let mut entries = Vec::new();
        let mut mode = ListMode::Unknown;

        while !self.is_at_end() {
            match self.parse_line(depth, &mut mode) {
                Ok(Line::Entry(entry)) => entries.push(entry),
                Ok(Line::Blank) => {}
                Ok(Line::Dedent) => break,
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }

        List {
            associative: mode == ListMode::Associative,
            entries,
        }
    }

    fn parse_line(&mut self, depth: usize, mode: &mut ListMode) -> Result<Line> {
        let indent = self.expect(TokenType::Indent, "expected indentation at start of line")?;

        match self.peek().typ {
            TokenType::Newline => {
                self.advance();
                return Ok(Line::Blank);
            }
            TokenType::Eof => return Ok(Line::Blank),
            TokenType::Comment => {
                self.advance();
                self.end_of_line()?;
                return Ok(Line::Blank);
            }
            _ => {}
        }

        let actual = indent.value.chars().count();
        if actual < depth {
            self.backup();
            return Ok(Line::Dedent);
        }
        if self.peek().typ == TokenType::Error {
            return Err(ParseError::mixed_indent(self.peek()));
        }
        if actual > depth {
            return Err(ParseError::invalid_indent(&indent, depth, actual));
        }

        // A conflict is reported before the value is parsed, so errors from
        // a nested block follow it. A line that fails to parse leaves an
        // unknown mode unset.
        let first = self.peek().clone();
        let keyed = first.typ == TokenType::Text;
        let conflict = match *mode {
            ListMode::Associative => !keyed,
            ListMode::NotAssociative => keyed,
            ListMode::Unknown => false,
        };
        if conflict {
            self.errors.push(ParseError::mixed_entries(&first));
        }

        let entry = self.parse_entry(depth)?;
        if *mode == ListMode::Unknown {
            *mode = if keyed {
                ListMode::Associative
            } else {
                ListMode::NotAssociative
            };
        }
        Ok(Line::Entry(entry))
    }

    fn parse_entry(&mut self, depth: usize) -> Result<Entry> {
        let key = if self.peek().typ == TokenType::Text {
            Some(Key::from_raw(&self.advance().value))
        } else {
            None
        };

        let value = match self.peek().typ {
            TokenType::Colon => {
                self.advance();
                self.parse_string()?
            }
            TokenType::Equals => {
                self.advance();
                self.parse_number()?
            }
            TokenType::Question => {
                self.advance();
                self.parse_boolean()?
            }
            TokenType::Slash => {
                self.advance();
                self.parse_nested_list(depth)
            }
            _ => {
                let position = if key.is_some() {
                    "after key"
                } else {
                    "before value"
                };
                return Err(ParseError::unexpected(
                    self.peek(),
                    &format!(
                        "expected delimiter {} (\":\", \"=\", \"?\", or \"/\")",
                        position
                    ),
                ));
            }
        };

        Ok(Entry { key, value })
    }

    /// An absent value is the empty string.
    fn parse_string(&mut self) -> Result<Node> {
        let value = if self.peek().typ == TokenType::Text {
            self.advance().value
        } else {
            String::new()
        };
        self.end_of_line()?;
        Ok(Node::String(value))
    }

    fn parse_number(&mut self) -> Result<Node> {
        let token = self.expect(TokenType::Text, "expected number value after \"=\"")?;
        if !is_number_literal(&token.value) {
            return Err(ParseError::invalid_number(&token));
        }
        let value = token
            .value
            .parse::<f64>()
            .map_err(|_| ParseError::invalid_number(&token))?;
        self.end_of_line()?;
        Ok(Node::Number(value))
    }

    fn parse_boolean(&mut self) -> Result<Node> {
        let token = self.expect(TokenType::Text, "expected boolean value after \"?\"")?;
        let value = match token.value.to_lowercase().as_str() {
            "true" | "yes" | "y" => true,
            "false" | "no" | "n" => false,
            _ => return Err(ParseError::invalid_boolean(&token)),
        };
        self.end_of_line()?;
        Ok(Node::Boolean(value))
    }

    /// A value on the same line as `/` is reported and skipped; the block
    /// below is still parsed.
    fn parse_nested_list(&mut self, depth: usize) -> Node {
        if !self.is_at_end() {
            if let Err(error) = self.expect(TokenType::Newline, "expected line break after \"/\"")
            {
                self.errors.push(error);
                self.synchronize();
            }
        }
        Node::List(self.parse_list(depth + 1))
    }
}

/// Matches `[+-]?\d+(\.\d+)?([eE][+-]?\d+)?`.
fn is_number_literal(s: &str) -> bool {
    fn digits(bytes: &[u8], mut i: usize) -> usize {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    }

    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let end = digits(bytes, i);
    if end == i {
        return false;
    }
    i = end;

    if i < bytes.len() && bytes[i] == b'.' {
        let end = digits(bytes, i + 1);
        if end == i + 1 {
            return false;
        }
        i = end;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let end = digits(bytes, i);
        if end == i {
            return false;
        }
        i = end;
    }

    i == bytes.len()
}
