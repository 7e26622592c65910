//! Phase 1: Scanner
//!
//! The scanner converts raw source text into a flat token stream. It knows
//! about indentation and delimiter characters and nothing else:
//! - Leading tabs become one `Indent` token per line (even an empty one)
//! - `#` as the first non-tab character starts a comment
//! - Key text runs up to the first unescaped `:`, `=`, `?` or `/`
//! - The rest of the line after a delimiter is value text
//!
//! Scanning never fails. Whitespace that mixes spaces and tabs before the
//! key becomes an `Error` token; every grammar problem is left to the parser.

use crate::token::{Location, Token, TokenType};

/// Columns a tab advances the column counter by.
pub const TAB_WIDTH: usize = 4;

/// Cursor over the source text tracking byte offset, line and column.
struct Source<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    col: usize,
}

impl<'a> Source<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    fn loc(&self) -> Location {
        Location {
            offset: self.offset,
            line: self.line,
            col: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn is_at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// True at `\n` or at a `\r` that starts a `\r\n` pair.
    fn at_newline(&self) -> bool {
        let rest = &self.text[self.offset..];
        rest.starts_with('\n') || rest.starts_with("\r\n")
    }

    fn at_line_end(&self) -> bool {
        self.is_at_end() || self.at_newline()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        match ch {
            '\n' => {
                self.line += 1;
                self.col = 1;
            }
            '\t' => self.col += TAB_WIDTH,
            _ => self.col += 1,
        }
        Some(ch)
    }

    fn advance_while(&mut self, cond: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !cond(ch) || self.at_newline() {
                break;
            }
            self.advance();
        }
    }

    fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.offset]
    }
}

struct Scanner<'a> {
    source: Source<'a>,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn push(&mut self, typ: TokenType, start: Location) {
        let value = self.source.slice_from(start.offset);
        self.tokens.push(Token::new(typ, value, start));
    }

    /// Scan one logical line including its line break, if any.
    fn scan_line(&mut self) {
        self.scan_indent();
        self.scan_padding();

        if self.source.at_line_end() {
            self.scan_newline();
            return;
        }

        if self.source.peek() == Some('#') {
            let start = self.source.loc();
            self.source.advance_while(|_| true);
            self.push(TokenType::Comment, start);
            self.scan_newline();
            return;
        }

        self.scan_key();

        if let Some(typ) = self.source.peek().and_then(TokenType::delimiter) {
            let start = self.source.loc();
            self.source.advance();
            self.push(typ, start);
            self.source.advance_while(|c| c == ' ' || c == '\t');
            self.scan_value();
        }

        self.scan_newline();
    }

    fn scan_indent(&mut self) {
        let start = self.source.loc();
        self.source.advance_while(|c| c == '\t');
        self.push(TokenType::Indent, start);
    }

    /// Skip spaces between the indent and the key. A tab after a space is
    /// indentation the parser cannot count, so the run becomes an error token.
    fn scan_padding(&mut self) {
        let start = self.source.loc();
        self.source.advance_while(|c| c == ' ' || c == '\t');
        let padding = self.source.slice_from(start.offset);
        if padding.contains('\t') && !self.source.at_line_end() {
            self.push(TokenType::Error, start);
        }
    }

    /// Key text stops at an unescaped delimiter or the end of the line.
    fn scan_key(&mut self) {
        let start = self.source.loc();
        while let Some(ch) = self.source.peek() {
            if self.source.at_newline() || TokenType::delimiter(ch).is_some() {
                break;
            }
            self.source.advance();
            if ch == '\\' && !self.source.at_line_end() {
                self.source.advance();
            }
        }
        if self.source.offset > start.offset {
            self.push(TokenType::Text, start);
        }
    }

    /// Value text is the remainder of the line, taken verbatim.
    fn scan_value(&mut self) {
        if self.source.at_line_end() {
            return;
        }
        let start = self.source.loc();
        self.source.advance_while(|_| true);
        self.push(TokenType::Text, start);
    }

    fn scan_newline(&mut self) {
        if !self.source.at_newline() {
            return;
        }
        let start = self.source.loc();
        if self.source.peek() == Some('\r') {
            self.source.advance();
        }
        self.source.advance();
        self.push(TokenType::Newline, start);
    }
}

/// Scan source text into tokens.
///
/// The result always ends with an `Eof` token, and every line (including an
/// empty last line) starts with an `Indent` token.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn scan(source: &str) -> Vec<Token> {
    let mut scanner = Scanner {
        source: Source::new(source),
        tokens: Vec::new(),
    };

    // A line ends either at its line break or at the end of input.
    loop {
        scanner.scan_line();
        if scanner.tokens.last().map(|t| t.typ) != Some(TokenType::Newline) {
            break;
        }
    }

    let loc = scanner.source.loc();
    scanner.tokens.push(Token::eof(loc));
    scanner.tokens
}
