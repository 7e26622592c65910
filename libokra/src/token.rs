//! Tokens produced by the scanner and consumed by the parser.

/// Token type in the scanner output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Leading tabs of a line (always emitted, possibly empty).
    Indent,
    /// Key text or value text.
    Text,
    /// `:` - string value follows.
    Colon,
    /// `=` - number value follows.
    Equals,
    /// `?` - boolean value follows.
    Question,
    /// `/` - nested list follows on the next lines.
    Slash,
    /// Line break (`\n` or `\r\n`).
    Newline,
    /// `#` comment running to the end of the line.
    Comment,
    /// End of input.
    Eof,
    /// Lexically invalid text (mixed tab/space indentation).
    Error,
}

impl TokenType {
    /// Upper-case name used by tooling and debug output.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Indent => "INDENT",
            TokenType::Text => "TEXT",
            TokenType::Colon => "COLON",
            TokenType::Equals => "EQUALS",
            TokenType::Question => "QUESTION",
            TokenType::Slash => "SLASH",
            TokenType::Newline => "NEWLINE",
            TokenType::Comment => "COMMENT",
            TokenType::Eof => "EOF",
            TokenType::Error => "ERROR",
        }
    }

    /// Map a delimiter character to its token type.
    pub fn delimiter(ch: char) -> Option<TokenType> {
        match ch {
            ':' => Some(TokenType::Colon),
            '=' => Some(TokenType::Equals),
            '?' => Some(TokenType::Question),
            '/' => Some(TokenType::Slash),
            _ => None,
        }
    }

    pub fn is_delimiter(self) -> bool {
        matches!(
            self,
            TokenType::Colon | TokenType::Equals | TokenType::Question | TokenType::Slash
        )
    }
}

/// Position of a token in the source.
///
/// `offset` is a 0-based byte offset, `line` is 1-based and `col` is 1-based
/// with tabs counted as [`TAB_WIDTH`](crate::TAB_WIDTH) columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            col: 1,
        }
    }
}

/// A single token in the token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub typ: TokenType,
    /// Raw source text covered by the token.
    pub value: String,
    pub loc: Location,
}

impl Token {
    pub fn new(typ: TokenType, value: &str, loc: Location) -> Self {
        Self {
            typ,
            value: value.to_string(),
            loc,
        }
    }

    pub(crate) fn eof(loc: Location) -> Self {
        Self::new(TokenType::Eof, "", loc)
    }

    /// Human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self.typ {
            TokenType::Indent => "indentation".to_string(),
            TokenType::Text => format!("text \"{}\"", self.value),
            TokenType::Newline => "line break".to_string(),
            TokenType::Comment => "comment".to_string(),
            TokenType::Eof => "end of input".to_string(),
            TokenType::Colon
            | TokenType::Equals
            | TokenType::Question
            | TokenType::Slash
            | TokenType::Error => format!("\"{}\"", self.value.escape_debug()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_lookup() {
        assert_eq!(TokenType::delimiter(':'), Some(TokenType::Colon));
        assert_eq!(TokenType::delimiter('/'), Some(TokenType::Slash));
        assert_eq!(TokenType::delimiter('#'), None);
        assert!(TokenType::Question.is_delimiter());
        assert!(!TokenType::Text.is_delimiter());
    }

    #[test]
    fn test_describe() {
        let loc = Location::default();
        assert_eq!(Token::new(TokenType::Newline, "\n", loc).describe(), "line break");
        assert_eq!(Token::new(TokenType::Text, "abc", loc).describe(), "text \"abc\"");
        assert_eq!(Token::new(TokenType::Error, " \t", loc).describe(), "\" \\t\"");
        assert_eq!(Token::eof(loc).describe(), "end of input");
    }
}
