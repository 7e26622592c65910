//! Error types for Okra parsing and stringifying.

use std::fmt;

use thiserror::Error;

use crate::token::{Token, TokenType};

/// Result type for Okra parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken,
    /// Input ended in the middle of an entry.
    UnexpectedEof,
    /// Indentation deeper than the enclosing list allows, or not made of tabs.
    InvalidIndent,
    /// Value after `?` is not a boolean literal.
    InvalidBoolean,
    /// Value after `=` is not a number literal.
    InvalidNumber,
    /// Keyed and unkeyed entries in the same list.
    MixedListEntries,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnexpectedToken => "UNEXPECTED_TOKEN",
            ErrorCode::UnexpectedEof => "UNEXPECTED_EOF",
            ErrorCode::InvalidIndent => "INVALID_INDENT",
            ErrorCode::InvalidBoolean => "INVALID_BOOLEAN",
            ErrorCode::InvalidNumber => "INVALID_NUMBER",
            ErrorCode::MixedListEntries => "MIXED_LIST_ENTRIES",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A syntax error collected while parsing a document.
///
/// The offending token is kept so that callers can point at the exact
/// line and column.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub token: Token,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, token: &Token) -> Self {
        Self {
            code,
            message: message.into(),
            token: token.clone(),
        }
    }

    /// A token other than the one the grammar expects.
    pub(crate) fn unexpected(token: &Token, expected: &str) -> Self {
        let code = if token.typ == TokenType::Eof {
            ErrorCode::UnexpectedEof
        } else {
            ErrorCode::UnexpectedToken
        };
        Self::new(
            code,
            format!("unexpected {}; {}", token.describe(), expected),
            token,
        )
    }

    pub(crate) fn invalid_indent(token: &Token, expected: usize, actual: usize) -> Self {
        Self::new(
            ErrorCode::InvalidIndent,
            format!(
                "invalid indentation; expected {} but found {}",
                tabs(expected),
                tabs(actual)
            ),
            token,
        )
    }

    pub(crate) fn mixed_indent(token: &Token) -> Self {
        Self::new(
            ErrorCode::InvalidIndent,
            "invalid indentation; lines must be indented with tabs only",
            token,
        )
    }

    pub(crate) fn invalid_number(token: &Token) -> Self {
        Self::new(
            ErrorCode::InvalidNumber,
            format!(
                "\"{}\" is not a valid number value; must be an integer (ex. \"3\"), a float (ex. \"-0.5\"), or a scientific form (ex. \"2.1e10\")",
                token.value
            ),
            token,
        )
    }

    pub(crate) fn invalid_boolean(token: &Token) -> Self {
        Self::new(
            ErrorCode::InvalidBoolean,
            format!(
                "\"{}\" is not a valid boolean value; must be one of \"true\", \"false\", \"yes\", \"no\", \"y\", or \"n\" (case-insensitive)",
                token.value
            ),
            token,
        )
    }

    pub(crate) fn mixed_entries(token: &Token) -> Self {
        Self::new(
            ErrorCode::MixedListEntries,
            "cannot mix keyed and non-keyed entries in the same list",
            token,
        )
    }

    /// 1-based line of the offending token.
    pub fn line(&self) -> usize {
        self.token.loc.line
    }

    /// 1-based column of the offending token.
    pub fn col(&self) -> usize {
        self.token.loc.col
    }
}

fn tabs(n: usize) -> String {
    format!("{} {}", n, if n == 1 { "tab" } else { "tabs" })
}

/// Error for values that have no Okra representation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StringifyError {
    /// Documents are lists; a bare scalar cannot be the root.
    #[error("{0} cannot be converted to Okra; the root must be an array or object")]
    ScalarRoot(&'static str),

    /// NaN and infinities have no literal form.
    #[error("{0} cannot be converted to Okra; numbers must be finite")]
    NonFiniteNumber(f64),

    /// Strings must fit on one line.
    #[error("{0:?} cannot be converted to Okra; strings cannot contain line breaks")]
    MultilineString(String),

    /// Spaces and tabs after a delimiter are dropped by the scanner.
    #[error("{0:?} cannot be converted to Okra; strings cannot start with a space or tab")]
    LeadingWhitespace(String),

    /// Keys must be non-empty and fit on one line.
    #[error("key {0:?} cannot be converted to Okra")]
    InvalidKey(String),
}
