//! Okra parser and stringifier.
//!
//! Okra is a line-oriented, tab-indented data format. Every line is one
//! entry: an optional key, a delimiter that fixes the value's type, and the
//! value itself.
//!
//! ```text
//! name: okra
//! version= 1.5
//! stable? yes
//! tags/
//! 	: fast
//! 	: small
//! ```
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: Converts source text into a flat token stream. Every line
//!    starts with an indentation token; the stream always ends with `Eof`.
//!
//! 2. **Parser**: Builds a syntax tree of lists and entries, recording errors
//!    and recovering at the next line.
//!
//! 3. **Resolver**: Turns the tree into a [`Value`]: associative lists become
//!    objects, other lists become arrays.
//!
//! [`stringify`] goes the other way.

pub mod ast;
mod error;
mod parser;
pub mod printer;
mod resolver;
mod scanner;
mod stringifier;
mod token;
mod value;

pub use ast::{Document, Entry, Key, List, Node};
pub use error::{ErrorCode, ParseError, Result, StringifyError};
pub use parser::parse_document;
pub use resolver::{resolve, resolve_list};
pub use scanner::{scan, TAB_WIDTH};
pub use stringifier::{format_number, stringify};
pub use token::{Location, Token, TokenType};
pub use value::{Map, Value};

/// Parse an Okra document into a value.
///
/// Fails with the first recorded error. Use [`parse_document`] to get every
/// error alongside the recovered tree.
///
/// # Example
///
/// ```
/// use libokra::parse;
///
/// let value = parse("answer= 42\n").unwrap();
/// assert_eq!(value.get("answer").and_then(|v| v.as_f64()), Some(42.0));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    let document = parse_document(&scan(input));
    match document.errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(resolve_list(&document.root)),
    }
}
