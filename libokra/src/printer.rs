//! Plain-text rendering of parse errors with a source excerpt.
//!
//! ```text
//! config.okra:2:4 - error[UNEXPECTED_TOKEN] - unexpected line break; ...
//!   1 │ a: 1
//! > 2 │ bad
//!     │    ^
//!   3 │ c: 3
//! ```

use std::fmt::Write;

use crate::error::ParseError;
use crate::scanner::TAB_WIDTH;

/// Render the error's line with one line of context on each side and an
/// underline below the offending token.
pub fn excerpt(source: &str, error: &ParseError) -> String {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let loc = error.token.loc;
    let line = loc.line.clamp(1, lines.len());
    let first = line.saturating_sub(1).max(1);
    let last = (line + 1).min(lines.len());
    let gutter = last.to_string().len();

    let mut out = String::new();
    for num in first..=last {
        let marker = if num == line { '>' } else { ' ' };
        let text = expand_tabs(lines[num - 1]);
        let row = format!("{} {:>gutter$} │ {}", marker, num, text);
        // Infallible for String.
        let _ = writeln!(out, "{}", row.trim_end());

        if num == line {
            let width = display_width(&error.token.value).max(1);
            let _ = writeln!(
                out,
                "  {:gutter$} │ {}^{}",
                "",
                " ".repeat(loc.col.saturating_sub(1)),
                "~".repeat(width - 1)
            );
        }
    }
    out
}

/// `path:line:col - error[CODE] - message` followed by the excerpt.
pub fn diagnostic(path: &str, source: &str, error: &ParseError) -> String {
    format!(
        "{}:{}:{} - error[{}] - {}\n{}",
        path,
        error.line(),
        error.col(),
        error.code,
        error.message,
        excerpt(source, error)
    )
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Columns occupied by token text, matching the scanner's column counting.
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| match c {
            '\t' => TAB_WIDTH,
            '\n' | '\r' => 0,
            _ => 1,
        })
        .sum()
}
