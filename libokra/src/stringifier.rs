//! Stringifier: the inverse of scan + parse + resolve.
//!
//! Objects write one `key<delimiter> value` line per entry, arrays the same
//! without keys. Nested collections open with `/` and continue one tab
//! deeper. Empty objects and empty arrays both print as a bare `/` line, so
//! an empty object reads back as an empty array.

use crate::error::StringifyError;
use crate::value::{Map, Value};

type Result<T> = std::result::Result<T, StringifyError>;

/// Stringify a value as an Okra document.
///
/// The root must be an array or an object. Strings with line breaks or a
/// leading space or tab, non-finite numbers and keys that would not read
/// back unchanged are rejected.
#[tracing::instrument(skip_all, fields(kind = value.type_name()))]
pub fn stringify(value: &Value) -> Result<String> {
    let mut out = String::new();
    match value {
        Value::Array(items) => write_array(&mut out, items, 0)?,
        Value::Object(obj) => write_object(&mut out, obj, 0)?,
        scalar => return Err(StringifyError::ScalarRoot(scalar.type_name())),
    }
    Ok(out)
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_array(out: &mut String, items: &[Value], depth: usize) -> Result<()> {
    for item in items {
        write_indent(out, depth);
        write_value(out, item, depth)?;
    }
    Ok(())
}

fn write_object(out: &mut String, obj: &Map, depth: usize) -> Result<()> {
    for (key, value) in obj {
        write_indent(out, depth);
        write_key(out, key)?;
        write_value(out, value, depth)?;
    }
    Ok(())
}

/// Write the delimiter and value for an entry whose line is at `depth`.
fn write_value(out: &mut String, value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::Array(items) => {
            out.push_str("/\n");
            write_array(out, items, depth + 1)
        }
        Value::Object(obj) => {
            out.push_str("/\n");
            write_object(out, obj, depth + 1)
        }
        Value::String(s) => {
            if s.contains(['\n', '\r']) {
                return Err(StringifyError::MultilineString(s.clone()));
            }
            if s.starts_with([' ', '\t']) {
                return Err(StringifyError::LeadingWhitespace(s.clone()));
            }
            if s.is_empty() {
                out.push_str(":\n");
            } else {
                out.push_str(": ");
                out.push_str(s);
                out.push('\n');
            }
            Ok(())
        }
        Value::Bool(b) => {
            out.push_str(if *b { "? true\n" } else { "? false\n" });
            Ok(())
        }
        Value::Number(n) => {
            out.push_str("= ");
            out.push_str(&format_number(*n)?);
            out.push('\n');
            Ok(())
        }
    }
}

/// Keys are escaped so that delimiters, `#` and `\` read back literally.
/// Spaces and tabs at either end are escaped too, since bare ones are trimmed.
fn write_key(out: &mut String, key: &str) -> Result<()> {
    if key.is_empty() || key.contains(['\n', '\r']) {
        return Err(StringifyError::InvalidKey(key.to_string()));
    }
    let body_start = key.len() - key.trim_start_matches([' ', '\t']).len();
    let body_end = key.trim_end_matches([' ', '\t']).len();
    for (i, ch) in key.char_indices() {
        let padding = i < body_start || i >= body_end;
        if padding || matches!(ch, '\\' | ':' | '=' | '?' | '/' | '#') {
            out.push('\\');
        }
        out.push(ch);
    }
    Ok(())
}

/// Shortest text that reads back as the same `f64`.
///
/// Plain decimal notation for `1e-6 <= |n| < 1e21` (and zero), scientific
/// notation outside that range. Integral values print without a fraction.
pub fn format_number(n: f64) -> Result<String> {
    if !n.is_finite() {
        return Err(StringifyError::NonFiniteNumber(n));
    }
    let abs = n.abs();
    if abs == 0.0 || (1e-6..1e21).contains(&abs) {
        Ok(format!("{}", n))
    } else {
        Ok(format!("{:e}", n))
    }
}
