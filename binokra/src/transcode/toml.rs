//! TOML transcoding: convert between Okra values and TOML text.
//!
//! Mapping from TOML to Okra:
//!   - TOML string         -> Value::String
//!   - TOML integer/float  -> Value::Number
//!   - TOML boolean        -> Value::Bool
//!   - TOML array          -> Value::Array
//!   - TOML table          -> Value::Object
//!   - TOML datetime       -> Value::String (RFC 3339 representation)
//!
//! Mapping from Okra to TOML:
//!   - Value::Number -> TOML integer when integral, TOML float otherwise
//!   - Value::Object -> TOML table; inline table inside arrays
//!
//! TOML requires the top-level value to be a table, so only object
//! documents can be encoded.

use libokra::{Map, Value};
use toml_edit::DocumentMut;

use super::as_integer;

/// Decode a TOML string into an Okra Value.
pub fn decode(input: &str) -> Result<Value, String> {
    let doc: DocumentMut = input
        .parse::<DocumentMut>()
        .map_err(|e| format!("TOML parse error: {}", e))?;
    toml_table_to_value(doc.as_table())
}

/// Encode an Okra Value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    let obj = value
        .as_object()
        .ok_or("TOML requires the top-level value to be a table/object")?;
    let mut doc = DocumentMut::new();
    for (key, v) in obj {
        doc.insert(key, value_to_item(v));
    }
    Ok(doc.to_string())
}

fn toml_table_to_value(table: &toml_edit::Table) -> Result<Value, String> {
    let mut obj = Map::with_capacity(table.len());
    for (key, item) in table.iter() {
        obj.insert(key.to_string(), toml_item_to_value(item)?);
    }
    Ok(Value::Object(obj))
}

fn toml_item_to_value(item: &toml_edit::Item) -> Result<Value, String> {
    match item {
        toml_edit::Item::Value(v) => Ok(toml_value_to_okra(v)),
        toml_edit::Item::Table(t) => toml_table_to_value(t),
        toml_edit::Item::ArrayOfTables(arr) => {
            let items: Result<Vec<Value>, String> = arr.iter().map(toml_table_to_value).collect();
            Ok(Value::Array(items?))
        }
        toml_edit::Item::None => Err("empty TOML item".to_string()),
    }
}

fn toml_value_to_okra(v: &toml_edit::Value) -> Value {
    match v {
        toml_edit::Value::String(s) => Value::String(s.value().clone()),
        toml_edit::Value::Integer(i) => Value::Number(*i.value() as f64),
        toml_edit::Value::Float(f) => Value::Number(*f.value()),
        toml_edit::Value::Boolean(b) => Value::Bool(*b.value()),
        toml_edit::Value::Datetime(dt) => Value::String(dt.value().to_string()),
        toml_edit::Value::Array(arr) => Value::Array(arr.iter().map(toml_value_to_okra).collect()),
        toml_edit::Value::InlineTable(table) => Value::Object(
            table
                .iter()
                .map(|(key, val)| (key.to_string(), toml_value_to_okra(val)))
                .collect(),
        ),
    }
}

/// Objects become tables; everything else is an inline value.
fn value_to_item(value: &Value) -> toml_edit::Item {
    match value {
        Value::Object(obj) => {
            let mut table = toml_edit::Table::new();
            for (k, v) in obj {
                table.insert(k, value_to_item(v));
            }
            toml_edit::Item::Table(table)
        }
        other => toml_edit::Item::Value(value_to_toml(other)),
    }
}

fn value_to_toml(value: &Value) -> toml_edit::Value {
    match value {
        Value::String(s) => toml_edit::Value::from(s.as_str()),
        Value::Bool(b) => toml_edit::Value::from(*b),
        Value::Number(n) => match as_integer(*n) {
            Some(i) => toml_edit::Value::from(i),
            None => toml_edit::Value::from(*n),
        },
        Value::Array(arr) => {
            let mut toml_arr = toml_edit::Array::new();
            for v in arr {
                toml_arr.push(value_to_toml(v));
            }
            toml_edit::Value::Array(toml_arr)
        }
        Value::Object(obj) => {
            let mut inline = toml_edit::InlineTable::new();
            for (k, v) in obj {
                inline.insert(k.as_str(), value_to_toml(v));
            }
            toml_edit::Value::InlineTable(inline)
        }
    }
}
