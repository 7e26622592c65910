//! JSON transcoding: convert between Okra values and JSON text.
//!
//! Mapping from JSON to Okra:
//!   - JSON null    -> error (Okra has no null)
//!   - JSON boolean -> Value::Bool
//!   - JSON number  -> Value::Number
//!   - JSON string  -> Value::String
//!   - JSON array   -> Value::Array
//!   - JSON object  -> Value::Object (key order preserved)
//!
//! Integral numbers within ±2^53 are written as JSON integers, everything
//! else as JSON floats. Non-finite numbers have no JSON form.

use libokra::{Map, Value};

use super::{as_integer, unsupported};

/// Decode a JSON string into an Okra Value.
pub fn decode(input: &str) -> Result<Value, String> {
    let json: serde_json::Value =
        serde_json::from_str(input).map_err(|e| format!("JSON parse error: {}", e))?;
    json_to_value(&json)
}

/// Encode an Okra Value as pretty-printed JSON.
pub fn encode(value: &Value) -> Result<String, String> {
    let json = value_to_json(value)?;
    serde_json::to_string_pretty(&json).map_err(|e| format!("JSON encode error: {}", e))
}

fn json_to_value(json: &serde_json::Value) -> Result<Value, String> {
    match json {
        serde_json::Value::Null => Err(unsupported("null")),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| format!("Unsupported JSON number: {}", n)),
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Array(arr) => {
            let items: Result<Vec<Value>, String> = arr.iter().map(json_to_value).collect();
            Ok(Value::Array(items?))
        }
        serde_json::Value::Object(obj) => {
            let mut map = Map::with_capacity(obj.len());
            for (k, v) in obj {
                map.insert(k.clone(), json_to_value(v)?);
            }
            Ok(Value::Object(map))
        }
    }
}

fn value_to_json(value: &Value) -> Result<serde_json::Value, String> {
    match value {
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => match as_integer(*n) {
            Some(i) => Ok(serde_json::Value::from(i)),
            None => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| format!("JSON cannot represent the number {}", n)),
        },
        Value::Array(arr) => {
            let items: Result<Vec<serde_json::Value>, String> =
                arr.iter().map(value_to_json).collect();
            Ok(serde_json::Value::Array(items?))
        }
        Value::Object(obj) => {
            let mut map = serde_json::Map::with_capacity(obj.len());
            for (k, v) in obj {
                map.insert(k.clone(), value_to_json(v)?);
            }
            Ok(serde_json::Value::Object(map))
        }
    }
}
