//! YAML transcoding: convert between Okra values and YAML text.
//!
//! Mapping from YAML to Okra:
//!   - YAML null          -> error (Okra has no null)
//!   - YAML bool          -> Value::Bool
//!   - YAML number        -> Value::Number
//!   - YAML string        -> Value::String
//!   - YAML sequence      -> Value::Array
//!   - YAML mapping       -> Value::Object (scalar keys become strings)
//!   - YAML tagged value  -> the untagged value
//!
//! Mapping from Okra to YAML:
//!   - Value::Number -> YAML integer when integral, YAML float otherwise
//!   - everything else maps one to one, key order preserved.

use libokra::{Map, Value};

use super::{as_integer, unsupported};

/// Decode a YAML string into an Okra Value.
pub fn decode(input: &str) -> Result<Value, String> {
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(input).map_err(|e| format!("YAML parse error: {}", e))?;
    yaml_to_value(&yaml_value)
}

/// Encode an Okra Value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    serde_yaml::to_string(&value_to_yaml(value)).map_err(|e| format!("YAML encode error: {}", e))
}

fn yaml_to_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Err(unsupported("null")),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| format!("Unsupported YAML number: {}", n)),
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut obj = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => return Err(unsupported("null mapping key")),
                    _ => return Err(format!("Unsupported YAML mapping key type: {:?}", k)),
                };
                obj.insert(key, yaml_to_value(v)?);
            }
            Ok(Value::Object(obj))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(&tagged.value),
    }
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Number(n) => match as_integer(*n) {
            Some(i) => serde_yaml::Value::Number(serde_yaml::Number::from(i)),
            None => serde_yaml::Value::Number(serde_yaml::Number::from(*n)),
        },
        Value::Array(arr) => serde_yaml::Value::Sequence(arr.iter().map(value_to_yaml).collect()),
        Value::Object(obj) => {
            let mut map = serde_yaml::Mapping::with_capacity(obj.len());
            for (k, v) in obj {
                map.insert(serde_yaml::Value::String(k.clone()), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
    }
}
