//! CBOR transcoding: convert between Okra values and CBOR binary data.
//!
//! Mapping from CBOR to Okra:
//!   - CBOR bool                  -> Value::Bool
//!   - CBOR unsigned/negative int -> Value::Number
//!   - CBOR float (16/32/64)      -> Value::Number (promoted to f64)
//!   - CBOR text string           -> Value::String
//!   - CBOR array (det/indet)     -> Value::Array
//!   - CBOR map (det/indet)       -> Value::Object (text string keys only)
//!   - CBOR null, byte string, tag or any other value -> error
//!
//! Mapping from Okra to CBOR:
//!   - Value::Bool    -> CBOR bool (simple values 20/21)
//!   - Value::Number  -> CBOR integer (smallest encoding) when integral
//!                       within ±2^53, CBOR float64 otherwise
//!   - Value::String  -> CBOR text string (determinate length)
//!   - Value::Array   -> CBOR array (determinate length)
//!   - Value::Object  -> CBOR map (determinate length, insertion order)

use ciborium::value::Value as CborValue;
use libokra::{Map, Value};

use super::{as_integer, unsupported};

// ---------------------------------------------------------------------------
// Decode (CBOR -> Okra)
// ---------------------------------------------------------------------------

/// Decode CBOR bytes into an Okra Value.
pub fn decode(input: &[u8]) -> Result<Value, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    cbor_to_value(&cbor_value)
}

fn cbor_to_value(cbor: &CborValue) -> Result<Value, String> {
    match cbor {
        CborValue::Bool(b) => Ok(Value::Bool(*b)),
        CborValue::Integer(i) => {
            let n: i128 = (*i).into();
            Ok(Value::Number(n as f64))
        }
        CborValue::Float(f) => Ok(Value::Number(*f)),
        CborValue::Text(s) => Ok(Value::String(s.clone())),
        CborValue::Array(arr) => {
            let items: Result<Vec<Value>, String> = arr.iter().map(cbor_to_value).collect();
            Ok(Value::Array(items?))
        }
        CborValue::Map(pairs) => {
            let mut obj = Map::with_capacity(pairs.len());
            for (k, v) in pairs {
                let key = match k {
                    CborValue::Text(s) => s.clone(),
                    _ => return Err(format!("CBOR map key must be a text string, got: {:?}", k)),
                };
                obj.insert(key, cbor_to_value(v)?);
            }
            Ok(Value::Object(obj))
        }
        CborValue::Null => Err(unsupported("null")),
        CborValue::Bytes(_) => Err(unsupported("byte string")),
        CborValue::Tag(tag, _) => Err(unsupported(&format!("CBOR tagged value (tag {})", tag))),
        _ => Err(unsupported(&format!("CBOR value {:?}", cbor))),
    }
}

// ---------------------------------------------------------------------------
// Encode (Okra -> CBOR)
//
// CBOR is written directly rather than through ciborium's Value type:
// ciborium downgrades float64 to float16/float32 when the value fits, and
// non-integral numbers must stay float64 (major type 7, additional info 27).
// ---------------------------------------------------------------------------

/// Encode an Okra Value as CBOR bytes.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_value(&mut buf, value);
    buf
}

fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Bool(b) => {
            // CBOR simple value 20 = false, 21 = true
            buf.push(if *b { 0xf5 } else { 0xf4 });
        }
        Value::Number(n) => match as_integer(*n) {
            Some(i) => write_integer(buf, i),
            None => {
                buf.push(0xfb);
                buf.extend_from_slice(&n.to_be_bytes());
            }
        },
        Value::String(s) => write_text(buf, s),
        Value::Array(arr) => {
            write_head(buf, ARRAY, arr.len() as u64);
            for item in arr {
                write_value(buf, item);
            }
        }
        Value::Object(obj) => {
            write_head(buf, MAP, obj.len() as u64);
            for (k, v) in obj {
                write_text(buf, k);
                write_value(buf, v);
            }
        }
    }
}

const UNSIGNED: u8 = 0;
const NEGATIVE: u8 = 1;
const TEXT: u8 = 3;
const ARRAY: u8 = 4;
const MAP: u8 = 5;

fn write_text(buf: &mut Vec<u8>, s: &str) {
    write_head(buf, TEXT, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// A negative `n` is stored as `-1 - n` under its own major type.
fn write_integer(buf: &mut Vec<u8>, n: i64) {
    match u64::try_from(n) {
        Ok(n) => write_head(buf, UNSIGNED, n),
        Err(_) => write_head(buf, NEGATIVE, n.unsigned_abs() - 1),
    }
}

/// Initial byte plus argument, using the narrowest argument width.
fn write_head(buf: &mut Vec<u8>, major: u8, arg: u64) {
    let major = major << 5;
    if arg < 24 {
        buf.push(major | arg as u8);
    } else if let Ok(arg) = u8::try_from(arg) {
        buf.extend_from_slice(&[major | 24, arg]);
    } else if let Ok(arg) = u16::try_from(arg) {
        buf.push(major | 25);
        buf.extend_from_slice(&arg.to_be_bytes());
    } else if let Ok(arg) = u32::try_from(arg) {
        buf.push(major | 26);
        buf.extend_from_slice(&arg.to_be_bytes());
    } else {
        buf.push(major | 27);
        buf.extend_from_slice(&arg.to_be_bytes());
    }
}
