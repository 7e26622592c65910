//! Conversions between Okra values and other data formats.
//!
//! Okra has no null, no byte strings and no integer type. Decoders reject
//! the first two; numbers become `f64`. Encoders write integral numbers as
//! integers when the target format distinguishes them.

pub mod cbor;
pub mod json;
pub mod toml;
pub mod yaml;

/// 2^53: every integer below this magnitude is exact in an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The number as an `i64` if it is integral and exactly representable.
pub fn as_integer(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

/// Error message for a foreign value with no Okra equivalent.
pub fn unsupported(what: &str) -> String {
    format!("{} cannot be converted to Okra", what)
}
