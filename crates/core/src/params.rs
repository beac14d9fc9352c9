//! Helpers for reading typed parameters out of a `serde_json::Value` object.
//!
//! Missing keys and wrongly-typed values fall back to the given default, so a
//! partial override like `{"repel_force": 0.5}` is always usable.

use serde_json::Value;

static NULL: Value = Value::Null;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Returns the nested object `params[name]`, or `null` when absent.
///
/// The result can be fed straight back into the other helpers, which then
/// yield their defaults.
pub fn param_section<'a>(params: &'a Value, name: &str) -> &'a Value {
    params.get(name).unwrap_or(&NULL)
}
