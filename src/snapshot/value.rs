//! Lenient accessors for provider JSON, where ids and counters arrive as
//! either strings or numbers.

use serde_json::Value;

/// Identifier as a string. Empty strings and non-scalar values are None.
pub fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Scalar rendered as display text. Null, empty strings and containers are None.
pub fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn as_i64(v: &Value) -> Option<i64> {
    v.as_i64()
        .or_else(|| v.as_f64().map(|f| f as i64))
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

pub fn as_u32(v: &Value) -> Option<u32> {
    as_i64(v).and_then(|n| u32::try_from(n).ok())
}

/// First entry of a `{ "results": [...] }` wrapper.
pub fn first_result(wrapper: &Value) -> Option<&Value> {
    wrapper.get("results")?.as_array()?.first()
}
