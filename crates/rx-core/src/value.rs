//! # JSON-like Value Helpers
//!
//! The Rx value model is `serde_json::Value`: `null` is the absence
//! sentinel, and numbers may be integers or floats.

use serde_json::Value;

/// Short name of a value's JSON type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
