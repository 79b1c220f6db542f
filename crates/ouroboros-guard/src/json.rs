//! JSON interop (feature `serde`)
//!
//! Converts between `serde_json::Value` and [`Value`], and loads
//! [`Options`] from JSON text. JSON numbers become `Number` (f64); JSON
//! objects keep their key order, so schema properties are checked in the
//! order they were written.

use crate::errors::OptionsError;
use crate::options::Options;
use crate::types::Value;

// ============================================================================
// Conversions
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(fields) => {
                Value::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Lossy: values JSON cannot hold become `null` (undefined, functions,
/// non-finite numbers) or text (symbols, big integers out of range).
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Undefined | Value::Function(_) => serde_json::Value::Null,
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::BigInt(n) => match i64::try_from(n) {
                Ok(n) => serde_json::Value::Number(n.into()),
                Err(_) => serde_json::Value::String(n.to_string()),
            },
            Value::String(s) | Value::Symbol(s) => serde_json::Value::String(s),
            Value::Array(items) => serde_json::Value::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(fields) | Value::Instance { fields, .. } => serde_json::Value::Object(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

// ============================================================================
// Options loading
// ============================================================================

impl Options {
    /// Parse options from JSON text
    ///
    /// # Example
    ///
    /// ```
    /// use ouroboros_guard::{validate_number, Options, Value};
    ///
    /// let options = Options::from_json(r#"{"begin": "scale()", "gte": 1, "mod": 2}"#).unwrap();
    /// let err = validate_number(&Value::from(3), Some("factor"), &options).unwrap_err();
    /// assert_eq!(err.to_string(), "scale(): `factor` 3 is not mod 2");
    /// ```
    pub fn from_json(text: &str) -> Result<Options, OptionsError> {
        let raw: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json_value(raw)
    }

    /// Parse options from an already-decoded JSON value
    pub fn from_json_value(raw: serde_json::Value) -> Result<Options, OptionsError> {
        tracing::trace!("loading options from JSON");
        Options::from_value(&Value::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_value_keeps_key_order() {
        let value = Value::from(json!({"z": 1, "a": [true, null], "m": "x"}));
        let keys: Vec<&str> = value
            .entries()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(value.get("a"), Some(&Value::from(vec![Value::Bool(true), Value::Null])));
    }

    #[test]
    fn test_to_json_is_lossy_for_non_json_values() {
        let value = Value::object([
            ("u", Value::Undefined),
            ("n", Value::Number(f64::NAN)),
            ("big", Value::BigInt(i128::MAX)),
            ("small", Value::BigInt(7)),
        ]);
        let json: serde_json::Value = value.into();
        assert_eq!(
            json,
            json!({"u": null, "n": null, "big": i128::MAX.to_string(), "small": 7})
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(Options::from_json("{"), Err(OptionsError::Json(_))));
        assert_eq!(
            Options::from_json("[]"),
            Err(OptionsError::NotARecord("an array".to_string()))
        );
    }
}
