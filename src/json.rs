//! JSON decoding boundary: `serde_json` values → the mapper's value model.
//!
//! Useful for feeding the mapper from sources that already speak JSON,
//! and for building fixture records in tests. Decoding is structural:
//! strings are never sniffed for dates, numbers or identifiers here.
//! Interpretation is driven by the target descriptor in the converter
//! chain.

use crate::error::DecodeError;
use crate::value::{Record, Value};

/// Decode a JSON value into the value model. Total: every JSON value has
/// a structural representation.
///
/// Numbers prefer the integer representation and fall back to floating
/// point when out of `i64` range or fractional.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(value) => Value::Bool(*value),
        serde_json::Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => Value::Int(integer),
            (None, Some(float)) => Value::Float(float),
            (None, None) => Value::Null,
        },
        serde_json::Value::String(text) => Value::Text(text.clone()),
        serde_json::Value::Array(elements) => {
            Value::List(elements.iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(fields) => Value::Map(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), value_from_json(value)))
                .collect(),
        ),
    }
}

/// Decode a top-level JSON object into a [`Record`], one top-level field
/// per object member.
///
/// # Errors
///
/// Returns [`DecodeError::NotJsonObject`] when the value is not an
/// object; a record's top level is named fields by contract.
pub fn record_from_json(json: &serde_json::Value) -> Result<Record, DecodeError> {
    let serde_json::Value::Object(fields) = json else {
        return Err(DecodeError::NotJsonObject {
            kind: json_kind(json),
        });
    };
    let mut record = Record::new();
    for (name, value) in fields {
        record.push(name.clone(), value_from_json(value));
    }
    Ok(record)
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_prefer_integers() {
        assert_eq!(value_from_json(&json!(42)), Value::Int(42));
        assert_eq!(value_from_json(&json!(1.5)), Value::Float(1.5));
        assert_eq!(value_from_json(&json!(u64::MAX)), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn test_nested_structure_decoding() {
        let decoded = value_from_json(&json!({
            "message": "hi",
            "tags": ["a", "b"],
            "nested": {"level": 2}
        }));
        let Value::Map(fields) = decoded else {
            panic!("expected map value");
        };
        assert_eq!(fields.get("message"), Some(&Value::Text("hi".to_string())));
        assert_eq!(
            fields.get("tags"),
            Some(&Value::List(vec![
                Value::Text("a".to_string()),
                Value::Text("b".to_string())
            ]))
        );
        assert!(matches!(fields.get("nested"), Some(Value::Map(_))));
    }

    #[test]
    fn test_record_requires_top_level_object() {
        let record = record_from_json(&json!({"greeting": {"message": "hi"}})).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.fields()[0].0, "greeting");

        let result = record_from_json(&json!([1, 2]));
        assert!(matches!(
            result,
            Err(DecodeError::NotJsonObject { kind: "array" })
        ));
    }
}
