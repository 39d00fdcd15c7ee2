//! Runtime value model for decoded database records.
//!
//! This module defines the intermediate representations consumed by the
//! mapper: [`Value`], the tagged form of one decoded field or collection
//! element, and [`Record`], the ordered top-level fields of one query
//! result row.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Decoded runtime value of one record field or collection element.
///
/// `Value` is produced once per incoming record by a decoding boundary
/// (see [`crate::bolt`] and [`crate::json`]) and consumed immediately
/// during mapping. The tree is finite and acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null.
    Null,

    /// Boolean value.
    Bool(bool),

    /// 64-bit signed integer (graph drivers expose a single integer width).
    Int(i64),

    /// 64-bit IEEE 754 floating point.
    Float(f64),

    /// Exact decimal value.
    Decimal(Decimal),

    /// Text value.
    Text(String),

    /// Opaque unique identifier.
    Uuid(Uuid),

    /// Database-native temporal carrying an explicit offset.
    ZonedDateTime(DateTime<FixedOffset>),

    /// Database-native temporal with calendar and clock fields only,
    /// no zone attached.
    LocalDateTime(NaiveDateTime),

    /// Ordered list of values.
    List(Vec<Value>),

    /// Nested structured value. Keys are case-sensitive as produced by
    /// the source.
    Map(HashMap<String, Value>),
}

impl Value {
    /// Name of this value's runtime shape, for error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Uuid(_) => "uuid",
            Value::ZonedDateTime(_) => "zoned datetime",
            Value::LocalDateTime(_) => "local datetime",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a scalar (neither null nor a collection).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Null | Value::List(_) | Value::Map(_))
    }
}

/// One query result row: the ordered, named top-level fields returned for
/// a single record.
///
/// Field order is preserved as produced by the driver. The mapping entry
/// point ([`crate::hydrate_record`]) requires exactly one field whose
/// value is a [`Value::Map`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named top-level field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.push(name, value);
        self
    }

    /// Append a named top-level field.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    /// The top-level fields in driver order.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a top-level field by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Bool(true).kind(), "boolean");
        assert_eq!(Value::Int(1).kind(), "integer");
        assert_eq!(Value::Text("x".to_string()).kind(), "text");
        assert_eq!(Value::List(vec![]).kind(), "list");
        assert_eq!(Value::Map(HashMap::new()).kind(), "map");
    }

    #[test]
    fn test_value_scalar_predicate() {
        assert!(Value::Int(7).is_scalar());
        assert!(Value::Uuid(Uuid::nil()).is_scalar());
        assert!(!Value::Null.is_scalar());
        assert!(!Value::List(vec![Value::Int(1)]).is_scalar());
        assert!(!Value::Map(HashMap::new()).is_scalar());
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new()
            .with_field("greeting", Value::Map(HashMap::new()))
            .with_field("count", Value::Int(2));

        assert_eq!(record.len(), 2);
        assert_eq!(record.fields()[0].0, "greeting");
        assert_eq!(record.get("count"), Some(&Value::Int(2)));
        assert_eq!(record.get("COUNT"), None);
    }
}
