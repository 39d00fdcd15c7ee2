//! Field binding: populating a target instance from a structured value.
//!
//! The binder matches record field names to declared slots
//! case-insensitively, dispatches each matched value through the
//! converter chain, and assigns produced values. Failures are isolated
//! per slot: a value that does not convert leaves its slot at the
//! default and binding continues, so the caller always receives a
//! fully-walked, best-effort instance. Only the top-level record
//! contract fails loudly.

use std::any::Any;
use std::collections::HashMap;

use crate::convert::convert;
use crate::descriptor::{FromRecord, StructShape};
use crate::error::HydrateError;
use crate::value::{Record, Value};

/// Map a single-record query result onto a fresh instance of `T`.
///
/// The record must expose exactly one top-level field, and that field's
/// value must be a structured map; anything else is an input error, not
/// something to absorb. Within the map, declared slots populate by
/// case-insensitive name, unknown fields are ignored, and per-field
/// conversion failures leave the slot at its default.
///
/// # Errors
///
/// Returns [`HydrateError`] when the record shape violates the contract
/// above. Per-field conversion failures never error.
pub fn hydrate_record<T: FromRecord>(record: &Record) -> Result<T, HydrateError> {
    let fields = record.fields();
    let [(name, value)] = fields else {
        return Err(HydrateError::WrongFieldCount {
            actual: fields.len(),
            names: fields.iter().map(|(name, _)| name.clone()).collect(),
        });
    };
    let Value::Map(map) = value else {
        return Err(HydrateError::NotStructured {
            field: name.clone(),
            kind: value.kind(),
        });
    };

    let mut instance = T::default();
    bind_fields(&mut instance, T::shape(), map);
    Ok(instance)
}

/// Populate the declared slots of an erased instance from a structured
/// value's fields.
pub(crate) fn bind_fields(
    instance: &mut dyn Any,
    shape: &StructShape,
    fields: &HashMap<String, Value>,
) {
    // Case-insensitive lookup; on names differing only by case, one of
    // them wins and the choice is unspecified.
    let lookup: HashMap<String, &Value> = fields
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect();

    for slot in &shape.slots {
        let Some(value) = lookup.get(&slot.name.to_ascii_lowercase()) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match convert(value, &slot.descriptor) {
            Some(converted) => {
                if !(slot.assign)(instance, converted) {
                    tracing::debug!(
                        "converted value did not fit slot {}.{}, keeping default",
                        shape.name,
                        slot.name
                    );
                }
            }
            None => {
                tracing::debug!(
                    "{} value did not convert for slot {}.{}, keeping default",
                    value.kind(),
                    shape.name,
                    slot.name
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_struct;

    record_struct! {
        struct Greeting {
            message: String,
            recipient: String,
        }
    }

    fn structured(pairs: &[(&str, Value)]) -> Value {
        Value::Map(
            pairs
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_case_insensitive_binding() {
        let record = Record::new().with_field(
            "g",
            structured(&[("MESSAGE", Value::Text("hi".to_string()))]),
        );
        let greeting: Greeting = hydrate_record(&record).unwrap();
        assert_eq!(greeting.message, "hi");
        assert_eq!(greeting.recipient, "");
    }

    #[test]
    fn test_null_and_absent_fields_keep_defaults() {
        let record = Record::new().with_field(
            "g",
            structured(&[
                ("message", Value::Null),
                ("unknown", Value::Text("ignored".to_string())),
            ]),
        );
        let greeting: Greeting = hydrate_record(&record).unwrap();
        assert_eq!(greeting.message, "");
        assert_eq!(greeting.recipient, "");
    }

    #[test]
    fn test_wrong_field_count_is_an_error() {
        let record = Record::new()
            .with_field("a", structured(&[]))
            .with_field("b", structured(&[]));
        let result: Result<Greeting, _> = hydrate_record(&record);
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            HydrateError::WrongFieldCount { actual: 2, .. }
        ));
    }

    #[test]
    fn test_non_structured_top_level_is_an_error() {
        let record = Record::new().with_field("g", Value::Int(42));
        let result: Result<Greeting, _> = hydrate_record(&record);
        let err = result.unwrap_err();
        let HydrateError::NotStructured { field, kind } = err else {
            panic!("expected NotStructured, got {err:?}");
        };
        assert_eq!(field, "g");
        assert_eq!(kind, "integer");
    }

    #[test]
    fn test_failed_conversion_keeps_default_and_continues() {
        let record = Record::new().with_field(
            "g",
            structured(&[
                ("message", Value::List(vec![Value::Int(1)])),
                ("recipient", Value::Text("Joshua".to_string())),
            ]),
        );
        let greeting: Greeting = hydrate_record(&record).unwrap();
        assert_eq!(greeting.message, "");
        assert_eq!(greeting.recipient, "Joshua");
    }
}
