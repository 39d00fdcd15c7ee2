//! Bolt decoding boundary: Neo4j driver values → the mapper's value model.
//!
//! This module turns `neo4rs` Bolt values into [`Value`] trees and query
//! rows into [`Record`]s. Decoding is structural only; interpreting a
//! value against a target type is the converter chain's job.
//!
//! Zone-aware Bolt temporals (`DateTime`, `DateTimeZoneId`) decode to
//! [`Value::ZonedDateTime`]; zone-naive ones (`Date`, `LocalDateTime`)
//! decode to [`Value::LocalDateTime`] with their fields kept verbatim;
//! no timezone is assumed for them at any point.
//!
//! Unexpected cases return explicit errors instead of silently falling
//! back: graph-only structures with no property representation
//! (`Time`, `LocalTime`, `Duration`, points, paths) and non-finite
//! floats are refused.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use neo4rs::{BoltMap, BoltType};

use crate::error::DecodeError;
use crate::value::{Record, Value};

/// Decode one Bolt-typed value into the value model.
///
/// Nodes and relations decode to the map of their properties; they are
/// the structured values this mapper exists to consume.
///
/// # Errors
///
/// Returns [`DecodeError`] for NaN or infinite floats, temporal payloads
/// the driver cannot convert, and Bolt structures with no representation
/// in the value model (`Time`, `LocalTime`, `Duration`, `Point2D`,
/// `Point3D`, `Path`).
pub fn decode_bolt(bolt: BoltType) -> Result<Value, DecodeError> {
    match bolt {
        BoltType::Null(_) => Ok(Value::Null),

        BoltType::Boolean(value) => Ok(Value::Bool(value.value)),

        BoltType::Integer(value) => Ok(Value::Int(value.value)),

        BoltType::Float(value) => {
            if !value.value.is_finite() {
                return Err(DecodeError::NonFiniteFloat { value: value.value });
            }
            Ok(Value::Float(value.value))
        }

        BoltType::String(value) => Ok(Value::Text(value.value)),

        // Bytes have no slot in the value model; hex text keeps them
        // round-trippable.
        BoltType::Bytes(value) => Ok(Value::Text(hex::encode(value.value.to_vec()))),

        BoltType::List(list) => {
            let elements: Result<Vec<Value>, DecodeError> =
                list.value.into_iter().map(decode_bolt).collect();
            Ok(Value::List(elements?))
        }

        BoltType::Map(map) => decode_properties(map),

        BoltType::Date(date) => {
            let date: NaiveDate = date.try_into().map_err(|e| DecodeError::InvalidTemporal {
                reason: format!("failed to convert Bolt date: {e}"),
            })?;
            Ok(Value::LocalDateTime(NaiveDateTime::new(
                date,
                NaiveTime::MIN,
            )))
        }

        BoltType::LocalDateTime(local) => {
            let naive: NaiveDateTime =
                local.try_into().map_err(|e| DecodeError::InvalidTemporal {
                    reason: format!("failed to convert Bolt local datetime: {e}"),
                })?;
            Ok(Value::LocalDateTime(naive))
        }

        BoltType::DateTime(datetime) => {
            let zoned: DateTime<FixedOffset> =
                datetime
                    .try_into()
                    .map_err(|e| DecodeError::InvalidTemporal {
                        reason: format!("failed to convert Bolt datetime: {e}"),
                    })?;
            Ok(Value::ZonedDateTime(zoned))
        }

        BoltType::DateTimeZoneId(datetime) => {
            let zoned: DateTime<FixedOffset> =
                (&datetime)
                    .try_into()
                    .map_err(|e| DecodeError::InvalidTemporal {
                        reason: format!("failed to convert Bolt zoned datetime: {e}"),
                    })?;
            Ok(Value::ZonedDateTime(zoned))
        }

        BoltType::Node(node) => decode_properties(node.properties),

        BoltType::Relation(relation) => decode_properties(relation.properties),

        BoltType::UnboundedRelation(relation) => decode_properties(relation.properties),

        BoltType::Time(_) => Err(unsupported("Time")),
        BoltType::LocalTime(_) => Err(unsupported("LocalTime")),
        BoltType::Duration(_) => Err(unsupported("Duration")),
        BoltType::Point2D(_) => Err(unsupported("Point2D")),
        BoltType::Point3D(_) => Err(unsupported("Point3D")),
        BoltType::Path(_) => Err(unsupported("Path")),
    }
}

/// Extract named top-level fields of a query row into a [`Record`].
///
/// `neo4rs` rows do not enumerate their own keys, so the caller names
/// the fields its query returned, in order.
///
/// # Errors
///
/// Returns [`DecodeError`] when a named field is absent or not
/// extractable, or when a field's value fails [`decode_bolt`].
pub fn decode_row(row: &neo4rs::Row, keys: &[&str]) -> Result<Record, DecodeError> {
    let mut record = Record::new();
    for &key in keys {
        let bolt: BoltType = row
            .get(key)
            .map_err(|e| DecodeError::UnreadableRowField {
                field: key.to_string(),
                reason: e.to_string(),
            })?;
        record.push(key, decode_bolt(bolt)?);
    }
    tracing::debug!("decoded row with {} field(s)", record.len());
    Ok(record)
}

fn decode_properties(map: BoltMap) -> Result<Value, DecodeError> {
    let mut fields = HashMap::new();
    for (key, value) in map.value.into_iter() {
        fields.insert(key.to_string(), decode_bolt(value)?);
    }
    Ok(Value::Map(fields))
}

fn unsupported(bolt_type: &str) -> DecodeError {
    DecodeError::UnsupportedBoltType {
        bolt_type: bolt_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use neo4rs::{BoltBoolean, BoltInteger, BoltList, BoltNull, BoltString};

    #[test]
    fn test_scalar_decoding() {
        assert_eq!(decode_bolt(BoltType::Null(BoltNull)).unwrap(), Value::Null);
        assert_eq!(
            decode_bolt(BoltType::Boolean(BoltBoolean::new(true))).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            decode_bolt(BoltType::Integer(BoltInteger::new(42))).unwrap(),
            Value::Int(42)
        );
        assert_eq!(
            decode_bolt(BoltType::String(BoltString::new("hello"))).unwrap(),
            Value::Text("hello".to_string())
        );
    }

    #[test]
    fn test_non_finite_float_is_refused() {
        let result = decode_bolt(BoltType::Float(neo4rs::BoltFloat::new(f64::NAN)));
        assert!(matches!(result, Err(DecodeError::NonFiniteFloat { .. })));
    }

    #[test]
    fn test_list_decoding_preserves_order() {
        let mut list = BoltList::new();
        list.push(BoltType::Integer(BoltInteger::new(1)));
        list.push(BoltType::Integer(BoltInteger::new(2)));
        let decoded = decode_bolt(BoltType::List(list)).unwrap();
        assert_eq!(decoded, Value::List(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn test_map_decoding() {
        let mut map = BoltMap::new();
        map.put("name".into(), BoltType::String(BoltString::new("Alice")));
        map.put("age".into(), BoltType::Integer(BoltInteger::new(30)));
        let Value::Map(fields) = decode_bolt(BoltType::Map(map)).unwrap() else {
            panic!("expected map value");
        };
        assert_eq!(fields.get("name"), Some(&Value::Text("Alice".to_string())));
        assert_eq!(fields.get("age"), Some(&Value::Int(30)));
    }

    #[test]
    fn test_date_decodes_to_unzoned_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let decoded = decode_bolt(BoltType::Date(neo4rs::BoltDate::from(date))).unwrap();
        let Value::LocalDateTime(naive) = decoded else {
            panic!("expected local datetime value");
        };
        assert_eq!(naive.date(), date);
        assert_eq!(naive.year(), 2024);
        assert_eq!(naive.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_local_datetime_fields_kept_verbatim() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 30, 45)
            .unwrap();
        let decoded =
            decode_bolt(BoltType::LocalDateTime(neo4rs::BoltLocalDateTime::from(naive)))
                .unwrap();
        assert_eq!(decoded, Value::LocalDateTime(naive));
    }

    #[test]
    fn test_graph_only_structures_are_refused() {
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        let result = decode_bolt(BoltType::LocalTime(neo4rs::BoltLocalTime::from(time)));
        assert!(matches!(
            result,
            Err(DecodeError::UnsupportedBoltType { bolt_type }) if bolt_type == "LocalTime"
        ));
    }
}
