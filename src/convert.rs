//! Converter selection and application.
//!
//! [`select`] is the dispatcher: a pure function of the (value, target)
//! pairing that picks exactly one conversion strategy. The chain below is
//! ordered and first-match-wins; later strategies only apply when earlier
//! ones do not match, and that order is part of the mapping contract, not
//! an optimization.
//!
//! Converters never fail loudly. Every expected absence of a conversion
//! (type mismatch, overflow, unparseable text, out-of-range ordinal) is
//! the explicit "no value" outcome `None`, which leaves the destination
//! slot at its default.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::bind::bind_fields;
use crate::descriptor::{Descriptor, EnumShape, ScalarKind};
use crate::temporal::Timestamp;
use crate::value::Value;

/// Outcome of a successful conversion, tagged with the produced shape.
///
/// Slot types absorb this through [`crate::FromValue::from_converted`],
/// which performs the final narrowing (integer widths, array lengths,
/// enum variants) under the same no-value-on-failure policy.
pub enum Converted {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    Timestamp(Timestamp),

    /// Resolved enum symbol, as a declaration-order ordinal.
    Symbol(usize),

    /// Converted sequence elements in input order; `None` marks an
    /// element that did not convert and takes its type's default.
    Sequence(Vec<Option<Converted>>),

    /// Populated instance of a struct target.
    Struct(Box<dyn Any>),
}

impl fmt::Debug for Converted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converted::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Converted::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Converted::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Converted::Decimal(value) => f.debug_tuple("Decimal").field(value).finish(),
            Converted::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Converted::Uuid(value) => f.debug_tuple("Uuid").field(value).finish(),
            Converted::Timestamp(value) => f.debug_tuple("Timestamp").field(value).finish(),
            Converted::Symbol(value) => f.debug_tuple("Symbol").field(value).finish(),
            Converted::Sequence(value) => f.debug_tuple("Sequence").field(value).finish(),
            Converted::Struct(_) => f.write_str("Struct(..)"),
        }
    }
}

/// The conversion strategies, in selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    Identity,
    TextCoercion,
    EnumConversion,
    ScalarCoercion,
    TemporalDecoding,
    SequenceConversion,
    StructConversion,
    Fallback,
}

/// Pick the conversion strategy for a (value, target) pairing.
///
/// The target must already be stripped of `Nullable` wrappers; see
/// [`convert`]. First match wins.
pub(crate) fn select(value: &Value, target: &Descriptor) -> Strategy {
    if is_identity(value, target) {
        return Strategy::Identity;
    }
    if matches!(target, Descriptor::Scalar(ScalarKind::Text)) {
        return Strategy::TextCoercion;
    }
    if matches!(target, Descriptor::Enum(_)) {
        return Strategy::EnumConversion;
    }
    if is_convertible_scalar(value) && matches!(target, Descriptor::Scalar(_)) {
        return Strategy::ScalarCoercion;
    }
    if matches!(target, Descriptor::Scalar(ScalarKind::Timestamp))
        && matches!(value, Value::ZonedDateTime(_) | Value::LocalDateTime(_))
    {
        return Strategy::TemporalDecoding;
    }
    if matches!(value, Value::List(_)) && matches!(target, Descriptor::Sequence { .. }) {
        return Strategy::SequenceConversion;
    }
    if matches!(value, Value::Map(_)) {
        return Strategy::StructConversion;
    }
    Strategy::Fallback
}

/// Convert a value against a target descriptor.
///
/// Unwraps `Nullable` layers, short-circuits nulls to "no value", then
/// applies exactly the strategy [`select`] picked.
pub(crate) fn convert(value: &Value, target: &Descriptor) -> Option<Converted> {
    let mut target = target;
    while let Descriptor::Nullable(inner) = target {
        target = inner;
    }
    if value.is_null() {
        return None;
    }
    match select(value, target) {
        Strategy::Identity => identity(value),
        Strategy::TextCoercion => coerce_text(value).map(Converted::Text),
        Strategy::EnumConversion => match target {
            Descriptor::Enum(shape) => convert_enum(value, shape),
            _ => None,
        },
        Strategy::ScalarCoercion => match target {
            Descriptor::Scalar(kind) => coerce_scalar(value, *kind),
            _ => None,
        },
        Strategy::TemporalDecoding => decode_temporal(value),
        Strategy::SequenceConversion => match (value, target) {
            (Value::List(items), Descriptor::Sequence { element, .. }) => {
                Some(convert_sequence(items, element))
            }
            _ => None,
        },
        Strategy::StructConversion => match (value, target) {
            (Value::Map(fields), Descriptor::Struct(shape)) => {
                let mut instance = (shape.construct)();
                bind_fields(&mut *instance, shape, fields);
                Some(Converted::Struct(instance))
            }
            _ => None,
        },
        Strategy::Fallback => fallback(value, target),
    }
}

/// The value's runtime representation already satisfies the target.
fn is_identity(value: &Value, target: &Descriptor) -> bool {
    matches!(
        (value, target),
        (Value::Bool(_), Descriptor::Scalar(ScalarKind::Bool))
            | (Value::Int(_), Descriptor::Scalar(ScalarKind::Integer))
            | (Value::Float(_), Descriptor::Scalar(ScalarKind::Float))
            | (Value::Decimal(_), Descriptor::Scalar(ScalarKind::Decimal))
            | (Value::Text(_), Descriptor::Scalar(ScalarKind::Text))
            | (Value::Uuid(_), Descriptor::Scalar(ScalarKind::Uuid))
    )
}

/// Scalars the coercion table accepts as sources. The native temporal
/// representations are excluded here; they go through temporal decoding.
fn is_convertible_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Decimal(_)
            | Value::Text(_)
            | Value::Uuid(_)
    )
}

fn identity(value: &Value) -> Option<Converted> {
    match value {
        Value::Bool(value) => Some(Converted::Bool(*value)),
        Value::Int(value) => Some(Converted::Integer(*value)),
        Value::Float(value) => Some(Converted::Float(*value)),
        Value::Decimal(value) => Some(Converted::Decimal(*value)),
        Value::Text(value) => Some(Converted::Text(value.clone())),
        Value::Uuid(value) => Some(Converted::Uuid(*value)),
        _ => None,
    }
}

/// Render any scalar to its canonical, locale-independent text form.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(value) => Some(value.to_string()),
        Value::Int(value) => Some(value.to_string()),
        Value::Float(value) => Some(value.to_string()),
        Value::Decimal(value) => Some(value.to_string()),
        Value::Text(value) => Some(value.clone()),
        Value::Uuid(value) => Some(value.to_string()),
        Value::ZonedDateTime(value) => Some(value.with_timezone(&Utc).to_rfc3339()),
        Value::LocalDateTime(value) => {
            Some(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }
        Value::Null | Value::List(_) | Value::Map(_) => None,
    }
}

/// Match text case-insensitively against the symbol set, or map an
/// integer to the symbol at that declaration-order ordinal.
fn convert_enum(value: &Value, shape: &EnumShape) -> Option<Converted> {
    match value {
        Value::Text(text) => shape.ordinal_of(text).map(Converted::Symbol),
        Value::Int(ordinal) => {
            let ordinal = usize::try_from(*ordinal).ok()?;
            (ordinal < shape.symbols.len()).then_some(Converted::Symbol(ordinal))
        }
        _ => None,
    }
}

/// Widening and narrowing between convertible scalar representations.
fn coerce_scalar(value: &Value, kind: ScalarKind) -> Option<Converted> {
    match (value, kind) {
        (Value::Bool(value), ScalarKind::Integer) => {
            Some(Converted::Integer(i64::from(*value)))
        }
        (Value::Bool(value), ScalarKind::Float) => {
            Some(Converted::Float(if *value { 1.0 } else { 0.0 }))
        }
        (Value::Bool(value), ScalarKind::Decimal) => {
            Some(Converted::Decimal(Decimal::from(i64::from(*value))))
        }

        // Only exact 0/1 count as booleans; anything else is no value.
        (Value::Int(0), ScalarKind::Bool) => Some(Converted::Bool(false)),
        (Value::Int(1), ScalarKind::Bool) => Some(Converted::Bool(true)),
        (Value::Int(value), ScalarKind::Float) => Some(Converted::Float(*value as f64)),
        (Value::Int(value), ScalarKind::Decimal) => {
            Some(Converted::Decimal(Decimal::from(*value)))
        }

        (Value::Float(value), ScalarKind::Integer) => {
            integral_float(*value).map(Converted::Integer)
        }
        (Value::Float(value), ScalarKind::Decimal) => {
            Decimal::try_from(*value).ok().map(Converted::Decimal)
        }

        (Value::Decimal(value), ScalarKind::Integer) => {
            if value.fract().is_zero() {
                value.to_i64().map(Converted::Integer)
            } else {
                None
            }
        }
        (Value::Decimal(value), ScalarKind::Float) => {
            value.to_f64().map(Converted::Float)
        }

        (Value::Text(text), ScalarKind::Bool) => parse_bool(text).map(Converted::Bool),
        (Value::Text(text), ScalarKind::Integer) => {
            text.trim().parse::<i64>().ok().map(Converted::Integer)
        }
        (Value::Text(text), ScalarKind::Float) => {
            text.trim().parse::<f64>().ok().map(Converted::Float)
        }
        (Value::Text(text), ScalarKind::Decimal) => {
            text.trim().parse::<Decimal>().ok().map(Converted::Decimal)
        }
        (Value::Text(text), ScalarKind::Uuid) => {
            Uuid::parse_str(text.trim()).ok().map(Converted::Uuid)
        }
        (Value::Text(text), ScalarKind::Timestamp) => {
            parse_timestamp(text).map(Converted::Timestamp)
        }

        _ => None,
    }
}

/// Decode a database-native temporal. Zone-aware values become a
/// universal-time instant; zone-naive values keep their fields verbatim.
fn decode_temporal(value: &Value) -> Option<Converted> {
    match value {
        Value::ZonedDateTime(value) => Some(Converted::Timestamp(Timestamp::Utc(
            value.with_timezone(&Utc),
        ))),
        Value::LocalDateTime(value) => {
            Some(Converted::Timestamp(Timestamp::Unzoned(*value)))
        }
        _ => None,
    }
}

/// Convert each element against the element descriptor, preserving input
/// order and length. Failed elements are marked and absorbed as defaults
/// at reassembly.
fn convert_sequence(items: &[Value], element: &Descriptor) -> Converted {
    Converted::Sequence(items.iter().map(|item| convert(item, element)).collect())
}

/// Terminal best-effort strategy. The residual pairings (native temporal
/// against a non-temporal target, list against a scalar, map against a
/// non-struct target) have no meaningful conversion.
fn fallback(value: &Value, target: &Descriptor) -> Option<Converted> {
    tracing::trace!(
        "no conversion from {} value to target {:?}",
        value.kind(),
        target
    );
    None
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse text into a timestamp: RFC 3339 yields an instant, the
/// offset-free ISO 8601 form yields an unzoned value.
fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(Timestamp::Utc(instant.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(Timestamp::Unzoned)
}

/// A float that represents an integer exactly, in i64 range.
fn integral_float(value: f64) -> Option<i64> {
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value <= i64::MAX as f64
    {
        Some(value as i64)
    } else {
        None
    }
}
