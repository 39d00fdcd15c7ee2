//! Error types for record mapping and value decoding.
//!
//! Only two kinds of failure are loud: violations of the top-level record
//! contract ([`HydrateError`]) and failures while decoding driver values
//! into the [`crate::Value`] model ([`DecodeError`]). Per-slot and
//! per-element conversion failures during mapping are absorbed silently
//! and never surface here.

use thiserror::Error;

/// Errors from the top-level record contract.
#[derive(Debug, Error)]
pub enum HydrateError {
    /// The record did not carry exactly one top-level field.
    #[error("expected exactly one top-level field, got {actual}: {names:?}")]
    WrongFieldCount { actual: usize, names: Vec<String> },

    /// The single top-level field was not a structured map value.
    #[error("top-level field '{field}' is a {kind} value, not a structured map")]
    NotStructured { field: String, kind: &'static str },
}

/// Errors that can occur while decoding driver values into the value model.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Bolt structure with no representation in the value model.
    #[error("Neo4j {bolt_type} cannot be decoded into a record value")]
    UnsupportedBoltType { bolt_type: String },

    /// NaN and infinite floats have no portable representation.
    #[error("non-finite float {value} cannot be decoded")]
    NonFiniteFloat { value: f64 },

    /// Temporal payload the driver could not convert.
    #[error("invalid temporal value: {reason}")]
    InvalidTemporal { reason: String },

    /// A named row field was absent or not extractable.
    #[error("row field '{field}' could not be read: {reason}")]
    UnreadableRowField { field: String, reason: String },

    /// The top-level JSON value was not an object.
    #[error("top-level JSON value is {kind}, not an object")]
    NotJsonObject { kind: &'static str },
}
