//! Hydrate statically-typed Rust values from dynamically-typed graph
//! database records.
//!
//! Graph database drivers hand back semi-structured records: nested maps,
//! lists, and a small fixed set of scalar kinds, typed only at runtime.
//! This crate maps one such record onto an instance of a statically-known
//! target type, recursively, without per-type parsing code at the call
//! site: the target type's shape drives converter selection for every
//! field and element.
//!
//! # Modules
//!
//! - [`value`] - runtime value model ([`Value`], [`Record`])
//! - [`descriptor`] - target shape descriptors and the [`FromValue`] /
//!   [`FromRecord`] traits
//! - [`convert`] - converter selection and application
//! - [`bind`] - field binding and the [`hydrate_record`] entry point
//! - [`temporal`] - the zoned-vs-unzoned [`Timestamp`] target type
//! - [`bolt`] - Neo4j Bolt decoding boundary
//! - [`json`] - JSON decoding boundary
//! - [`error`] - error types
//!
//! # Key Design Principles
//!
//! 1. **Ordered dispatch** - converter selection is an explicit,
//!    first-match-wins chain; the order is part of the contract.
//! 2. **Silent per-field absorption** - a field or element that does not
//!    convert leaves its slot at the type's default; only the top-level
//!    record contract fails loudly.
//! 3. **Explicit temporal semantics** - zone-aware values become UTC
//!    instants, zone-naive values keep their fields verbatim, and the
//!    distinction is kept in the [`Timestamp`] type.
//!
//! # Example
//!
//! ```
//! use graph_hydrate::{hydrate_record, record_from_json, record_struct};
//!
//! record_struct! {
//!     pub struct Greeting {
//!         pub message: String,
//!         pub recipient: String,
//!     }
//! }
//!
//! let record = record_from_json(&serde_json::json!({
//!     "greeting": {"MESSAGE": "Hello world!", "recipient": "Joshua"}
//! }))?;
//!
//! let greeting: Greeting = hydrate_record(&record)?;
//! assert_eq!(greeting.message, "Hello world!");
//! assert_eq!(greeting.recipient, "Joshua");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bind;
pub mod bolt;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod json;
mod macros;
pub mod temporal;
pub mod value;

// Re-exports for convenience
pub use bind::hydrate_record;
pub use bolt::{decode_bolt, decode_row};
pub use convert::Converted;
pub use descriptor::{
    Descriptor, EnumShape, FromRecord, FromValue, ScalarKind, SequenceShape, Slot, StructShape,
};
pub use error::{DecodeError, HydrateError};
pub use json::{record_from_json, value_from_json};
pub use temporal::Timestamp;
pub use value::{Record, Value};
