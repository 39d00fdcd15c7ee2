//! Date-time representation produced for timestamp slots.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

/// A converted date-time value.
///
/// Zone-aware source values become a universal-time instant; zone-naive
/// values keep their calendar and clock fields verbatim with no zone
/// attached. The two variants are not comparable instants, so the
/// distinction stays explicit rather than being collapsed by assuming a
/// zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Universal-time instant from a zone-aware value.
    Utc(DateTime<Utc>),

    /// Calendar and clock fields from a zone-naive value. The zone is
    /// explicitly unspecified.
    Unzoned(NaiveDateTime),
}

impl Timestamp {
    /// Check if this timestamp carries zone information.
    pub fn is_zoned(&self) -> bool {
        matches!(self, Timestamp::Utc(_))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Utc(DateTime::<Utc>::default())
    }
}

impl fmt::Display for Timestamp {
    /// Renders in a fixed, locale-independent ISO 8601 form: RFC 3339
    /// for instants, offset-free for unzoned values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Utc(dt) => write!(f, "{}", dt.to_rfc3339()),
            Timestamp::Unzoned(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}
