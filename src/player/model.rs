//! Player record
//!
//! The repository owns the authoritative copy of every player. A freshly
//! constructed player has `id == 0` until the repository assigns one.

use chrono::{NaiveDate, NaiveDateTime, ParseResult};
use serde::{Deserialize, Serialize};

use super::Handedness;

/// Textual form used for timestamps in every external format
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Textual form used for birth dates in every external format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Id carried by a player that has not been persisted yet
pub const UNASSIGNED_ID: i64 = 0;

/// Current local time, used to stamp records
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Format a timestamp for export
pub fn format_date_time(value: &NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Parse a timestamp, with or without seconds
pub fn parse_date_time(raw: &str) -> ParseResult<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
}

/// Parse a birth date
pub fn parse_date(raw: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

/// Serde adapter so every format reads and writes timestamps alike
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date_time(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_time(&raw)
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}

/// A player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Repository-assigned key, `0` before persistence
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub country: String,
    /// Kilograms
    pub weight: i32,
    /// Centimetres
    pub height: f64,
    #[serde(default)]
    pub dominant_hand: Handedness,
    pub points: u32,
    pub birth_date: NaiveDate,
    #[serde(default = "now", with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default = "now", with = "timestamp")]
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Player {
    /// Create an unpersisted player stamped with the current time
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        weight: i32,
        height: f64,
        dominant_hand: Handedness,
        points: u32,
        birth_date: NaiveDate,
    ) -> Self {
        let stamp = now();
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            country: country.into(),
            weight,
            height,
            dominant_hand,
            points,
            birth_date,
            created_at: stamp,
            updated_at: stamp,
            is_deleted: false,
        }
    }

    /// Set the id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Whether the repository has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    /// Not soft-deleted
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
