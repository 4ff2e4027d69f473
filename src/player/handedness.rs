//! Dominant hand of a player
//!
//! Two vocabularies exist for the same closed set:
//!
//! - in-memory tokens (`RIGHT_HANDED`, ...), used by JSON, XML and the database
//! - CSV codes (`DIESTRO`, `ZURDO`, `AMBIDIESTRO`), used by delimited files
//!
//! Both parsers are total: anything unrecognized becomes [`Handedness::Unknown`]
//! instead of failing or being dropped.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Dominant hand of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Handedness {
    RightHanded,
    LeftHanded,
    Ambidextrous,
    /// Unparseable or missing value
    #[default]
    Unknown,
}

impl Handedness {
    /// In-memory token for this variant
    pub fn as_token(&self) -> &'static str {
        match self {
            Handedness::RightHanded => "RIGHT_HANDED",
            Handedness::LeftHanded => "LEFT_HANDED",
            Handedness::Ambidextrous => "AMBIDEXTROUS",
            Handedness::Unknown => "UNKNOWN",
        }
    }

    /// CSV code for this variant
    pub fn as_csv_code(&self) -> &'static str {
        match self {
            Handedness::RightHanded => "DIESTRO",
            Handedness::LeftHanded => "ZURDO",
            Handedness::Ambidextrous => "AMBIDIESTRO",
            Handedness::Unknown => "DESCONOCIDO",
        }
    }

    /// Parse an in-memory token.
    ///
    /// CSV codes are accepted as well, since older JSON exports carried them.
    /// Matching ignores surrounding whitespace and ASCII case.
    pub fn from_token(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "RIGHT_HANDED" | "RIGHTHANDED" => Handedness::RightHanded,
            "LEFT_HANDED" | "LEFTHANDED" => Handedness::LeftHanded,
            "AMBIDEXTROUS" => Handedness::Ambidextrous,
            _ => Self::from_csv_code(raw),
        }
    }

    /// Parse a CSV code
    pub fn from_csv_code(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DIESTRO" => Handedness::RightHanded,
            "ZURDO" => Handedness::LeftHanded,
            "AMBIDIESTRO" => Handedness::Ambidextrous,
            _ => Handedness::Unknown,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

impl Serialize for Handedness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for Handedness {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Handedness::from_token(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for hand in [
            Handedness::RightHanded,
            Handedness::LeftHanded,
            Handedness::Ambidextrous,
            Handedness::Unknown,
        ] {
            assert_eq!(Handedness::from_token(hand.as_token()), hand);
            assert_eq!(Handedness::from_csv_code(hand.as_csv_code()), hand);
        }
    }

    #[test]
    fn test_token_accepts_csv_codes() {
        assert_eq!(Handedness::from_token("DIESTRO"), Handedness::RightHanded);
        assert_eq!(Handedness::from_token("zurdo"), Handedness::LeftHanded);
    }

    #[test]
    fn test_unrecognized_maps_to_unknown() {
        assert_eq!(Handedness::from_token(""), Handedness::Unknown);
        assert_eq!(Handedness::from_token("both?"), Handedness::Unknown);
        assert_eq!(Handedness::from_csv_code("RIGHT_HANDED"), Handedness::Unknown);
    }

    #[test]
    fn test_serde_is_total() {
        let hand: Handedness = serde_json::from_str("\"sideways\"").unwrap();
        assert_eq!(hand, Handedness::Unknown);
        assert_eq!(
            serde_json::to_string(&Handedness::LeftHanded).unwrap(),
            "\"LEFT_HANDED\""
        );
    }
}
