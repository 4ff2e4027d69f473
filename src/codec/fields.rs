//! Field parsing shared by the text-based codecs
//!
//! Errors are plain reasons; the calling codec wraps them with its format
//! and the row or entry position.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::player;

/// Parse a numeric or boolean field
pub fn parse_value<T>(field: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| format!("invalid {field} '{}': {e}", raw.trim()))
}

/// Parse a `YYYY-MM-DD` birth date
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, String> {
    player::parse_date(raw).map_err(|e| format!("invalid birth date '{}': {e}", raw.trim()))
}

/// Parse a timestamp field
pub fn parse_timestamp(field: &str, raw: &str) -> Result<NaiveDateTime, String> {
    player::parse_date_time(raw).map_err(|e| format!("invalid {field} '{}': {e}", raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_reports_field() {
        assert_eq!(parse_value::<i32>("weight", " 77 ").unwrap(), 77);
        let err = parse_value::<u32>("points", "-3").unwrap_err();
        assert!(err.contains("points"));
        assert!(err.contains("-3"));
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(
            parse_birth_date("1987-05-22").unwrap(),
            NaiveDate::from_ymd_opt(1987, 5, 22).unwrap()
        );
        assert!(parse_birth_date("22/05/1987").is_err());
    }
}
