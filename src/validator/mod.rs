//! Player validation
//!
//! Runs before every mutation. Checks run in a fixed order and stop at the
//! first failure:
//!
//! 1. name is non-empty
//! 2. country is non-empty
//! 3. weight is within [0, 400]
//! 4. height is within [0, 400]
//!
//! Handedness and birth date are not checked; an unparseable handedness is
//! stored as `Unknown`.
//!
//! Validation is pure: it never mutates the player and never logs.

mod errors;

pub use errors::{ValidationError, ValidationResult};

use crate::player::Player;

/// Lower bound for weight and height
pub const MIN_MEASURE: f64 = 0.0;

/// Upper bound for weight and height
pub const MAX_MEASURE: f64 = 400.0;

/// Validate a player, returning it unchanged on success.
pub fn validate(player: &Player) -> ValidationResult<&Player> {
    if player.name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if player.country.is_empty() {
        return Err(ValidationError::EmptyCountry {
            name: player.name.clone(),
        });
    }

    if !in_range(f64::from(player.weight)) {
        return Err(ValidationError::WeightOutOfRange {
            name: player.name.clone(),
            weight: player.weight,
        });
    }

    // NaN fails the range check too
    if !in_range(player.height) {
        return Err(ValidationError::HeightOutOfRange {
            name: player.name.clone(),
            height: player.height,
        });
    }

    Ok(player)
}

fn in_range(value: f64) -> bool {
    (MIN_MEASURE..=MAX_MEASURE).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Handedness;
    use chrono::NaiveDate;

    fn make_player(name: &str, country: &str, weight: i32, height: f64) -> Player {
        Player::new(
            name,
            country,
            weight,
            height,
            Handedness::RightHanded,
            5000,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_valid_player_is_returned_unchanged() {
        let player = make_player("Valid Name", "Valid Country", 80, 185.0);
        let validated = validate(&player).unwrap();
        assert_eq!(validated, &player);
        assert!(std::ptr::eq(validated, &player));
    }

    #[test]
    fn test_empty_name_rejected() {
        let player = make_player("", "Valid Country", 80, 185.0);
        assert_eq!(validate(&player).unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn test_empty_country_rejected_with_name() {
        let player = make_player("Valid Name", "", 80, 185.0);
        let err = validate(&player).unwrap_err();
        assert_eq!(err.field(), "country");
        assert!(err.to_string().contains("Valid Name"));
    }

    #[test]
    fn test_weight_bounds() {
        for weight in [-1, 401] {
            let err = validate(&make_player("Valid Name", "Valid Country", weight, 185.0))
                .unwrap_err();
            assert_eq!(err.field(), "weight");
            assert!(err.to_string().contains("Valid Name"));
        }
        for weight in [0, 400] {
            assert!(validate(&make_player("Valid Name", "Valid Country", weight, 185.0)).is_ok());
        }
    }

    #[test]
    fn test_height_bounds() {
        for height in [-1.0, 401.0, 400.01, f64::NAN] {
            let err = validate(&make_player("Valid Name", "Valid Country", 80, height))
                .unwrap_err();
            assert_eq!(err.field(), "height");
        }
        for height in [0.0, 400.0] {
            assert!(validate(&make_player("Valid Name", "Valid Country", 80, height)).is_ok());
        }
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        let player = make_player("", "", -5, -5.0);
        assert_eq!(validate(&player).unwrap_err().field(), "name");

        let player = make_player("A", "", -5, -5.0);
        assert_eq!(validate(&player).unwrap_err().field(), "country");

        let player = make_player("A", "B", -5, -5.0);
        assert_eq!(validate(&player).unwrap_err().field(), "weight");
    }
}
