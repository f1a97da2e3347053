//! Property-based tests for plate recognition and formatting.

use proptest::prelude::*;
use vehicle_validator::{format_plate, is_valid_plate, normalize_plate};

/// Straight-line reading of the two canonical shapes
fn is_canonical(plate: &str) -> bool {
    let bytes = plate.as_bytes();
    if bytes.len() < 3 {
        return false;
    }
    let (letters, rest) = bytes.split_at(3);
    let digits = rest.strip_prefix(b"-").unwrap_or(rest);
    letters.iter().all(|c| c.is_ascii_uppercase())
        && (3..=4).contains(&digits.len())
        && digits.iter().all(|c| c.is_ascii_digit())
}

/// Mostly plate-like strings, so both outcomes are well represented
fn arb_plate_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]{3}-?[0-9]{3,4}",
        "[A-Za-z]{2,4}-{0,2}[0-9]{2,5}",
        "[A-Za-z0-9 ñÑ-]{0,10}",
    ]
}

proptest! {
    #[test]
    fn canonical_plates_are_recognized(plate in "[A-Z]{3}-?[0-9]{3,4}") {
        prop_assert!(is_valid_plate(&plate));
    }

    #[test]
    fn recognition_accepts_exactly_canonical_shapes(plate in arb_plate_like()) {
        prop_assert_eq!(is_valid_plate(&plate), is_canonical(&plate));
    }

    #[test]
    fn normalize_is_idempotent(plate in arb_plate_like()) {
        let once = normalize_plate(&plate);
        prop_assert_eq!(normalize_plate(&once), once);
    }

    #[test]
    fn format_depends_only_on_normalized_form(plate in arb_plate_like()) {
        prop_assert_eq!(format_plate(&normalize_plate(&plate)), format_plate(&plate));
    }

    #[test]
    fn formatted_canonical_plates_stay_valid(plate in "[a-zA-Z]{3}-?[0-9]{3,4}") {
        let formatted = format_plate(&plate);
        prop_assert!(is_valid_plate(&formatted));
        prop_assert_eq!(formatted.chars().nth(3), Some('-'));
    }
}
