//! License Plate Recognition and Formatting
//!
//! Two plate shapes are canonical: `ABC-1234` (dashed) and `ABC1234`
//! (undashed), three uppercase letters followed by three or four digits.

use regex::Regex;
use std::sync::LazyLock;

/// Canonical plate pattern, dashed or undashed
pub(crate) static PLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}-?[0-9]{3,4}$").expect("valid plate regex"));

/// Length of the letter prefix; the dash goes right after it
const PREFIX_LEN: usize = 3;

/// Minimum normalized length before a dash is inserted
const MIN_FORMAT_LEN: usize = 6;

/// Check whether a plate matches one of the canonical shapes (case-sensitive)
pub fn is_valid_plate(plate: &str) -> bool {
    PLATE_RE.is_match(plate)
}

/// Remove dashes and uppercase. Performs no validation.
pub fn normalize_plate(plate: &str) -> String {
    plate.replace('-', "").to_uppercase()
}

/// Normalize, then re-insert the dash after the letter prefix.
///
/// Inputs too short to hold a full plate come back normalized but otherwise
/// unchanged: `"ab-1"` formats to `"AB1"`.
pub fn format_plate(plate: &str) -> String {
    let normalized = normalize_plate(plate);
    if normalized.chars().count() < MIN_FORMAT_LEN {
        return normalized;
    }

    // Split on a char boundary so multi-byte input cannot panic
    let split = normalized
        .char_indices()
        .nth(PREFIX_LEN)
        .map(|(idx, _)| idx)
        .unwrap_or(normalized.len());
    format!("{}-{}", &normalized[..split], &normalized[split..])
}
