//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Regional mobile numbering: ten digits, leading 6-9
static MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile number regex"));

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a valid ten-digit mobile number.
///
/// Only whitespace is ignored; any other separator makes the value invalid.
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    MOBILE_REGEX.is_match(&compact)
}

/// Mask a phone number for display and logs (e.g., 987****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
