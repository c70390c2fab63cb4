//! Payment card validation: Luhn checksum, expiry and CVV

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static EXPIRY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2}|[0-9]{4})$").expect("card expiry regex"));

static CVV_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").expect("cvv regex"));

/// Shortest and longest primary account number accepted
pub const CARD_NUMBER_MIN_DIGITS: usize = 13;
pub const CARD_NUMBER_MAX_DIGITS: usize = 19;

/// Keep only ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Luhn mod-10 check over a digit string. Non-digit input is rejected.
pub fn luhn_checksum_valid(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (position, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    sum % 10 == 0
}

/// Validate a card number after stripping every non-digit character
pub fn validate_card_number(value: &str) -> bool {
    let digits = digits_only(value);
    (CARD_NUMBER_MIN_DIGITS..=CARD_NUMBER_MAX_DIGITS).contains(&digits.len())
        && luhn_checksum_valid(&digits)
}

/// Validate an `MM/YY` or `MM/YYYY` expiry against the local calendar month
pub fn validate_card_expiry(value: &str) -> bool {
    validate_card_expiry_at(value, Local::now().date_naive())
}

/// Validate an expiry against an explicit `today`. The current month is
/// still accepted; anything strictly earlier is expired.
pub fn validate_card_expiry_at(value: &str, today: NaiveDate) -> bool {
    let Some(captures) = EXPIRY_REGEX.captures(value.trim()) else {
        return false;
    };

    let (Ok(month), Ok(year)) = (captures[1].parse::<u32>(), captures[2].parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    let year = if captures[2].len() == 2 {
        if year < 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    };

    (year, month) >= (today.year(), today.month())
}

/// CVV is exactly three or four digits
pub fn validate_cvv(value: &str) -> bool {
    CVV_REGEX.is_match(value)
}

/// Mask a card number for display, leaving the last four digits visible
pub fn mask_card_number(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() >= 4 {
        format!("**** {}", &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luhn_check_digit(payload: &str) -> char {
        // Appending 0 then measuring the shortfall gives the check digit
        let candidate = format!("{}0", payload);
        let mut sum = 0u32;
        for (position, c) in candidate.chars().rev().enumerate() {
            let mut digit = c.to_digit(10).unwrap();
            if position % 2 == 1 {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }
            sum += digit;
        }
        char::from_digit((10 - sum % 10) % 10, 10).unwrap()
    }

    fn generated_cards() -> Vec<String> {
        let prefixes = [
            "411111111111", "55000000000000", "340000000000", "601100000000000",
            "353011133330000", "630490017740292", "4000056655665", "222100000000000000",
        ];
        prefixes
            .iter()
            .map(|p| format!("{}{}", p, luhn_check_digit(p)))
            .collect()
    }

    #[test]
    fn test_generated_cards_are_valid() {
        for card in generated_cards() {
            assert!(validate_card_number(&card), "{} should pass", card);
        }
    }

    #[test]
    fn test_single_digit_substitution_is_detected() {
        for card in generated_cards() {
            for index in 0..card.len() {
                let original = card.as_bytes()[index];
                for replacement in b'0'..=b'9' {
                    if replacement == original {
                        continue;
                    }
                    let mut mutated = card.clone().into_bytes();
                    mutated[index] = replacement;
                    let mutated = String::from_utf8(mutated).unwrap();
                    assert!(!validate_card_number(&mutated), "{} should fail", mutated);
                }
            }
        }
    }

    #[test]
    fn test_card_number_formatting_and_length() {
        assert!(validate_card_number("4111 1111 1111 1111"));
        assert!(validate_card_number("4111-1111-1111-1111"));
        assert!(!validate_card_number("4111 1111 1111 1112"));
        assert!(!validate_card_number("0000000000")); // Luhn-valid but too short
        assert!(!validate_card_number("00000000000000000000")); // Too long
        assert!(!validate_card_number(""));
    }

    #[test]
    fn test_luhn_rejects_non_digits() {
        assert!(!luhn_checksum_valid("4111a"));
        assert!(!luhn_checksum_valid(""));
        assert!(luhn_checksum_valid("79927398713"));
    }

    #[test]
    fn test_card_expiry() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        assert!(!validate_card_expiry_at("01/20", today));
        assert!(!validate_card_expiry_at("13/25", today));
        assert!(!validate_card_expiry_at("00/30", today));
        assert!(validate_card_expiry_at("10/26", today)); // Current month
        assert!(!validate_card_expiry_at("09/26", today));
        assert!(validate_card_expiry_at("01/2031", today));
        assert!(!validate_card_expiry_at("12/99", today)); // 1999
        assert!(validate_card_expiry_at("12/49", today)); // 2049
        assert!(!validate_card_expiry_at("1/30", today));
        assert!(!validate_card_expiry_at("12-30", today));
    }

    #[test]
    fn test_card_expiry_current_month_with_local_clock() {
        let now = Local::now();
        let current = format!("{:02}/{:02}", now.month(), now.year() % 100);
        assert!(validate_card_expiry(&current));
        assert!(!validate_card_expiry("01/20"));
    }

    #[test]
    fn test_cvv() {
        assert!(validate_cvv("123"));
        assert!(validate_cvv("1234"));
        assert!(!validate_cvv("12"));
        assert!(!validate_cvv("12345"));
        assert!(!validate_cvv("12a"));
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4111 1111 1111 1111"), "**** 1111");
        assert_eq!(mask_card_number("12"), "****");
    }
}
