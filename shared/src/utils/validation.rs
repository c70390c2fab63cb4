//! Field validation rules
//!
//! Every validator is total: it classifies the raw value and never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use super::card::{validate_card_expiry, validate_card_number, validate_cvv};
use super::phone::validate_phone;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PINCODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("pincode regex"));

static UPI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{2,}@[A-Za-z]{2,}$").expect("upi regex"));

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Symbols accepted for the password symbol requirement
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Kinds of field the engine knows how to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Phone,
    Pincode,
    Upi,
    CardNumber,
    CardExpiry,
    Cvv,
    Password,
}

impl FieldKind {
    /// Error code reported for an invalid value of this kind
    pub fn error_code(&self) -> &'static str {
        match self {
            FieldKind::Email => "EMAIL_INVALID",
            FieldKind::Phone => "PHONE_INVALID",
            FieldKind::Pincode => "PINCODE_INVALID",
            FieldKind::Upi => "UPI_INVALID",
            FieldKind::CardNumber => "CARD_NUMBER_INVALID",
            FieldKind::CardExpiry => "CARD_EXPIRY_INVALID",
            FieldKind::Cvv => "CVV_INVALID",
            FieldKind::Password => "PASSWORD_WEAK",
        }
    }

    fn invalid_message(&self) -> &'static str {
        match self {
            FieldKind::Email => "Please enter a valid email address",
            FieldKind::Phone => "Please enter a valid 10-digit mobile number",
            FieldKind::Pincode => "Please enter a valid 6-digit pincode",
            FieldKind::Upi => "Please enter a valid UPI ID (e.g. name@bank)",
            FieldKind::CardNumber => "Please enter a valid card number",
            FieldKind::CardExpiry => "Please enter a valid, unexpired date (MM/YY)",
            FieldKind::Cvv => "Please enter a valid CVV",
            FieldKind::Password => "Password does not meet the requirements",
        }
    }
}

/// Verdict of a single validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FieldVerdict {
    pub fn valid() -> Self {
        Self { valid: true, reason: None }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// A single password rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRequirement {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl PasswordRequirement {
    /// All requirements in the order they are reported
    pub const ALL: [PasswordRequirement; 5] = [
        PasswordRequirement::MinLength,
        PasswordRequirement::Uppercase,
        PasswordRequirement::Lowercase,
        PasswordRequirement::Digit,
        PasswordRequirement::Symbol,
    ];

    fn is_met(&self, password: &str) -> bool {
        match self {
            PasswordRequirement::MinLength => password.chars().count() >= PASSWORD_MIN_LENGTH,
            PasswordRequirement::Uppercase => password.chars().any(char::is_uppercase),
            PasswordRequirement::Lowercase => password.chars().any(char::is_lowercase),
            PasswordRequirement::Digit => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRequirement::Symbol => password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }

    /// Guidance shown to the user when the requirement is unmet
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRequirement::MinLength => "At least 8 characters",
            PasswordRequirement::Uppercase => "One uppercase letter",
            PasswordRequirement::Lowercase => "One lowercase letter",
            PasswordRequirement::Digit => "One number",
            PasswordRequirement::Symbol => "One special character (!@#$%^&*)",
        }
    }
}

/// Result of checking a password against every requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCheck {
    pub unmet: Vec<PasswordRequirement>,
}

impl PasswordCheck {
    pub fn is_valid(&self) -> bool {
        self.unmet.is_empty()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.unmet.iter().map(PasswordRequirement::message).collect()
    }
}

/// `local@domain.tld` shape check; no DNS or mailbox lookup
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Six digits, not starting with zero
pub fn validate_pincode(pincode: &str) -> bool {
    PINCODE_REGEX.is_match(pincode)
}

/// `handle@provider` virtual payment address
pub fn validate_upi(upi: &str) -> bool {
    UPI_REGEX.is_match(upi)
}

/// Report every unmet password requirement, in a fixed order
pub fn validate_password(password: &str) -> PasswordCheck {
    PasswordCheck {
        unmet: PasswordRequirement::ALL
            .into_iter()
            .filter(|requirement| !requirement.is_met(password))
            .collect(),
    }
}

/// Apply the rule for `kind` to `value`
pub fn validate_field(kind: FieldKind, value: &str) -> FieldVerdict {
    let valid = match kind {
        FieldKind::Email => validate_email(value),
        FieldKind::Phone => validate_phone(value),
        FieldKind::Pincode => validate_pincode(value),
        FieldKind::Upi => validate_upi(value),
        FieldKind::CardNumber => validate_card_number(value),
        FieldKind::CardExpiry => validate_card_expiry(value),
        FieldKind::Cvv => validate_cvv(value),
        FieldKind::Password => {
            let check = validate_password(value);
            if check.is_valid() {
                return FieldVerdict::valid();
            }
            return FieldVerdict::invalid(format!(
                "Password must contain: {}",
                check.messages().join(", ")
            ));
        }
    };

    if valid {
        FieldVerdict::valid()
    } else {
        FieldVerdict::invalid(kind.invalid_message())
    }
}

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(ValidationError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }
}

/// Validate a whole form. Passwords contribute one error per unmet requirement.
pub fn validate_fields(fields: &[(&str, FieldKind, &str)]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for &(field, kind, value) in fields {
        if kind == FieldKind::Password {
            for requirement in validate_password(value).unmet {
                errors.add_error(field, requirement.message(), kind.error_code());
            }
            continue;
        }

        if let Some(reason) = validate_field(kind, value).reason {
            errors.add_error(field, reason, kind.error_code());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("first.last+tag@mail.example.co.in"));
        assert!(!validate_email("user@localhost"));
        assert!(!validate_email("user example@mail.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_pincode() {
        assert!(validate_pincode("411001"));
        assert!(!validate_pincode("011001"));
        assert!(!validate_pincode("41100"));
        assert!(!validate_pincode("4110011"));
        assert!(!validate_pincode("41100a"));
    }

    #[test]
    fn test_validate_upi() {
        assert!(validate_upi("john.doe@okaxis"));
        assert!(validate_upi("a1-b_c@ybl"));
        assert!(!validate_upi("j@okaxis")); // Handle too short
        assert!(!validate_upi("john@o")); // Provider too short
        assert!(!validate_upi("john@ok1"));
        assert!(!validate_upi("john doe@okaxis"));
        assert!(!validate_upi("johnokaxis"));
    }

    #[test]
    fn test_validate_password_reports_all_unmet() {
        let check = validate_password("abc");
        assert!(!check.is_valid());
        assert_eq!(
            check.unmet,
            vec![
                PasswordRequirement::MinLength,
                PasswordRequirement::Uppercase,
                PasswordRequirement::Digit,
                PasswordRequirement::Symbol,
            ]
        );

        let check = validate_password("Abcd123!");
        assert!(check.is_valid());
        assert!(check.unmet.is_empty());

        let check = validate_password("");
        assert_eq!(check.unmet.len(), 5);
    }

    #[test]
    fn test_validate_field_verdicts() {
        assert_eq!(validate_field(FieldKind::Phone, "9876543210"), FieldVerdict::valid());
        assert_eq!(validate_field(FieldKind::Cvv, "123"), FieldVerdict::valid());

        let verdict = validate_field(FieldKind::Pincode, "000000");
        assert!(!verdict.valid);
        assert!(verdict.reason.unwrap().contains("pincode"));

        let verdict = validate_field(FieldKind::Password, "abcdefgh");
        assert!(!verdict.valid);
        let reason = verdict.reason.unwrap();
        assert!(reason.contains("One uppercase letter"));
        assert!(!reason.contains("At least 8 characters"));
    }

    #[test]
    fn test_validate_fields_groups_errors() {
        let result = validate_fields(&[
            ("email", FieldKind::Email, "user@example.com"),
            ("phone", FieldKind::Phone, "12345"),
            ("password", FieldKind::Password, "abc"),
        ]);

        let errors = result.unwrap_err();
        assert_eq!(errors.errors().len(), 5);
        assert_eq!(errors.errors()[0].code, "PHONE_INVALID");

        let grouped = errors.to_field_errors();
        assert_eq!(grouped["phone"].len(), 1);
        assert_eq!(grouped["password"].len(), 4);
        assert!(!grouped.contains_key("email"));
    }

    #[test]
    fn test_validate_fields_accepts_valid_form() {
        assert!(validate_fields(&[
            ("upi", FieldKind::Upi, "john.doe@okaxis"),
            ("card", FieldKind::CardNumber, "4111 1111 1111 1111"),
            ("password", FieldKind::Password, "Abcd123!"),
        ])
        .is_ok());
    }
}
