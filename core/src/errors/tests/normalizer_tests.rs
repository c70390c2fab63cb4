//! Unit tests for error normalization

use crate::errors::{ErrorCategory, ErrorNormalizer, NormalizedError, RawError};

fn normalize(raw: RawError) -> NormalizedError {
    ErrorNormalizer::new(false).normalize(&raw)
}

#[test]
fn test_not_found_ignores_server_message() {
    let result = normalize(RawError::status(404).with_message("/internal/users/42 missing"));
    assert_eq!(result.category, ErrorCategory::NotFound);
    assert_eq!(result.message, ErrorCategory::NotFound.default_message());
}

#[test]
fn test_echo_allowed_statuses_prefer_server_message() {
    for (status, category) in [
        (400, ErrorCategory::BadRequest),
        (409, ErrorCategory::Conflict),
        (422, ErrorCategory::UnprocessableInput),
    ] {
        let result = normalize(RawError::status(status).with_message("  Code has expired  "));
        assert_eq!(result.category, category);
        assert_eq!(result.message, "Code has expired");
    }
}

#[test]
fn test_echo_allowed_status_without_message_uses_default() {
    let result = normalize(RawError::status(422).with_message("   "));
    assert_eq!(result.category, ErrorCategory::UnprocessableInput);
    assert_eq!(result.message, ErrorCategory::UnprocessableInput.default_message());
}

#[test]
fn test_status_table() {
    let cases = [
        (401, ErrorCategory::Unauthorized),
        (403, ErrorCategory::Forbidden),
        (429, ErrorCategory::RateLimited),
        (500, ErrorCategory::ServerError),
        (502, ErrorCategory::ServiceUnavailable),
        (503, ErrorCategory::ServiceUnavailable),
        (504, ErrorCategory::ServiceUnavailable),
        (507, ErrorCategory::ServerError),
    ];
    for (status, category) in cases {
        let result = normalize(RawError::status(status).with_message("stack trace at line 12"));
        assert_eq!(result.category, category, "status {}", status);
        assert_eq!(result.message, category.default_message());
    }
}

#[test]
fn test_unmapped_status_is_unknown() {
    assert_eq!(normalize(RawError::status(418)).category, ErrorCategory::Unknown);
    assert_eq!(normalize(RawError::status(302)).category, ErrorCategory::Unknown);
}

#[test]
fn test_network_failure_without_status() {
    let result = normalize(RawError::message("TypeError: Network request failed"));
    assert_eq!(result.category, ErrorCategory::Network);

    let result = normalize(RawError::network("dns lookup failed"));
    assert_eq!(result.category, ErrorCategory::Network);
}

#[test]
fn test_network_message_with_status_uses_table() {
    let result = normalize(RawError::status(503).with_message("upstream connection reset"));
    assert_eq!(result.category, ErrorCategory::ServiceUnavailable);
}

#[test]
fn test_timeout_message() {
    assert_eq!(normalize(RawError::timeout()).category, ErrorCategory::Timeout);
    assert_eq!(
        normalize(RawError::message("Request Timeout after 15000ms")).category,
        ErrorCategory::Timeout
    );
    // Timeout wording outranks the status table
    assert_eq!(
        normalize(RawError::status(504).with_message("gateway timed out")).category,
        ErrorCategory::Timeout
    );
}

#[test]
fn test_unknown_fallback_hides_raw_text() {
    let result = normalize(
        RawError::message("NullPointerException at com.example.Service")
            .with_detail("full stack trace"),
    );
    assert_eq!(result.category, ErrorCategory::Unknown);
    assert!(!result.message.contains("NullPointerException"));

    assert_eq!(normalize(RawError::default()).category, ErrorCategory::Unknown);
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_converts_to_timeout() {
    let elapsed = tokio::time::timeout(
        std::time::Duration::from_millis(10),
        std::future::pending::<()>(),
    )
    .await
    .unwrap_err();

    let result = normalize(RawError::from(elapsed));
    assert_eq!(result.category, ErrorCategory::Timeout);
}

#[test]
fn test_io_errors() {
    use std::io::{Error, ErrorKind};

    let refused = RawError::from(Error::new(ErrorKind::ConnectionRefused, "refused"));
    assert_eq!(normalize(refused.clone()).category, ErrorCategory::Network);
    assert!(refused.detail.is_some());

    let timed_out = RawError::from(Error::new(ErrorKind::TimedOut, "slow"));
    assert_eq!(normalize(timed_out).category, ErrorCategory::Timeout);
}

#[test]
fn test_diagnostics_do_not_change_result() {
    let raw = RawError::status(401).with_detail("token abc expired");
    let quiet = ErrorNormalizer::new(false).normalize(&raw);
    let loud = ErrorNormalizer::new(true).normalize(&raw);
    assert_eq!(quiet, loud);
    assert!(ErrorNormalizer::new(true).diagnostics_enabled());
}

#[test]
fn test_only_production_config_silences_diagnostics() {
    use recovery_shared::{Environment, RecoveryConfig};

    let staging = RecoveryConfig::for_environment(Environment::Staging);
    assert!(ErrorNormalizer::from_config(&staging).diagnostics_enabled());
    assert!(!ErrorNormalizer::from_config(&RecoveryConfig::production()).diagnostics_enabled());
}

#[test]
fn test_normalized_error_serializes_for_display() {
    let error = NormalizedError::from_category(ErrorCategory::RateLimited);
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["category"], "rate_limited");
    assert_eq!(json["message"], ErrorCategory::RateLimited.default_message());
    assert_eq!(error.code(), "RATE_LIMIT_EXCEEDED");
    assert_eq!(error.to_string(), error.message);
}
