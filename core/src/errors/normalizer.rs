//! Conversion of raw transport failures into user-safe errors

use recovery_shared::RecoveryConfig;

use super::types::{ErrorCategory, NormalizedError, RawError};

// Lowercase fragments that mark a connectivity failure
const NETWORK_MARKERS: &[&str] = &[
    "network",
    "connection",
    "connect error",
    "failed to fetch",
    "offline",
    "unreachable",
    "dns",
    "no internet",
];

const TIMEOUT_MARKERS: &[&str] = &["timeout", "timed out", "deadline exceeded"];

/// Single point where external failures become [`NormalizedError`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorNormalizer {
    diagnostics: bool,
}

impl ErrorNormalizer {
    /// Create a normalizer; with `diagnostics` on, raw errors are logged
    /// before being categorized
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics }
    }

    pub fn from_config(config: &RecoveryConfig) -> Self {
        Self::new(config.diagnostics)
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics
    }

    /// Categorize `raw`. The first matching rule wins:
    /// 1. no status and a connectivity message
    /// 2. a timeout message
    /// 3. a status from the fixed table
    /// 4. anything else
    pub fn normalize(&self, raw: &RawError) -> NormalizedError {
        if self.diagnostics {
            tracing::warn!(
                status = ?raw.status,
                message = ?raw.message,
                detail = ?raw.detail,
                event = "raw_error",
                "Normalizing raw failure"
            );
        }

        let lowered = raw.message.as_deref().map(str::to_lowercase);
        let mentions = |markers: &[&str]| {
            lowered
                .as_deref()
                .is_some_and(|m| markers.iter().any(|marker| m.contains(marker)))
        };

        let normalized = if raw.status.is_none() && mentions(NETWORK_MARKERS) {
            NormalizedError::from_category(ErrorCategory::Network)
        } else if mentions(TIMEOUT_MARKERS) {
            NormalizedError::from_category(ErrorCategory::Timeout)
        } else if let Some(category) = raw.status.and_then(ErrorCategory::from_status) {
            match server_message(raw) {
                Some(message) if category.echoes_server_message() => {
                    NormalizedError::new(category, message)
                }
                _ => NormalizedError::from_category(category),
            }
        } else {
            NormalizedError::from_category(ErrorCategory::Unknown)
        };

        tracing::debug!(
            category = %normalized.category,
            status = ?raw.status,
            event = "error_normalized",
            "Failure normalized"
        );

        normalized
    }
}

fn server_message(raw: &RawError) -> Option<&str> {
    raw.message
        .as_deref()
        .map(str::trim)
        .filter(|message| !message.is_empty())
}
