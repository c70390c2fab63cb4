//! Raw failure and user-safe error types
//!
//! A [`RawError`] is whatever the transport produced. A [`NormalizedError`]
//! is what the caller is allowed to show; it never carries raw server text
//! except for the statuses listed in [`ErrorCategory::echoes_server_message`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Closed set of user-facing failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Network,
    Timeout,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableInput,
    RateLimited,
    ServerError,
    ServiceUnavailable,
    Unknown,
}

impl ErrorCategory {
    /// Fixed status table. Unlisted 5xx statuses count as server errors;
    /// any other unlisted status has no category.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(ErrorCategory::BadRequest),
            401 => Some(ErrorCategory::Unauthorized),
            403 => Some(ErrorCategory::Forbidden),
            404 => Some(ErrorCategory::NotFound),
            409 => Some(ErrorCategory::Conflict),
            422 => Some(ErrorCategory::UnprocessableInput),
            429 => Some(ErrorCategory::RateLimited),
            500 => Some(ErrorCategory::ServerError),
            502..=504 => Some(ErrorCategory::ServiceUnavailable),
            501 | 505..=599 => Some(ErrorCategory::ServerError),
            _ => None,
        }
    }

    /// Whether a server-authored message may replace the default text
    pub fn echoes_server_message(&self) -> bool {
        matches!(
            self,
            ErrorCategory::BadRequest | ErrorCategory::Conflict | ErrorCategory::UnprocessableInput
        )
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "NETWORK_ERROR",
            ErrorCategory::Timeout => "TIMEOUT",
            ErrorCategory::BadRequest => "BAD_REQUEST",
            ErrorCategory::Unauthorized => "UNAUTHORIZED",
            ErrorCategory::Forbidden => "FORBIDDEN",
            ErrorCategory::NotFound => "NOT_FOUND",
            ErrorCategory::Conflict => "CONFLICT",
            ErrorCategory::UnprocessableInput => "UNPROCESSABLE_INPUT",
            ErrorCategory::RateLimited => "RATE_LIMIT_EXCEEDED",
            ErrorCategory::ServerError => "INTERNAL_ERROR",
            ErrorCategory::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCategory::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Default user-facing message
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCategory::Network => {
                "Unable to connect. Please check your internet connection and try again."
            }
            ErrorCategory::Timeout => "The request timed out. Please try again.",
            ErrorCategory::BadRequest => "Invalid request. Please check your input and try again.",
            ErrorCategory::Unauthorized => "Your session has expired. Please sign in again.",
            ErrorCategory::Forbidden => "You do not have permission to perform this action.",
            ErrorCategory::NotFound => "The requested resource was not found.",
            ErrorCategory::Conflict => "This request conflicts with existing data.",
            ErrorCategory::UnprocessableInput => {
                "The information provided could not be processed. Please review it and try again."
            }
            ErrorCategory::RateLimited => "Too many attempts. Please wait a moment and try again.",
            ErrorCategory::ServerError => "Something went wrong on our end. Please try again later.",
            ErrorCategory::ServiceUnavailable => {
                "The service is temporarily unavailable. Please try again later."
            }
            ErrorCategory::Unknown => "An unexpected error occurred. Please try again.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Categorized, presentation-safe error
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct NormalizedError {
    pub category: ErrorCategory,
    pub message: String,
}

impl NormalizedError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Error carrying the category's default message
    pub fn from_category(category: ErrorCategory) -> Self {
        Self::new(category, category.default_message())
    }

    pub fn code(&self) -> &'static str {
        self.category.code()
    }
}

/// Failure as reported by a transport.
///
/// `detail` is for diagnostics only (stack traces, internal identifiers) and
/// never reaches the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawError {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub detail: Option<String>,
}

impl RawError {
    /// Failure with an HTTP-style status code
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Failure with no status, only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Connectivity failure before any response arrived
    pub fn network(reason: impl Into<String>) -> Self {
        Self::message(format!("network error: {}", reason.into()))
    }

    /// Request exceeded its deadline
    pub fn timeout() -> Self {
        Self::message("request timed out")
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.message.as_deref()) {
            (Some(status), Some(message)) => write!(f, "status {}: {}", status, message),
            (Some(status), None) => write!(f, "status {}", status),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("unknown failure"),
        }
    }
}

impl std::error::Error for RawError {}

impl From<tokio::time::error::Elapsed> for RawError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        RawError::timeout()
    }
}

impl From<std::io::Error> for RawError {
    fn from(error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let raw = match error.kind() {
            ErrorKind::TimedOut => RawError::timeout(),
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::AddrNotAvailable
            | ErrorKind::BrokenPipe => RawError::network(error.to_string()),
            _ => RawError::message(error.to_string()),
        };
        raw.with_detail(format!("{:?}", error))
    }
}
