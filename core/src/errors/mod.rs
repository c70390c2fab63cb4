//! Error types and failure normalization.

mod normalizer;
mod types;

#[cfg(test)]
mod tests;

pub use normalizer::ErrorNormalizer;
pub use types::{ErrorCategory, NormalizedError, RawError};

use thiserror::Error;

/// Reasons a code submission did not produce a verified session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Not every slot holds a digit; the verifier was not contacted
    #[error("Please enter all {expected} digits of the code")]
    ValidationFailed { filled: usize, expected: usize },

    /// Tapped again inside the double-submit window; the verifier was not
    /// contacted and the session is unchanged
    #[error("Submission ignored")]
    Dropped,

    /// Session observed mid-request. Operations borrow the session
    /// exclusively, so the public API does not produce this today.
    #[error("A verification request is already in progress")]
    InFlight,

    #[error("This session has already been verified")]
    AlreadyVerified,

    #[error(transparent)]
    Rejected(#[from] NormalizedError),
}

/// Reasons a resend request failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResendError {
    /// Same as [`SubmitError::InFlight`]
    #[error("A verification request is already in progress")]
    InFlight,

    #[error("This session has already been verified")]
    AlreadyVerified,

    #[error(transparent)]
    Rejected(#[from] NormalizedError),
}

/// Invalid digit entry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigitError {
    #[error("Slot {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Pasted value must contain exactly {expected} digits")]
    InvalidPaste { expected: usize },

    #[error("This session has already been verified")]
    SessionClosed,
}
