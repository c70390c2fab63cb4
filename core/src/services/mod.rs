//! Services containing the verification flow logic.

pub mod cooldown;
pub mod submission_guard;
pub mod verification;

// Re-export commonly used types
pub use cooldown::{CooldownPhase, CooldownState, CooldownTicker, ResendCooldownTimer};
pub use submission_guard::{guard, Guarded, SubmissionGuard};
pub use verification::{
    ContinuationToken, OtpSnapshot, OtpVerification, ResendOutcome, VerificationTransport,
};
