//! OTP verification session
//!
//! Drives code entry, submission, resend, and the resend cooldown for one
//! recovery challenge. Transport failures are normalized before they are
//! exposed.

mod service;
mod traits;
mod types;


pub use service::OtpVerification;
pub use traits::VerificationTransport;
pub use types::{ContinuationToken, OtpSnapshot, ResendOutcome};
