//! Domain entities representing core business objects.

pub mod otp_session;


// Re-export commonly used types
pub use otp_session::{AttemptState, FocusIntent, OtpDigits, CODE_LENGTH};
