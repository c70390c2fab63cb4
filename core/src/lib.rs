//! # Recovery Core
//!
//! Account-recovery verification core: the OTP challenge state machine, the
//! resend cooldown, submission debouncing, and the layer that turns raw
//! transport failures into user-safe error categories. Field validation
//! lives in `recovery_shared` and is re-exported here as [`validation`].

pub mod domain;
pub mod errors;
pub mod services;

pub use recovery_shared::utils as validation;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
