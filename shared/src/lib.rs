//! Shared utilities and common types for the recovery core
//!
//! This crate provides common functionality used by the verification flow:
//! - Configuration types and environment detection
//! - Tracing subscriber setup
//! - Field validation (email, phone, pincode, UPI, card, password)
//! - Input sanitization

pub mod config;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ConfigError, CooldownResetPolicy, Environment, GuardConfig, LogFormat, LoggingConfig,
    OtpConfig, RecoveryConfig, OTP_CODE_LENGTH,
};
pub use telemetry::init_tracing;
pub use utils::{card, phone, sanitize, validation};
