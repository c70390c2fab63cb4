//! OTP session and submission guard configuration

use serde::{Deserialize, Serialize};

/// Number of slots in a one-time passcode
pub const OTP_CODE_LENGTH: usize = 6;

/// Default seconds a user must wait between resend requests
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u32 = 60;

/// Default minimum interval between accepted submissions of one action
pub const DEFAULT_GUARD_INTERVAL_MS: u64 = 500;

/// Default upper bound for a single verify/resend round trip
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

/// When the resend cooldown is restarted after a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownResetPolicy {
    /// Restart only when the resend request succeeded
    #[default]
    OnSuccess,
    /// Restart whenever the resend request completed, successful or not
    OnCompletion,
}

impl std::str::FromStr for CooldownResetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on_success" | "success" => Ok(CooldownResetPolicy::OnSuccess),
            "on_completion" | "completion" | "always" => Ok(CooldownResetPolicy::OnCompletion),
            _ => Err(format!("Invalid cooldown reset policy: {}", s)),
        }
    }
}

/// Configuration for a single OTP verification session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Seconds the resend action stays locked after a dispatch
    pub resend_cooldown_seconds: u32,

    /// Policy applied when a resend dispatch completes
    pub cooldown_reset_policy: CooldownResetPolicy,

    /// Deadline for each verify/resend transport call in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            cooldown_reset_policy: CooldownResetPolicy::default(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl OtpConfig {
    /// Set the cooldown seed
    pub fn with_resend_cooldown(mut self, seconds: u32) -> Self {
        self.resend_cooldown_seconds = seconds;
        self
    }

    /// Set the resend reset policy
    pub fn with_reset_policy(mut self, policy: CooldownResetPolicy) -> Self {
        self.cooldown_reset_policy = policy;
        self
    }

    /// Set the transport deadline
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }
}

/// Submission guard configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Calls arriving sooner than this after the last accepted one are dropped
    pub min_interval_ms: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: DEFAULT_GUARD_INTERVAL_MS,
        }
    }
}
