//! Configuration module
//!
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP session, resend cooldown and submission guard settings

pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{CooldownResetPolicy, GuardConfig, OtpConfig, OTP_CODE_LENGTH};

/// Errors raised while reading configuration from the environment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Complete configuration for the recovery core
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecoveryConfig {
    /// Environment configuration
    pub environment: Environment,

    /// OTP session configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Submission guard configuration
    #[serde(default)]
    pub guard: GuardConfig,

    /// Log raw failures before they are normalized
    #[serde(default)]
    pub diagnostics: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl RecoveryConfig {
    /// Default settings for `environment`; diagnostics follow
    /// [`Environment::is_debug`]
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            otp: OtpConfig::default(),
            guard: GuardConfig::default(),
            diagnostics: environment.is_debug(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Create configuration for development environment
    pub fn development() -> Self {
        Self::for_environment(Environment::Development)
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self::for_environment(Environment::Production)
    }

    /// Load configuration from environment variables, reading the
    /// environment's `.env` file first when present
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();
        Self::from_lookup(environment, |key| env::var(key).ok())
    }

    /// Build configuration for `environment`, overriding defaults with
    /// whatever `lookup` returns
    pub fn from_lookup<F>(environment: Environment, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::for_environment(environment);

        if let Some(value) = parse_var(&lookup, "OTP_RESEND_COOLDOWN_SECONDS")? {
            config.otp.resend_cooldown_seconds = value;
        }
        if let Some(value) = parse_var(&lookup, "OTP_REQUEST_TIMEOUT_MS")? {
            config.otp.request_timeout_ms = value;
        }
        if let Some(value) = parse_var(&lookup, "OTP_COOLDOWN_RESET_POLICY")? {
            config.otp.cooldown_reset_policy = value;
        }
        if let Some(value) = parse_var(&lookup, "SUBMISSION_GUARD_INTERVAL_MS")? {
            config.guard.min_interval_ms = value;
        }
        if let Some(value) = parse_var(&lookup, "RECOVERY_DIAGNOSTICS")? {
            config.diagnostics = value;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = parse_var(&lookup, "LOG_FORMAT")? {
            config.logging.format = format;
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}
