//! Deployment environment and the logging profile derived from it

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Variables consulted, in order, to pick the environment
const ENVIRONMENT_KEYS: [&str; 3] = ["ENVIRONMENT", "ENV", "RUST_ENV"];

/// Where the recovery flow is deployed.
///
/// Decides the default logging profile and whether raw transport failures
/// are written to the diagnostic log before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        Self::detect(|key| env::var(key).ok())
    }

    /// The first environment key that is set wins; a missing or unknown
    /// value falls back to development
    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ENVIRONMENT_KEYS
            .iter()
            .find_map(|key| lookup(key))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Dotenv file loaded before the process environment
    pub fn env_file(&self) -> String {
        format!(".env.{}", self)
    }

    /// Raw failures may reach the log everywhere except production
    pub fn is_debug(&self) -> bool {
        !matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                key: ENVIRONMENT_KEYS[0].to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Subscriber settings consumed by [`crate::init_tracing`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    pub timestamp: bool,
    /// File and line of each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Verbose human-readable output in development, structured JSON once
    /// deployed; production only keeps warnings
    pub fn for_environment(env: Environment) -> Self {
        let (level, format) = match env {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging => ("info", LogFormat::Json),
            Environment::Production => ("warn", LogFormat::Json),
        };

        Self {
            level: level.to_string(),
            format,
            timestamp: true,
            source_location: env == Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(ConfigError::InvalidValue {
                key: "LOG_FORMAT".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
