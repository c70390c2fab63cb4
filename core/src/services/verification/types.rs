//! Types exposed by the verification session

use serde::Serialize;
use std::fmt;

use crate::domain::entities::{AttemptState, CODE_LENGTH};
use crate::errors::NormalizedError;
use crate::services::cooldown::CooldownState;

/// Opaque token handed back by the verifier after a successful check
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tokens are credentials; keep them out of debug logs
impl fmt::Debug for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContinuationToken(***)")
    }
}

/// Result of a resend request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ResendOutcome {
    /// A new code was dispatched and the cooldown restarted
    Sent,
    /// Resend is still locked; nothing was dispatched
    CoolingDown { remaining_seconds: u32 },
    /// Tapped again inside the double-submit window; nothing was dispatched
    Dropped,
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpSnapshot {
    pub digits: [Option<char>; CODE_LENGTH],
    pub state: AttemptState,
    pub cooldown: CooldownState,
    pub last_error: Option<NormalizedError>,
    pub failed_attempts: u32,
}
