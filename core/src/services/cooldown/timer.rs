//! Countdown state gating the resend action

use serde::Serialize;

/// Snapshot of the cooldown exposed to the UI.
///
/// `can_resend` is true exactly when `remaining_seconds` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CooldownState {
    pub remaining_seconds: u32,
    pub can_resend: bool,
}

impl CooldownState {
    fn from_remaining(remaining_seconds: u32) -> Self {
        Self {
            remaining_seconds,
            can_resend: remaining_seconds == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownPhase {
    Counting,
    Ready,
}

/// Countdown from a configurable seed down to zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCooldownTimer {
    seed: u32,
    remaining: u32,
}

impl ResendCooldownTimer {
    /// Start counting down from `seed` seconds
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            remaining: seed,
        }
    }

    /// Advance by one second. Returns true only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Back to the seed value, locking resend again
    pub fn restart(&mut self) {
        self.remaining = self.seed;
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    pub fn phase(&self) -> CooldownPhase {
        if self.can_resend() {
            CooldownPhase::Ready
        } else {
            CooldownPhase::Counting
        }
    }

    pub fn state(&self) -> CooldownState {
        CooldownState::from_remaining(self.remaining)
    }
}
