//! Resend cooldown: a pure countdown plus the task that ticks it once a second

mod ticker;
mod timer;

#[cfg(test)]
mod tests;

pub use ticker::CooldownTicker;
pub use timer::{CooldownPhase, CooldownState, ResendCooldownTimer};
