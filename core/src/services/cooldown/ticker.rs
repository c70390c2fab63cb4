//! Scheduled task that drives a [`ResendCooldownTimer`]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::timer::{CooldownState, ResendCooldownTimer};

const TICK: Duration = Duration::from_secs(1);

/// Owned handle to the one-second countdown task.
///
/// The task stops on its own once the countdown reaches zero. Cancelling or
/// dropping the handle aborts it; the last published state stays readable.
/// Must be created from within a Tokio runtime.
#[derive(Debug)]
pub struct CooldownTicker {
    seed: u32,
    state: Arc<watch::Sender<CooldownState>>,
    task: Option<JoinHandle<()>>,
}

impl CooldownTicker {
    /// Spawn a countdown starting at `seed` seconds
    pub fn start(seed: u32) -> Self {
        let timer = ResendCooldownTimer::new(seed);
        let (sender, _) = watch::channel(timer.state());
        let mut ticker = Self {
            seed,
            state: Arc::new(sender),
            task: None,
        };
        ticker.spawn(timer);
        ticker
    }

    /// Current cooldown snapshot
    pub fn state(&self) -> CooldownState {
        *self.state.borrow()
    }

    /// Receive every published cooldown change
    pub fn subscribe(&self) -> watch::Receiver<CooldownState> {
        self.state.subscribe()
    }

    /// Reset to the seed and count down again with a fresh one-second phase
    pub fn restart(&mut self) {
        self.cancel();
        let timer = ResendCooldownTimer::new(self.seed);
        self.state.send_replace(timer.state());
        self.spawn(timer);
        tracing::debug!(seed = self.seed, event = "cooldown_restarted", "Resend cooldown restarted");
    }

    /// Stop ticking. Safe to call at any point, any number of times.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether the countdown task is still scheduled
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn spawn(&mut self, timer: ResendCooldownTimer) {
        let state = Arc::clone(&self.state);
        let first_tick = Instant::now() + TICK;
        self.task = Some(tokio::spawn(run(timer, state, first_tick)));
    }
}

impl Drop for CooldownTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

// Ticks are anchored to `first_tick`, not to when the task is first polled
async fn run(
    mut timer: ResendCooldownTimer,
    state: Arc<watch::Sender<CooldownState>>,
    first_tick: Instant,
) {
    let mut interval = interval_at(first_tick, TICK);
    while !timer.can_resend() {
        interval.tick().await;
        if timer.tick() {
            tracing::debug!(event = "cooldown_ready", "Resend is available again");
        }
        state.send_replace(timer.state());
    }
}
