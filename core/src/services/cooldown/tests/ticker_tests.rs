//! Tests for the scheduled countdown, run on tokio's paused clock

use std::time::Duration;

use tokio::time::{advance, sleep};

use crate::services::cooldown::CooldownTicker;

#[tokio::test(start_paused = true)]
async fn test_ticks_once_per_second() {
    let ticker = CooldownTicker::start(60);
    assert_eq!(ticker.state().remaining_seconds, 60);

    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(ticker.state().remaining_seconds, 50);
    assert!(!ticker.state().can_resend);
    assert!(ticker.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_reaches_ready_and_stops() {
    let ticker = CooldownTicker::start(60);

    sleep(Duration::from_millis(59_500)).await;
    assert_eq!(ticker.state().remaining_seconds, 1);

    sleep(Duration::from_millis(1_000)).await;
    let state = ticker.state();
    assert_eq!(state.remaining_seconds, 0);
    assert!(state.can_resend);

    sleep(Duration::from_secs(30)).await;
    assert!(ticker.state().can_resend);
    assert!(!ticker.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_restart_realigns_countdown() {
    let mut ticker = CooldownTicker::start(60);

    sleep(Duration::from_millis(10_500)).await;
    ticker.restart();
    assert_eq!(ticker.state().remaining_seconds, 60);
    assert!(!ticker.state().can_resend);

    // Next ticks land at 11.5s, 12.5s, ... after the restart at 10.5s
    sleep(Duration::from_millis(29_700)).await;
    assert_eq!(ticker.state().remaining_seconds, 31);
}

#[tokio::test(start_paused = true)]
async fn test_phase_anchored_at_restart_not_first_poll() {
    let mut ticker = CooldownTicker::start(60);
    ticker.restart();

    // The countdown task is first polled 700ms late
    advance(Duration::from_millis(700)).await;
    sleep(Duration::from_millis(400)).await;

    assert_eq!(ticker.state().remaining_seconds, 59);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_leaves_no_residual_ticks() {
    let mut ticker = CooldownTicker::start(60);

    sleep(Duration::from_millis(2_500)).await;
    ticker.cancel();
    ticker.cancel();
    assert!(!ticker.is_running());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(ticker.state().remaining_seconds, 58);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_observe_changes() {
    let ticker = CooldownTicker::start(3);
    let mut receiver = ticker.subscribe();

    receiver.changed().await.unwrap();
    assert_eq!(receiver.borrow_and_update().remaining_seconds, 2);

    sleep(Duration::from_millis(2_500)).await;
    assert!(receiver.borrow().can_resend);
}
