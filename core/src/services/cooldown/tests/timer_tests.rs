//! Unit tests for the pure countdown

use crate::services::cooldown::{CooldownPhase, ResendCooldownTimer};

#[test]
fn test_new_timer_is_counting() {
    let timer = ResendCooldownTimer::new(60);
    assert_eq!(timer.remaining_seconds(), 60);
    assert!(!timer.can_resend());
    assert_eq!(timer.phase(), CooldownPhase::Counting);
}

#[test]
fn test_ready_exactly_once_after_seed_ticks() {
    let mut timer = ResendCooldownTimer::new(60);
    let mut transitions = 0;

    for _ in 0..60 {
        if timer.tick() {
            transitions += 1;
        }
    }
    assert_eq!(transitions, 1);
    assert!(timer.can_resend());

    for _ in 0..10 {
        assert!(!timer.tick());
        assert!(timer.can_resend());
        assert_eq!(timer.remaining_seconds(), 0);
    }
}

#[test]
fn test_countdown_is_monotonic() {
    let mut timer = ResendCooldownTimer::new(5);
    let mut previous = timer.remaining_seconds();
    for _ in 0..5 {
        timer.tick();
        assert_eq!(timer.remaining_seconds(), previous - 1);
        assert_eq!(timer.state().can_resend, timer.remaining_seconds() == 0);
        previous = timer.remaining_seconds();
    }
}

#[test]
fn test_restart_resets_to_seed() {
    let mut timer = ResendCooldownTimer::new(60);
    for _ in 0..60 {
        timer.tick();
    }
    timer.restart();

    let state = timer.state();
    assert_eq!(state.remaining_seconds, 60);
    assert!(!state.can_resend);
    assert_eq!(timer.seed(), 60);
}

#[test]
fn test_zero_seed_is_ready() {
    let mut timer = ResendCooldownTimer::new(0);
    assert!(timer.can_resend());
    assert!(!timer.tick());
}
