use crate::{ConfirmOutcome, DeleteConfirmation};

use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_millis(3000);

#[test]
fn given_unarmed_when_pressed_then_armed() {
    let mut confirmation = DeleteConfirmation::new(WINDOW);
    let now = Instant::now();

    assert_eq!(confirmation.press(now), ConfirmOutcome::Armed);
    assert!(confirmation.is_armed(now));
}

#[test]
fn given_armed_when_pressed_within_window_then_confirmed() {
    let mut confirmation = DeleteConfirmation::new(WINDOW);
    let start = Instant::now();
    confirmation.press(start);

    let outcome = confirmation.press(start + Duration::from_millis(2999));

    assert_eq!(outcome, ConfirmOutcome::Confirmed);
    assert!(!confirmation.is_armed(start + Duration::from_millis(2999)));
}

#[test]
fn given_armed_when_window_elapses_then_resets_to_unconfirmed() {
    let mut confirmation = DeleteConfirmation::new(WINDOW);
    let start = Instant::now();
    confirmation.press(start);

    let later = start + WINDOW;

    assert!(!confirmation.is_armed(later));
    assert_eq!(confirmation.press(later), ConfirmOutcome::Armed);
}

#[test]
fn given_armed_when_reset_then_not_armed() {
    let mut confirmation = DeleteConfirmation::default();
    let now = Instant::now();
    confirmation.press(now);

    confirmation.reset();

    assert!(!confirmation.is_armed(now));
    assert!(confirmation.expires_at().is_none());
}

#[test]
fn test_expires_at_is_arming_time_plus_window() {
    let mut confirmation = DeleteConfirmation::new(WINDOW);
    let now = Instant::now();
    confirmation.press(now);

    assert_eq!(confirmation.expires_at(), Some(now + WINDOW));
    assert_eq!(confirmation.window(), WINDOW);
}
