use crate::{Fingerprint, ResolvedContent, SessionState, SharedSession, TriggerOutcome};

use std::time::{Duration, Instant};

const DEBOUNCE: Duration = Duration::from_millis(500);

fn resolved(bytes: &[u8], url: &str) -> ResolvedContent {
    ResolvedContent {
        fingerprint: Fingerprint::of(bytes),
        url: url.to_string(),
    }
}

/// WHAT: A fresh session has nothing to emit
/// WHY: The shortcut must be a no-op before any upload resolves
#[test]
fn given_empty_session_when_triggered_then_no_url() {
    // Given: Empty session
    let mut state = SessionState::default();

    // When: Triggered
    let outcome = state.trigger(Instant::now(), DEBOUNCE);

    // Then: Nothing to emit
    assert_eq!(outcome, TriggerOutcome::NoUrl);
}

/// WHAT: Two triggers inside the debounce window emit once
/// WHY: Key bounce must not type the URL twice
#[test]
fn given_resolved_url_when_triggered_twice_within_window_then_single_emission() {
    // Given: A session with a URL
    let mut state = SessionState::default();
    state.record(resolved(b"a", "https://x/y"));
    let start = Instant::now();

    // When: Triggered twice 100ms apart
    let first = state.trigger(start, DEBOUNCE);
    let second = state.trigger(start + Duration::from_millis(100), DEBOUNCE);

    // Then: First emits, second is debounced
    assert_eq!(first, TriggerOutcome::Emit("https://x/y".to_string()));
    assert!(matches!(second, TriggerOutcome::Debounced { .. }));
}

/// WHAT: A trigger after the window emits again
/// WHY: Debounce must not swallow deliberate repeat presses
#[test]
fn given_resolved_url_when_triggered_after_window_then_emits_again() {
    // Given: A session with a URL and one accepted trigger
    let mut state = SessionState::default();
    state.record(resolved(b"a", "https://x/y"));
    let start = Instant::now();
    let _ = state.trigger(start, DEBOUNCE);

    // When: Triggered again after the window
    let outcome = state.trigger(start + DEBOUNCE, DEBOUNCE);

    // Then: Emits
    assert_eq!(outcome, TriggerOutcome::Emit("https://x/y".to_string()));
}

/// WHAT: Debounced triggers do not extend the window
/// WHY: Holding the shortcut must still emit once per window
#[test]
fn given_debounced_trigger_when_window_elapses_from_first_then_emits() {
    // Given: Accepted trigger at t=0, debounced trigger at t=400ms
    let mut state = SessionState::default();
    state.record(resolved(b"a", "https://x/y"));
    let start = Instant::now();
    let _ = state.trigger(start, DEBOUNCE);
    let _ = state.trigger(start + Duration::from_millis(400), DEBOUNCE);

    // When: Triggered at t=600ms
    let outcome = state.trigger(start + Duration::from_millis(600), DEBOUNCE);

    // Then: Emits, because the window is measured from t=0
    assert_eq!(outcome, TriggerOutcome::Emit("https://x/y".to_string()));
}

/// WHAT: Recording replaces fingerprint and URL together
/// WHY: Readers must never see a URL paired with another image's fingerprint
#[tokio::test]
async fn given_shared_session_when_recording_then_fingerprint_and_url_replaced_together() {
    // Given: A shared session holding image A
    let session = SharedSession::new();
    session.record(resolved(b"a", "https://x/a")).await;

    // When: Image B is recorded
    session.record(resolved(b"b", "https://x/b")).await;

    // Then: The snapshot pairs B's fingerprint with B's URL
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.resolved(), Some(&resolved(b"b", "https://x/b")));
    assert_eq!(session.last_fingerprint().await, Some(Fingerprint::of(b"b")));
    assert_eq!(session.last_url().await.as_deref(), Some("https://x/b"));
}

/// WHAT: Clones of the handle observe the same record
/// WHY: The poll loop and hotkey handler share one session
#[tokio::test]
async fn given_cloned_handle_when_recording_then_other_handle_sees_update() {
    // Given: Two handles to one session
    let poll_side = SharedSession::new();
    let input_side = poll_side.clone();

    // When: The poll side records
    poll_side.record(resolved(b"a", "https://x/a")).await;

    // Then: The input side can emit it
    let outcome = input_side.trigger(Instant::now(), DEBOUNCE).await;
    assert_eq!(outcome, TriggerOutcome::Emit("https://x/a".to_string()));
}
