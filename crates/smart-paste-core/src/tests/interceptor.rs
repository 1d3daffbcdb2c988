use crate::{InterceptAction, Interceptor, KeyCombo, KeyEvent};

const PASTE_URL: u32 = 7;
const PLAIN_PASTE: u32 = 9;

/// WHAT: A full press/release of the paste-URL combo emits once
/// WHY: Emission happens on release, after the chord is complete
#[test]
fn given_paste_url_combo_when_pressed_and_released_then_emit_on_release() {
    // Given: An interceptor for the paste-URL combo
    let mut interceptor = Interceptor::new(PASTE_URL);

    // When: Pressed, then released
    let on_press = interceptor.on_event(KeyEvent::pressed(PASTE_URL));
    let on_release = interceptor.on_event(KeyEvent::released(PASTE_URL));

    // Then: Press is consumed, release emits, nothing left held
    assert_eq!(on_press, InterceptAction::Consumed);
    assert_eq!(on_release, InterceptAction::EmitUrl);
    assert!(interceptor.combo().is_empty());
}

/// WHAT: Other combos pass through untouched
/// WHY: Plain paste must reach the OS so the image stays pasteable
#[test]
fn given_plain_paste_combo_when_pressed_and_released_then_pass_through() {
    // Given: An interceptor for the paste-URL combo
    let mut interceptor = Interceptor::new(PASTE_URL);

    // When: A different combo cycles
    let on_press = interceptor.on_event(KeyEvent::pressed(PLAIN_PASTE));
    let on_release = interceptor.on_event(KeyEvent::released(PLAIN_PASTE));

    // Then: Both pass through
    assert_eq!(on_press, InterceptAction::PassThrough);
    assert_eq!(on_release, InterceptAction::PassThrough);
}

/// WHAT: A release with no matching press does not emit
/// WHY: A listener started mid-chord must not fire spuriously
#[test]
fn given_no_prior_press_when_released_then_consumed_without_emit() {
    // Given: Fresh interceptor
    let mut interceptor = Interceptor::new(PASTE_URL);

    // When: Release arrives alone
    let action = interceptor.on_event(KeyEvent::released(PASTE_URL));

    // Then: Consumed, not emitted
    assert_eq!(action, InterceptAction::Consumed);
}

/// WHAT: Auto-repeat presses collapse into one cycle
/// WHY: Holding the shortcut must not queue multiple emissions
#[test]
fn given_repeated_presses_when_released_once_then_single_emit() {
    // Given: Fresh interceptor
    let mut interceptor = Interceptor::new(PASTE_URL);

    // When: Three presses then one release, then a stray second release
    let mut actions = Vec::new();
    for _ in 0..3 {
        actions.push(interceptor.on_event(KeyEvent::pressed(PASTE_URL)));
    }
    actions.push(interceptor.on_event(KeyEvent::released(PASTE_URL)));
    actions.push(interceptor.on_event(KeyEvent::released(PASTE_URL)));

    // Then: Exactly one emission
    let emits = actions
        .iter()
        .filter(|a| **a == InterceptAction::EmitUrl)
        .count();
    assert_eq!(emits, 1);
}

/// WHAT: KeyCombo tracks held keys independently
/// WHY: Overlapping chords must not clear each other
#[test]
fn given_two_held_keys_when_one_released_then_other_still_held() {
    // Given: Two keys held
    let mut combo = KeyCombo::new();
    combo.apply(KeyEvent::pressed(PASTE_URL));
    combo.apply(KeyEvent::pressed(PLAIN_PASTE));

    // When: One is released
    let completed = combo.apply(KeyEvent::released(PLAIN_PASTE));

    // Then: That cycle completed and the other key is still held
    assert!(completed);
    assert!(combo.is_held(PASTE_URL));
    assert!(!combo.is_held(PLAIN_PASTE));
}
