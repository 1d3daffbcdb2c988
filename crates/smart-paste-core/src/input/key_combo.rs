use std::collections::HashSet;

/// Identifier of a registered key combination.
///
/// The OS hotkey layer resolves modifier+letter chords and reports them by
/// id, so a held chord is tracked as a single key.
pub type KeyId = u32;

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    /// Combination went down.
    Pressed,
    /// Combination came back up.
    Released,
}

/// One transition reported by the OS input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which combination changed.
    pub key: KeyId,
    /// Press or release.
    pub transition: KeyTransition,
}

impl KeyEvent {
    /// Press of `key`.
    pub fn pressed(key: KeyId) -> Self {
        Self {
            key,
            transition: KeyTransition::Pressed,
        }
    }

    /// Release of `key`.
    pub fn released(key: KeyId) -> Self {
        Self {
            key,
            transition: KeyTransition::Released,
        }
    }
}

/// Set of combinations currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyCombo {
    held: HashSet<KeyId>,
}

impl KeyCombo {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the set.
    ///
    /// Returns `true` for a release of a key that was held, i.e. a complete
    /// press/release cycle. Auto-repeat presses are absorbed by the set.
    pub fn apply(&mut self, event: KeyEvent) -> bool {
        match event.transition {
            KeyTransition::Pressed => {
                self.held.insert(event.key);
                false
            }
            KeyTransition::Released => self.held.remove(&event.key),
        }
    }

    /// Whether `key` is currently held.
    pub fn is_held(&self, key: KeyId) -> bool {
        self.held.contains(&key)
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
