use crate::{AppError, AppResult};

use std::{panic::Location, thread, time::Duration};

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use error_location::ErrorLocation;
use tracing::debug;

/// Gap between releasing the shortcut modifiers and typing.
///
/// Some input method editors drop the first characters if text arrives in
/// the same instant as the modifier release.
const KEY_EVENT_DELAY: Duration = Duration::from_millis(10);

/// Modifiers held for the paste-URL shortcut.
///
/// macOS uses Cmd (Meta), Windows and Linux use Ctrl; both add Shift.
fn shortcut_modifiers() -> [Key; 2] {
    #[cfg(target_os = "macos")]
    {
        [Key::Meta, Key::Shift]
    }
    #[cfg(not(target_os = "macos"))]
    {
        [Key::Control, Key::Shift]
    }
}

/// Types text into the focused window with synthesized keystrokes.
///
/// The shortcut fires on key release, but the user may still be holding its
/// modifiers. Typing under Ctrl/Cmd would turn each character into a
/// command, so the modifiers are released first.
pub struct KeyTyper {
    enigo: Enigo,
}

impl KeyTyper {
    /// Create a typer backed by a fresh `Enigo`.
    #[track_caller]
    pub(crate) fn new() -> AppResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| AppError::TypingFailed {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { enigo })
    }

    /// Release the shortcut modifiers, best effort.
    ///
    /// If a release fails, the OS resets modifier state on the next physical
    /// key press/release by the user.
    pub(crate) fn release_modifiers(&mut self) {
        for modifier in shortcut_modifiers() {
            if let Err(e) = self.enigo.key(modifier, Direction::Release) {
                debug!(modifier = ?modifier, error = %e, "Modifier release failed");
            }
        }
    }

    /// Type `text` after releasing the shortcut modifiers.
    #[track_caller]
    pub(crate) fn type_text(&mut self, text: &str) -> AppResult<()> {
        self.release_modifiers();

        thread::sleep(KEY_EVENT_DELAY);

        self.enigo.text(text).map_err(|e| AppError::TypingFailed {
            reason: format!("Failed to type text: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
