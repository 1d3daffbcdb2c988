use crate::input::{KeyCombo, KeyEvent, KeyId};

use tracing::trace;

/// What the caller should do with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptAction {
    /// The paste-URL combination completed; emit the cached URL.
    EmitUrl,
    /// Not ours; the OS handles it (plain paste lands here).
    PassThrough,
    /// Ours, but not actionable yet (press half of the cycle, or a stray
    /// release).
    Consumed,
}

/// Reducer from raw key events to actions.
///
/// Pure state: it never touches the clipboard or the keyboard itself.
#[derive(Debug, Clone)]
pub struct Interceptor {
    paste_url: KeyId,
    combo: KeyCombo,
}

impl Interceptor {
    /// Intercept the combination registered under `paste_url`.
    pub fn new(paste_url: KeyId) -> Self {
        Self {
            paste_url,
            combo: KeyCombo::new(),
        }
    }

    /// Id of the intercepted combination.
    pub fn paste_url_key(&self) -> KeyId {
        self.paste_url
    }

    /// Fold one event and decide what to do with it.
    pub fn on_event(&mut self, event: KeyEvent) -> InterceptAction {
        let completed = self.combo.apply(event);

        let action = if event.key != self.paste_url {
            InterceptAction::PassThrough
        } else if completed {
            InterceptAction::EmitUrl
        } else {
            InterceptAction::Consumed
        };

        trace!(key = event.key, transition = ?event.transition, action = ?action, "Key event reduced");

        action
    }

    /// Currently held combinations.
    pub fn combo(&self) -> &KeyCombo {
        &self.combo
    }
}
