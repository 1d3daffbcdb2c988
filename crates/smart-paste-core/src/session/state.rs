use crate::Fingerprint;

use std::time::{Duration, Instant};

/// A fingerprint paired with the URL the server holds for it.
///
/// The pair is only ever written as a unit, so readers never observe a URL
/// belonging to some other fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// Fingerprint of the clipboard image.
    pub fingerprint: Fingerprint,
    /// Hosted URL for that image.
    pub url: String,
}

/// Result of asking the session for a URL to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Trigger accepted; emit this URL.
    Emit(String),
    /// Trigger accepted but nothing has been resolved yet.
    NoUrl,
    /// Trigger arrived inside the debounce window and was dropped.
    Debounced {
        /// Time since the last accepted trigger.
        since_last: Duration,
    },
}

/// Process-lifetime session record.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    resolved: Option<ResolvedContent>,
    last_trigger: Option<Instant>,
}

impl SessionState {
    /// Fingerprint of the last successfully resolved image.
    pub fn last_fingerprint(&self) -> Option<&Fingerprint> {
        self.resolved.as_ref().map(|r| &r.fingerprint)
    }

    /// URL of the last successfully resolved image.
    pub fn last_url(&self) -> Option<&str> {
        self.resolved.as_ref().map(|r| r.url.as_str())
    }

    /// The resolved pair, if any.
    pub fn resolved(&self) -> Option<&ResolvedContent> {
        self.resolved.as_ref()
    }

    /// When the last trigger was accepted.
    pub fn last_trigger(&self) -> Option<Instant> {
        self.last_trigger
    }

    /// Replace the resolved pair.
    pub fn record(&mut self, resolved: ResolvedContent) {
        self.resolved = Some(resolved);
    }

    /// Apply the debounce window to a trigger at `now`.
    ///
    /// Triggers inside the window leave the timestamp alone, so holding the
    /// shortcut down still emits once per window.
    pub fn trigger(&mut self, now: Instant, window: Duration) -> TriggerOutcome {
        if let Some(last) = self.last_trigger {
            let since_last = now.saturating_duration_since(last);
            if since_last < window {
                return TriggerOutcome::Debounced { since_last };
            }
        }

        self.last_trigger = Some(now);

        match self.last_url() {
            Some(url) => TriggerOutcome::Emit(url.to_string()),
            None => TriggerOutcome::NoUrl,
        }
    }
}
