use crate::{
    Fingerprint,
    session::{ResolvedContent, SessionState, TriggerOutcome},
};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;
use tracing::debug;

/// Handle to the session record shared by the poll loop and the hotkey
/// handler.
///
/// Every access takes the one lock for the whole record; there are no
/// per-field locks.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current record.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    /// Fingerprint of the last resolved image.
    pub async fn last_fingerprint(&self) -> Option<Fingerprint> {
        self.inner.lock().await.last_fingerprint().copied()
    }

    /// URL of the last resolved image.
    pub async fn last_url(&self) -> Option<String> {
        self.inner.lock().await.last_url().map(str::to_string)
    }

    /// Replace the resolved fingerprint/URL pair.
    pub async fn record(&self, resolved: ResolvedContent) {
        debug!(fingerprint = %resolved.fingerprint, url = %resolved.url, "Session updated");
        self.inner.lock().await.record(resolved);
    }

    /// Debounced trigger; see [`SessionState::trigger`].
    pub async fn trigger(&self, now: Instant, window: Duration) -> TriggerOutcome {
        self.inner.lock().await.trigger(now, window)
    }
}
