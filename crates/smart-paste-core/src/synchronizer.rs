//! Deduplicated upload state machine.
//!
//! One [`Synchronizer::tick`] walks `Idle -> Detected -> Resolving ->
//! Resolved -> Idle`. The fingerprint is computed before any I/O and compared
//! against the session, so an unchanged clipboard never touches the network.
//! A failed resolution leaves the session alone; the same content is tried
//! again on the next tick, never twice within one.

use crate::{
    Fingerprint, ImageContent,
    session::{ResolvedContent, SharedSession},
    sync::RemoteSync,
};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Where images come from; the OS clipboard in production.
pub trait ImageSource {
    /// Current image, or `None` when there is no usable image.
    ///
    /// Implementations fail soft: inaccessible, non-image and oversized
    /// content all read as `None`.
    fn read_image(&mut self) -> Option<ImageContent>;
}

/// Position in the sync state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing new on the clipboard.
    Idle,
    /// A fingerprint different from the session's was seen.
    Detected,
    /// Waiting on the server.
    Resolving,
    /// URL recorded in the session.
    Resolved,
}

/// How a URL was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Existence check hit; nothing was uploaded.
    Existing,
    /// Uploaded as new content.
    Uploaded,
    /// Uploaded, but the server already had it.
    AlreadyOnServer,
}

/// Result of one poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clipboard holds no usable image.
    NoImage,
    /// Same image as the last resolved one.
    Unchanged,
    /// New image resolved and recorded.
    Resolved {
        /// Fingerprint of the new image.
        fingerprint: Fingerprint,
        /// Its hosted URL.
        url: String,
        /// How the URL was obtained.
        resolution: Resolution,
    },
    /// New image could not be resolved; the session is unchanged.
    Failed {
        /// Fingerprint of the image that failed.
        fingerprint: Fingerprint,
    },
}

/// Drives clipboard images through check and upload into the session.
#[derive(Debug)]
pub struct Synchronizer<R> {
    remote: R,
    session: SharedSession,
    phase: SyncPhase,
}

impl<R: RemoteSync> Synchronizer<R> {
    /// Create a synchronizer writing into `session`.
    pub fn new(remote: R, session: SharedSession) -> Self {
        Self {
            remote,
            session,
            phase: SyncPhase::Idle,
        }
    }

    /// Current phase. Always `Idle` between ticks.
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// The remote this synchronizer talks to.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Session handle shared with the input side.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Run one poll tick against `source`.
    #[instrument(skip_all)]
    pub async fn tick<S: ImageSource>(&mut self, source: &mut S) -> TickOutcome {
        let Some(image) = source.read_image() else {
            return TickOutcome::NoImage;
        };

        let fingerprint = image.fingerprint();

        if self.session.last_fingerprint().await == Some(fingerprint) {
            return TickOutcome::Unchanged;
        }

        self.transition(SyncPhase::Detected);
        info!(fingerprint = %fingerprint, image_len = image.len(), "New clipboard image detected");

        let outcome = self.resolve(fingerprint, &image).await;

        self.transition(SyncPhase::Idle);

        outcome
    }

    async fn resolve(&mut self, fingerprint: Fingerprint, image: &ImageContent) -> TickOutcome {
        let attempt_id = Uuid::new_v4();
        self.transition(SyncPhase::Resolving);

        let check = self.remote.check_exists(&fingerprint).await;
        if let Some(url) = check.hit_url() {
            info!(attempt_id = %attempt_id, url = %url, "Image already hosted, reusing URL");
            return self
                .record(fingerprint, url.to_string(), Resolution::Existing)
                .await;
        }

        info!(attempt_id = %attempt_id, image_len = image.len(), "Uploading image");
        let upload = self.remote.upload(image).await;

        match upload.success_url() {
            Some(url) => {
                let resolution = if upload.was_existing {
                    Resolution::AlreadyOnServer
                } else {
                    Resolution::Uploaded
                };
                info!(attempt_id = %attempt_id, url = %url, resolution = ?resolution, "Image uploaded");
                self.record(fingerprint, url.to_string(), resolution).await
            }
            None => {
                warn!(
                    attempt_id = %attempt_id,
                    fingerprint = %fingerprint,
                    "Upload produced no URL, will retry on a later tick"
                );
                TickOutcome::Failed { fingerprint }
            }
        }
    }

    async fn record(
        &mut self,
        fingerprint: Fingerprint,
        url: String,
        resolution: Resolution,
    ) -> TickOutcome {
        self.session
            .record(ResolvedContent {
                fingerprint,
                url: url.clone(),
            })
            .await;
        self.transition(SyncPhase::Resolved);

        TickOutcome::Resolved {
            fingerprint,
            url,
            resolution,
        }
    }

    fn transition(&mut self, next: SyncPhase) {
        debug!(from = ?self.phase, to = ?next, "Sync phase transition");
        self.phase = next;
    }
}
