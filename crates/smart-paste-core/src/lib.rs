//! Smart Paste Core Library
//!
//! Clipboard image deduplication and hosting: fingerprint images, ask the
//! server whether it already has them, upload when it does not, and keep the
//! resulting URL ready for a keyboard shortcut.
//!
//! # Example
//!
//! ```no_run
//! use smart_paste_core::{
//!     CoreResult, ImageContent, ImageSource, SharedSession, SyncClient, SyncClientConfig,
//!     Synchronizer,
//! };
//!
//! struct OneShot(Option<ImageContent>);
//!
//! impl ImageSource for OneShot {
//!     fn read_image(&mut self) -> Option<ImageContent> {
//!         self.0.take()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let client = SyncClient::new(SyncClientConfig::default())?;
//!     let session = SharedSession::new();
//!     let mut synchronizer = Synchronizer::new(client, session.clone());
//!
//!     let image = ImageContent::from_rgba(1, 1, &[255, 0, 0, 255], 10 * 1024 * 1024)?;
//!     let outcome = synchronizer.tick(&mut OneShot(Some(image))).await;
//!
//!     println!("{:?} -> {:?}", outcome, session.last_url().await);
//!     Ok(())
//! }
//! ```

mod error;
mod fingerprint;
mod image_content;
mod input;
mod session;
mod sync;
mod synchronizer;

pub use {
    error::{CoreError, Result as CoreResult},
    fingerprint::Fingerprint,
    image_content::ImageContent,
    input::{InterceptAction, Interceptor, KeyCombo, KeyEvent, KeyId, KeyTransition},
    session::{ResolvedContent, SessionState, SharedSession, TriggerOutcome},
    sync::{
        DEFAULT_CHECK_TIMEOUT, DEFAULT_SERVER_URL, DEFAULT_UPLOAD_TIMEOUT, RemoteSync, SyncClient,
        SyncClientConfig, SyncResult, UploadResult,
    },
    synchronizer::{ImageSource, Resolution, SyncPhase, Synchronizer, TickOutcome},
};

#[cfg(test)]
mod tests;
