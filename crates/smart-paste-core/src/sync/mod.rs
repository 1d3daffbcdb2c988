mod client;
mod result;

pub use {
    client::{
        DEFAULT_CHECK_TIMEOUT, DEFAULT_SERVER_URL, DEFAULT_UPLOAD_TIMEOUT, SyncClient,
        SyncClientConfig,
    },
    result::{SyncResult, UploadResult},
};

use crate::{Fingerprint, ImageContent};

use std::future::Future;

/// Remote side of the sync state machine.
///
/// Both calls fail soft: implementations fold transport and protocol errors
/// into a "not found" [`SyncResult`] or an unsuccessful [`UploadResult`].
/// The server is expected to make both idempotent.
pub trait RemoteSync {
    /// Ask whether the server already hosts content with this fingerprint.
    fn check_exists(&self, fingerprint: &Fingerprint) -> impl Future<Output = SyncResult> + Send;

    /// Upload the image and return its hosted URL.
    fn upload(&self, image: &ImageContent) -> impl Future<Output = UploadResult> + Send;
}
