use crate::{AppCommand, HotkeyHandler};

use std::time::Duration;

use smart_paste_core::{
    Fingerprint, ImageContent, ImageSource, KeyEvent, RemoteSync, ResolvedContent, SharedSession,
    SyncResult, Synchronizer, UploadResult,
};
use tokio::{sync::mpsc, time::timeout};

const PASTE_URL: u32 = 3;
const CACHED_URL: &str = "http://localhost:3000/images/first";
const LIMIT: usize = 10 * 1024 * 1024;

/// Server that never answers, like one stuck mid-upload.
struct StalledRemote;

impl RemoteSync for StalledRemote {
    async fn check_exists(&self, _fingerprint: &Fingerprint) -> SyncResult {
        std::future::pending().await
    }

    async fn upload(&self, _image: &ImageContent) -> UploadResult {
        std::future::pending().await
    }
}

/// Clipboard that always holds the same image.
struct FixedImage(ImageContent);

impl ImageSource for FixedImage {
    fn read_image(&mut self) -> Option<ImageContent> {
        Some(self.0.clone())
    }
}

/// WHAT: The shortcut still emits the cached URL while a tick waits on the server
/// WHY: A slow upload must not delay typing the URL the user asked for
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_stalled_tick_when_shortcut_released_then_url_emitted_immediately() {
    // Given: A session holding the first image's URL and a new image on the clipboard
    let session = SharedSession::new();
    session
        .record(ResolvedContent {
            fingerprint: Fingerprint::of(b"first image"),
            url: CACHED_URL.to_string(),
        })
        .await;

    let image = ImageContent::from_rgba(1, 1, &[0, 128, 255, 255], LIMIT).unwrap();
    let mut source = FixedImage(image);
    let mut synchronizer = Synchronizer::new(StalledRemote, session.clone());

    let (command_tx, mut command_rx) = mpsc::channel(8);
    let mut handler =
        HotkeyHandler::new(PASTE_URL, session.clone(), Duration::from_millis(0), command_tx);

    // When: A tick is stuck on the server and the shortcut completes meanwhile
    let tick = synchronizer.tick(&mut source);
    tokio::pin!(tick);
    assert!(timeout(Duration::from_millis(50), &mut tick).await.is_err());

    timeout(Duration::from_secs(1), async {
        handler.handle_event(KeyEvent::pressed(PASTE_URL)).await.unwrap();
        handler.handle_event(KeyEvent::released(PASTE_URL)).await.unwrap();
    })
    .await
    .unwrap();

    // Then: The cached URL is queued for delivery and the tick is still pending
    let AppCommand::EmitUrl { url, .. } = command_rx.try_recv().unwrap();
    assert_eq!(url, CACHED_URL);
    assert!(timeout(Duration::from_millis(10), &mut tick).await.is_err());
}
