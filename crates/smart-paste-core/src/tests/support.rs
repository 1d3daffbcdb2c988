use crate::{Fingerprint, ImageContent, ImageSource, RemoteSync, SyncResult, UploadResult};

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

pub(crate) const TEST_LIMIT: usize = 10 * 1024 * 1024;

/// Solid-colour RGBA image; different colours give different PNG bytes.
#[allow(clippy::unwrap_used)]
pub(crate) fn solid_image(width: usize, height: usize, rgba: [u8; 4]) -> ImageContent {
    let pixels: Vec<u8> = rgba
        .iter()
        .copied()
        .cycle()
        .take(width * height * 4)
        .collect();
    ImageContent::from_rgba(width, height, &pixels, TEST_LIMIT).unwrap()
}

/// Source that replays a scripted sequence of clipboard reads.
pub(crate) struct ScriptedSource {
    reads: VecDeque<Option<ImageContent>>,
}

impl ScriptedSource {
    pub(crate) fn new(reads: Vec<Option<ImageContent>>) -> Self {
        Self {
            reads: reads.into(),
        }
    }
}

impl ImageSource for ScriptedSource {
    fn read_image(&mut self) -> Option<ImageContent> {
        self.reads.pop_front().flatten()
    }
}

/// Remote with canned answers and call counters.
#[derive(Default)]
pub(crate) struct FakeRemote {
    check_result: Mutex<SyncResult>,
    upload_result: Mutex<UploadResult>,
    checks: AtomicUsize,
    uploads: AtomicUsize,
    checked: Mutex<Vec<Fingerprint>>,
}

#[allow(clippy::unwrap_used)]
impl FakeRemote {
    pub(crate) fn answering(check: SyncResult, upload: UploadResult) -> Self {
        let remote = Self::default();
        remote.set_answers(check, upload);
        remote
    }

    pub(crate) fn set_answers(&self, check: SyncResult, upload: UploadResult) {
        *self.check_result.lock().unwrap() = check;
        *self.upload_result.lock().unwrap() = upload;
    }

    pub(crate) fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub(crate) fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub(crate) fn round_trips(&self) -> usize {
        self.checks() + self.uploads()
    }

    pub(crate) fn checked(&self) -> Vec<Fingerprint> {
        self.checked.lock().unwrap().clone()
    }
}

#[allow(clippy::unwrap_used)]
impl RemoteSync for FakeRemote {
    async fn check_exists(&self, fingerprint: &Fingerprint) -> SyncResult {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.checked.lock().unwrap().push(*fingerprint);
        self.check_result.lock().unwrap().clone()
    }

    async fn upload(&self, _image: &ImageContent) -> UploadResult {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        self.upload_result.lock().unwrap().clone()
    }
}

pub(crate) fn miss() -> SyncResult {
    SyncResult::not_found()
}

pub(crate) fn hit(url: &str) -> SyncResult {
    SyncResult {
        exists: true,
        url: Some(url.to_string()),
    }
}

pub(crate) fn uploaded(url: &str) -> UploadResult {
    UploadResult {
        success: true,
        url: Some(url.to_string()),
        was_existing: false,
    }
}
