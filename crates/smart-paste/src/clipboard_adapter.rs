//! Clipboard image reader.
//!
//! Reads whatever image the OS clipboard holds and normalizes it to PNG for
//! fingerprinting and upload. `arboard` reads are non-destructive, so the
//! image stays on the clipboard and remains pasteable.

use crate::{AppError, AppResult};

use std::panic::Location;

use arboard::Clipboard;
use error_location::ErrorLocation;
use smart_paste_core::{CoreError, ImageContent, ImageSource};
use tracing::{debug, info, instrument, trace, warn};

/// Remembers the last oversized image so it is reported once, not every tick.
///
/// Keyed on dimensions and encoded size: two different screenshots of the
/// same screen share dimensions but not, in practice, their PNG size.
#[derive(Debug, Default)]
pub(crate) struct OversizeNotice {
    last: Option<(usize, usize, usize)>,
}

impl OversizeNotice {
    /// True the first time this image is seen since the last reset.
    pub(crate) fn first_sighting(&mut self, width: usize, height: usize, size: usize) -> bool {
        let key = Some((width, height, size));
        if self.last == key {
            return false;
        }
        self.last = key;
        true
    }

    /// Forget the last image; the next oversized one is reported again.
    pub(crate) fn reset(&mut self) {
        self.last = None;
    }
}

/// Polling reader for clipboard images.
pub struct ClipboardAdapter {
    clipboard: Clipboard,
    max_file_size: usize,
    oversize: OversizeNotice,
}

impl ClipboardAdapter {
    /// Open the clipboard with the given size ceiling.
    #[track_caller]
    #[instrument]
    pub fn new(max_file_size: usize) -> AppResult<Self> {
        let clipboard = Clipboard::new().map_err(|e| AppError::ClipboardError {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(max_file_size, "ClipboardAdapter initialized");

        Ok(Self {
            clipboard,
            max_file_size,
            oversize: OversizeNotice::default(),
        })
    }
}

impl ImageSource for ClipboardAdapter {
    fn read_image(&mut self) -> Option<ImageContent> {
        let image = match self.clipboard.get_image() {
            Ok(image) => image,
            Err(arboard::Error::ContentNotAvailable) => {
                trace!("No image on clipboard");
                self.oversize.reset();
                return None;
            }
            Err(e) => {
                debug!(error = %e, "Clipboard not readable");
                return None;
            }
        };

        match ImageContent::from_rgba(image.width, image.height, &image.bytes, self.max_file_size)
        {
            Ok(content) => {
                self.oversize.reset();
                Some(content)
            }
            Err(CoreError::Oversize { size, limit, .. }) => {
                // The same oversized image is re-read every tick.
                if self.oversize.first_sighting(image.width, image.height, size) {
                    warn!(
                        width = image.width,
                        height = image.height,
                        size,
                        limit,
                        "Clipboard image too large, skipping upload"
                    );
                }
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to normalize clipboard image");
                None
            }
        }
    }
}
