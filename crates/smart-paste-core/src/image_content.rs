use crate::{CoreError, CoreResult, Fingerprint};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use tracing::{debug, instrument};

/// Bytes per pixel in the RGBA buffers handed over by the clipboard.
const RGBA_CHANNELS: usize = 4;

/// One clipboard image, normalized to PNG.
///
/// Created once per poll tick and dropped after it has been fingerprinted
/// and, if needed, uploaded. Construction enforces the size ceiling, so an
/// `ImageContent` that exists is always small enough to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent {
    bytes: Vec<u8>,
}

impl ImageContent {
    /// Wrap already-encoded PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Oversize`] if `bytes` is larger than `limit`.
    #[track_caller]
    pub fn from_png(bytes: Vec<u8>, limit: usize) -> CoreResult<Self> {
        if bytes.len() > limit {
            return Err(CoreError::Oversize {
                size: bytes.len(),
                limit,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { bytes })
    }

    /// Encode a raw RGBA8 buffer as PNG.
    ///
    /// The same pixels always encode to the same bytes, which keeps the
    /// fingerprint stable across polls of an unchanged clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ImageEncoding`] if the dimensions do not match
    /// the buffer or the encoder fails, and [`CoreError::Oversize`] if the
    /// encoded PNG is larger than `limit`.
    #[track_caller]
    #[instrument(skip(rgba))]
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8], limit: usize) -> CoreResult<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(RGBA_CHANNELS));

        if expected != Some(rgba.len()) {
            return Err(CoreError::ImageEncoding {
                reason: format!(
                    "{}x{} image needs {:?} RGBA bytes, got {}",
                    width,
                    height,
                    expected,
                    rgba.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(CoreError::ImageEncoding {
                    reason: format!("Dimensions {}x{} out of range", width, height),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(rgba, w, h, ExtendedColorType::Rgba8)
            .map_err(|e| CoreError::ImageEncoding {
                reason: format!("PNG encoding failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(width, height, png_len = png.len(), "Clipboard image normalized to PNG");

        Self::from_png(png, limit)
    }

    /// Encoded PNG bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the encoded buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content fingerprint of the encoded bytes.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.bytes)
    }
}
