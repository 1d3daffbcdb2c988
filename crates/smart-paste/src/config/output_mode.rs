use serde::{Deserialize, Serialize};

/// Delivery mechanism for the cached URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Type the URL with synthesized keystrokes; the clipboard keeps the image.
    #[default]
    Type,
    /// Replace the clipboard content with the URL text.
    Clipboard,
}
