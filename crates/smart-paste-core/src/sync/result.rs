use serde::Deserialize;

/// Answer to an existence check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SyncResult {
    /// Whether the server already hosts this content.
    #[serde(default)]
    pub exists: bool,
    /// Hosted URL, when the content exists.
    #[serde(default)]
    pub url: Option<String>,
}

impl SyncResult {
    /// The fail-open answer used whenever a check cannot be completed.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Hosted URL, only when the server reported a hit.
    pub fn hit_url(&self) -> Option<&str> {
        if self.exists { self.url.as_deref() } else { None }
    }
}

/// Answer to an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResult {
    /// Whether the server accepted the upload.
    pub success: bool,
    /// Hosted URL of the uploaded content.
    pub url: Option<String>,
    /// Server already had identical content and returned its URL.
    pub was_existing: bool,
}

impl UploadResult {
    /// The answer used whenever an upload cannot be completed.
    pub fn failed() -> Self {
        Self::default()
    }

    /// Hosted URL, only when the upload succeeded.
    pub fn success_url(&self) -> Option<&str> {
        if self.success { self.url.as_deref() } else { None }
    }
}

/// `POST /upload` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) exists: bool,
}

impl From<UploadResponse> for UploadResult {
    fn from(body: UploadResponse) -> Self {
        Self {
            success: body.success,
            url: body.url,
            was_existing: body.exists,
        }
    }
}
