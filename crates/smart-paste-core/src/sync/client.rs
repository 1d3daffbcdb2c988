//! HTTP client for the image hosting server.
//!
//! Talks to three endpoints: `GET /health`, `GET /check/{hash}` and
//! `POST /upload`. Only a 200 counts as an answer; everything else is an
//! error that the [`RemoteSync`] impl folds into its fail-soft result.

use crate::{
    CoreError, CoreResult, Fingerprint, ImageContent,
    sync::{RemoteSync, SyncResult, UploadResult, result::UploadResponse},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};
use tracing::{debug, info, instrument, warn};

/// Default server when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Existence checks are small; keep them snappy.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Uploads carry the whole image.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

const UPLOAD_FIELD: &str = "image";
const UPLOAD_FILE_NAME: &str = "clipboard_image.png";
const UPLOAD_MIME: &str = "image/png";

/// Connection settings for [`SyncClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncClientConfig {
    /// Server base URL, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Timeout for `/health` and `/check`.
    pub check_timeout: Duration,
    /// Timeout for `/upload`.
    pub upload_timeout: Duration,
}

impl Default for SyncClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            check_timeout: DEFAULT_CHECK_TIMEOUT,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }
}

/// Client for the image hosting server.
#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
    check_timeout: Duration,
    upload_timeout: Duration,
}

impl SyncClient {
    /// Build a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ClientSetup`] if the TLS backend or HTTP client
    /// cannot be initialized.
    #[track_caller]
    #[instrument]
    pub fn new(config: SyncClientConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("smart-paste/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::ClientSetup {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!(server_url = %base_url, "Sync client initialized");

        Ok(Self {
            http,
            base_url,
            check_timeout: config.check_timeout,
            upload_timeout: config.upload_timeout,
        })
    }

    /// Server base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /health` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Network`] or [`CoreError::HttpStatus`] when the
    /// server is unreachable or unhealthy.
    #[instrument(skip(self), fields(server_url = %self.base_url))]
    pub async fn health(&self) -> CoreResult<String> {
        let endpoint = "/health";

        let response = self
            .http
            .get(self.url(endpoint))
            .timeout(self.check_timeout)
            .send()
            .await
            .map_err(|e| CoreError::network(endpoint, e))?;

        expect_ok(response.status(), endpoint)?;

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::network(endpoint, e))?;

        debug!(body = %body, "Health check passed");

        Ok(body)
    }

    /// `GET /check/{hash}` without the fail-open fallback.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decoding error as-is.
    #[instrument(skip(self, fingerprint), fields(fingerprint = %fingerprint))]
    pub async fn try_check_exists(&self, fingerprint: &Fingerprint) -> CoreResult<SyncResult> {
        let endpoint = format!("/check/{}", fingerprint.to_hex());

        let response = self
            .http
            .get(self.url(&endpoint))
            .timeout(self.check_timeout)
            .send()
            .await
            .map_err(|e| CoreError::network(&endpoint, e))?;

        expect_ok(response.status(), &endpoint)?;

        response
            .json::<SyncResult>()
            .await
            .map_err(|e| CoreError::InvalidResponse {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// `POST /upload` without the fail-soft fallback.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decoding error as-is.
    #[instrument(skip(self, image), fields(image_len = image.len()))]
    pub async fn try_upload(&self, image: &ImageContent) -> CoreResult<UploadResult> {
        let endpoint = "/upload";

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)
            .map_err(|e| CoreError::ClientSetup {
                reason: format!("Invalid upload content type: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.url(endpoint))
            .timeout(self.upload_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CoreError::network(endpoint, e))?;

        expect_ok(response.status(), endpoint)?;

        let body = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| CoreError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(body.into())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl RemoteSync for SyncClient {
    async fn check_exists(&self, fingerprint: &Fingerprint) -> SyncResult {
        match self.try_check_exists(fingerprint).await {
            Ok(result) => result,
            Err(e) => {
                warn!(fingerprint = %fingerprint, error = %e, "Existence check failed, treating as not found");
                SyncResult::not_found()
            }
        }
    }

    async fn upload(&self, image: &ImageContent) -> UploadResult {
        match self.try_upload(image).await {
            Ok(result) => result,
            Err(e) => {
                warn!(image_len = image.len(), error = %e, "Upload failed");
                UploadResult::failed()
            }
        }
    }
}

#[track_caller]
fn expect_ok(status: StatusCode, endpoint: &str) -> CoreResult<()> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(CoreError::HttpStatus {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
