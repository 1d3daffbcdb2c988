use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Sync and content errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Request could not be sent or the response could not be read.
    #[error("Network error on {endpoint}: {source} {location}")]
    Network {
        /// Endpoint path the request targeted.
        endpoint: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Server answered with a status other than 200.
    #[error("Unexpected HTTP status {status} from {endpoint} {location}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// Endpoint path the request targeted.
        endpoint: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Response body did not match the expected shape.
    #[error("Invalid response from {endpoint}: {reason} {location}")]
    InvalidResponse {
        /// Endpoint path the request targeted.
        endpoint: String,
        /// Description of the decoding failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Image exceeds the configured size ceiling.
    #[error("Image too large: {size} bytes exceeds limit of {limit} bytes {location}")]
    Oversize {
        /// Encoded size of the image.
        size: usize,
        /// Configured ceiling.
        limit: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Raw pixels could not be normalized to PNG.
    #[error("Image encoding failed: {reason} {location}")]
    ImageEncoding {
        /// Description of the encoding failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client setup failed: {reason} {location}")]
    ClientSetup {
        /// Description of the setup failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub(crate) fn network(endpoint: &str, source: reqwest::Error) -> Self {
        CoreError::Network {
            endpoint: endpoint.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
