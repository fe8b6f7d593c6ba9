//! Errors returned by chat backends.

use thiserror::Error;

/// A failed round trip to the chat backend.
///
/// The `Display` text is what the chat view shows after `Error: `.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status and a body that is not JSON.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not the JSON we expected.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response parsed but lacks a field we need.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}
