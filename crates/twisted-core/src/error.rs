//! Error types for calls against the generative endpoints.
//!
//! None of these escape the orchestrator: they are logged and turned into a
//! transcript fallback or dropped, depending on the request path.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerativeError>;

#[derive(Error, Debug)]
pub enum GenerativeError {
    /// No credential in settings or in the process environment
    #[error("no API key configured (set api_key, GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("generative API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("asset payload is not valid base64: {0}")]
    Asset(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
