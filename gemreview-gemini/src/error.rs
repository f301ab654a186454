//! Error types for Gemini operations

use thiserror::Error;

/// Result type for Gemini operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the Gemini API
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or body decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL or model name
    #[error("Invalid Gemini URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No API key in the environment or the secrets file
    #[error("{0}")]
    MissingApiKey(String),

    /// Empty or rejected API key
    #[error("Gemini authentication error: {0}")]
    Auth(String),

    /// Quota or rate limit exceeded
    #[error("Gemini rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success response
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The prompt was blocked by safety filters
    #[error("Prompt blocked by Gemini: {0}")]
    Blocked(String),

    /// A response without any text
    #[error("Gemini returned no text (finish reason: {0})")]
    EmptyResponse(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<Error> for gemreview_core::Error {
    fn from(err: Error) -> Self {
        gemreview_core::Error::Backend(err.to_string())
    }
}
