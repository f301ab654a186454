//! Error types for gemreview

use thiserror::Error;

/// Result type alias for gemreview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gemreview operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Uploaded file was rejected before decoding
    #[error("Upload error: {0}")]
    Upload(String),

    /// Uploaded file is not valid UTF-8
    #[error("Could not decode {file} as UTF-8: {source}")]
    Decode {
        file: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Unknown language name
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Failure reported by the model backend, rendered verbatim
    #[error("{0}")]
    Backend(String),
}
