//! Error handling and custom error types
//!
//! Provides unified error handling across the proxy using thiserror. The
//! request boundary in `server` maps each variant to an HTTP status and the
//! OpenAI-style error envelope.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The external request is malformed (missing or unsupported model).
    #[error("{0}")]
    Validation(String),

    /// Gemini returned a non-success status.
    #[error("Gemini API error (status {status}): {body}")]
    VendorTransport { status: u16, body: String },

    /// The backend stream contained no non-blank lines.
    #[error("empty response stream from Gemini")]
    EmptyStream,

    /// No chunk in the backend stream carried a usable candidate.
    #[error("no candidates in Gemini response stream")]
    InvalidStream,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
