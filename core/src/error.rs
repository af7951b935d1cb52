//! Error types for the book API client.
//!
//! # Design
//! Three outcomes matter to callers: the request never completed
//! (`Transport`), the server answered with a rejection carrying a `detail`
//! (`NotFound` / `Rejected`), or the exchange itself was malformed
//! (`Serialization` / `Deserialization`). `NotFound` keeps its own variant
//! because callers often treat "no such book" differently from other
//! rejections.

use thiserror::Error;

/// Errors returned by `BookClient` parse methods and by transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404 for the requested book.
    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {detail}")]
    Rejected { status: u16, detail: String },

    /// The request could not be delivered or no response arrived.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Server-provided detail for application-level rejections.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { detail } | ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// True when the failure happened below HTTP (connection refused, reset, timeout).
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
