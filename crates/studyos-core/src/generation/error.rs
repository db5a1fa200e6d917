//! Generation error types.

use thiserror::Error;

/// Why a generation call produced no text.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP transport error (connect, TLS, body read). The request URL is
    /// stripped before wrapping.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// `error.message` from the response envelope, or the raw body.
        message: String,
    },

    /// The service refused the prompt.
    #[error("prompt blocked: {reason}")]
    Blocked { reason: String },

    /// The response carried no candidate text.
    #[error("response contained no generated text")]
    EmptyResponse,

    /// The response body was not the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Failure reported by a backend that is not HTTP-based.
    #[error("{0}")]
    Service(String),
}
