//! Error types for the LinkedIn API client.

use thiserror::Error;

/// Errors that can occur when interacting with the LinkedIn API.
#[derive(Debug, Error)]
pub enum LinkedinError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The login flow asked for an additional verification step
    /// (captcha, e-mail PIN, ...). Carries the `login_result` value.
    #[error("login challenge required: {0}")]
    Challenge(String),

    /// The login endpoint answered `401` (bad credentials).
    #[error("unauthorized")]
    Unauthorized,

    /// A request that must succeed came back with an unexpected HTTP status.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path that produced the status.
        endpoint: String,
    },

    /// A cookie the session depends on (e.g. `JSESSIONID`) is absent.
    #[error("missing `{0}` cookie")]
    MissingCookie(&'static str),

    /// File I/O error (cookie cache read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors (e.g. missing cache directory).
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for `Result<T, LinkedinError>`.
pub type Result<T> = std::result::Result<T, LinkedinError>;
