//! Errors raised by [`crate::Backend`] implementations and the typed
//! [`crate::Directory`] layer on top of them.

use thiserror::Error;

/// Failure of a call into the remote data client.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, connection reset, offline).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        status: u16,
        /// Backend-specific error code, e.g. `PGRST116` or `23505`.
        code: Option<String>,
        message: String,
    },

    /// A row or response body did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// Sign-up or sign-in was rejected. The message is shown to the user as-is.
    #[error("{0}")]
    Auth(String),

    #[error("not signed in")]
    NotAuthenticated,

    #[error("storage error: {0}")]
    Storage(String),

    /// A single-row query matched more than one row.
    #[error("single-row query matched {0} rows")]
    MultipleRows(usize),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
