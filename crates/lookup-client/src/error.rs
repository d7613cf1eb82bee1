//! Lookup error types.

use thiserror::Error;

/// Errors that can occur while searching the persons API.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No bearer header is available; raised before any request is made.
    #[error("Not authenticated!")]
    NotAuthenticated,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status other than 404.
    #[error("Error {status} while querying personsv4")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Failed to parse a persons response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl LookupError {
    /// HTTP status for API errors, `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
