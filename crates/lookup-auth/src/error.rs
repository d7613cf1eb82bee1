use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Client credentials are partly configured; names the missing setting.
    #[error("client credentials incomplete: {0} is not set")]
    NotConfigured(&'static str),

    #[error("token request failed ({status}): {message}")]
    TokenRequest { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token response parse error: {0}")]
    Parse(String),
}
