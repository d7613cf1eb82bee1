use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or environment variable could not be read or merged.
    #[error("failed to load lookup configuration: {0}")]
    Load(#[from] figment::Error),

    /// A loaded value the persons API cannot accept.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
