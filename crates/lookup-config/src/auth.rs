//! OAuth configuration for obtaining a persons API bearer token.

use serde::{Deserialize, Serialize};

fn default_token_url() -> String {
    "https://api.byu.edu/token".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Pre-issued bearer token. Takes precedence over client credentials.
    #[serde(default)]
    pub token: String,

    /// OAuth2 token endpoint for the client-credentials grant.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// OAuth2 client ID (consumer key).
    #[serde(default)]
    pub client_id: String,

    /// OAuth2 client secret (consumer secret).
    #[serde(default)]
    pub client_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            token_url: default_token_url(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

impl AuthConfig {
    pub fn has_static_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn has_client_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty() && !self.token_url.is_empty()
    }

    /// Name of the missing setting when client credentials are only partly
    /// filled in.
    pub fn missing_client_credential(&self) -> Option<&'static str> {
        match (self.client_id.is_empty(), self.client_secret.is_empty()) {
            (true, true) => None,
            (false, true) => Some("auth.client_secret"),
            (true, false) => Some("auth.client_id"),
            (false, false) if self.token_url.is_empty() => Some("auth.token_url"),
            (false, false) => None,
        }
    }

    /// Check if any way of authenticating is configured.
    pub fn is_configured(&self) -> bool {
        self.has_static_token() || self.has_client_credentials()
    }
}
