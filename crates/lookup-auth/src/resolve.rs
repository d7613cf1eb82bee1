use lookup_config::AuthConfig;

use crate::client_credentials;
use crate::error::AuthError;
use crate::event::{AuthEvent, AuthToken};

/// Seconds before expiry at which a token is treated as already expired.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Work out the initial authentication state from configuration.
///
/// Priority: static token (`auth.token` / `LOOKUP_AUTH__TOKEN`) → client
/// credentials → unauthenticated. Partly configured credentials and a failed
/// token request both become an
/// [`AuthState::Error`](crate::AuthState::Error) event rather than an `Err`,
/// so observers see it like any other state change.
pub async fn resolve_event(config: &AuthConfig, http: &reqwest::Client) -> AuthEvent {
    if config.has_static_token() {
        tracing::debug!("using static bearer token from configuration");
        return AuthEvent::authenticated(AuthToken::new(config.token.trim()), None);
    }

    if let Some(missing) = config.missing_client_credential() {
        let error = AuthError::NotConfigured(missing);
        tracing::warn!(%error, "ignoring partial client credentials");
        return AuthEvent::failed(error.to_string());
    }

    if !config.has_client_credentials() {
        tracing::debug!("no auth configured");
        return AuthEvent::unauthenticated();
    }

    match client_credentials::fetch_token(
        http,
        &config.token_url,
        &config.client_id,
        &config.client_secret,
    )
    .await
    {
        Ok(token) if token.is_near_expiry(EXPIRY_BUFFER_SECS) => {
            tracing::warn!(
                expires_at = ?token.expires_at,
                "issued token expires within {EXPIRY_BUFFER_SECS}s"
            );
            AuthEvent::expired()
        }
        Ok(token) => AuthEvent::authenticated(token, None),
        Err(error) => {
            tracing::warn!(%error, "client-credentials token request failed");
            AuthEvent::failed(error.to_string())
        }
    }
}
