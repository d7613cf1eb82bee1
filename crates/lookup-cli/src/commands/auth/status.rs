use anyhow::Context;
use lookup_auth::AuthEvent;
use lookup_config::{AuthConfig, LookupConfig};
use serde::Serialize;

use crate::output::output;
use crate::ui::UiPrefs;

#[derive(Debug, Serialize)]
struct AuthStatusResponse {
    state: String,
    authenticated: bool,
    source: Option<&'static str>,
    client_id: Option<String>,
    expires_at: Option<String>,
    error: Option<String>,
}

pub async fn handle(ui: &UiPrefs, config: &LookupConfig) -> anyhow::Result<()> {
    let http = reqwest::Client::builder()
        .user_agent(config.persons.user_agent.clone())
        .build()
        .context("failed to build token client")?;
    let event = lookup_auth::resolve_event(&config.auth, &http).await;
    output(&status_response(&event, &config.auth), ui)
}

fn status_response(event: &AuthEvent, config: &AuthConfig) -> AuthStatusResponse {
    let source = if config.has_static_token() {
        Some("token")
    } else if config.has_client_credentials() {
        Some("client_credentials")
    } else {
        None
    };

    AuthStatusResponse {
        state: event.state.to_string(),
        authenticated: event.authorization_header().is_some(),
        source,
        client_id: event.token.as_ref().and_then(|t| t.client_id.clone()),
        expires_at: event
            .token
            .as_ref()
            .and_then(|t| t.expires_at)
            .map(|at| at.to_rfc3339()),
        error: event.error.clone(),
    }
}
