use std::sync::Arc;

use anyhow::Context;
use lookup_auth::{AuthBroadcaster, AuthEvent, AuthObserver};
use lookup_client::{PersonsEndpoint, PersonsLookup};
use lookup_config::LookupConfig;

/// Shared application resources initialized once per search command.
pub struct AppContext {
    pub auth: Arc<AuthBroadcaster>,
    pub lookup: PersonsLookup,
}

impl AppContext {
    /// Build the lookup, connect it to the auth broadcaster, and publish the
    /// auth state resolved from configuration.
    pub async fn init(config: &LookupConfig) -> anyhow::Result<Self> {
        let auth = Arc::new(AuthBroadcaster::new());
        let observer: Arc<dyn AuthObserver> = auth.clone();

        let lookup = PersonsLookup::new(PersonsEndpoint::from(&config.persons), observer)
            .context("failed to build persons lookup client")?;
        lookup.connect();
        auth.publish(AuthEvent::indeterminate());

        let http = reqwest::Client::builder()
            .user_agent(config.persons.user_agent.clone())
            .build()
            .context("failed to build token client")?;
        let event = lookup_auth::resolve_event(&config.auth, &http).await;
        if let Some(error) = event.error.as_deref() {
            tracing::warn!(error, "authentication did not succeed");
        }
        tracing::debug!(state = %event.state, "resolved auth state");
        auth.publish(event);

        Ok(Self { auth, lookup })
    }
}
