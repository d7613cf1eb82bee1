//! # lookup-client
//!
//! Persons v4 API data source.
//!
//! [`PersonsLookup`] is built with an endpoint and an [`AuthObserver`]. After
//! [`PersonsLookup::connect`] it tracks the bearer header published by the
//! observer, and [`PersonsLookup::search`] classifies free text, issues one
//! GET, and parses the result into a [`PersonPage`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lookup_auth::{AuthBroadcaster, AuthEvent, AuthToken};
//! use lookup_client::{PersonsEndpoint, PersonsLookup};
//!
//! # async fn demo() -> Result<(), lookup_client::LookupError> {
//! let auth = Arc::new(AuthBroadcaster::new());
//! let lookup = PersonsLookup::new(PersonsEndpoint::default(), auth.clone())?;
//! lookup.connect();
//! auth.publish(AuthEvent::authenticated(AuthToken::new("token"), None));
//!
//! let page = lookup.search("Cougar, Cosmo", None).await?;
//! if let Some(next) = page.next.as_deref() {
//!     let _more = lookup.search("Cougar, Cosmo", Some(next)).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod endpoint;
mod error;
mod http;
pub mod personsv4;

pub use endpoint::PersonsEndpoint;
pub use error::LookupError;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lookup_auth::{AuthEvent, AuthObserver, SubscriptionHandle};
use lookup_core::{PersonPage, SearchQuery};
use tokio::sync::watch;

use crate::http::check_response;

// ── Client ─────────────────────────────────────────────────────────

/// Searches the persons API on behalf of whoever holds the auth observer.
pub struct PersonsLookup {
    http: reqwest::Client,
    endpoint: PersonsEndpoint,
    observer: Arc<dyn AuthObserver>,
    header: Arc<watch::Sender<Option<String>>>,
    subscription: Mutex<Option<SubscriptionHandle>>,
}

impl PersonsLookup {
    /// Build a lookup with its own HTTP client configured from `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: PersonsEndpoint,
        observer: Arc<dyn AuthObserver>,
    ) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(endpoint.user_agent.clone())
            .timeout(endpoint.timeout)
            .build()?;
        Ok(Self::with_client(http, endpoint, observer))
    }

    /// Build a lookup around an existing HTTP client.
    #[must_use]
    pub fn with_client(
        http: reqwest::Client,
        endpoint: PersonsEndpoint,
        observer: Arc<dyn AuthObserver>,
    ) -> Self {
        let (header, _) = watch::channel(None);
        Self {
            http,
            endpoint,
            observer,
            header: Arc::new(header),
            subscription: Mutex::new(None),
        }
    }

    /// Start tracking authentication state. Calling twice is a no-op.
    pub fn connect(&self) {
        let mut subscription = self.lock_subscription();
        if subscription.is_some() {
            return;
        }

        let header = Arc::clone(&self.header);
        let handle = self.observer.subscribe(Arc::new(move |event: &AuthEvent| {
            if let Some(error) = event.error.as_deref() {
                tracing::warn!(state = %event.state, error, "auth observer reported an error");
            }
            header.send_replace(event.authorization_header());
        }));
        tracing::debug!(?handle, "persons lookup connected to auth observer");
        *subscription = Some(handle);
    }

    /// Stop tracking authentication state. Calling twice is a no-op.
    ///
    /// The last header seen stays in place.
    pub fn disconnect(&self) {
        if let Some(handle) = self.lock_subscription().take() {
            self.observer.unsubscribe(handle);
            tracing::debug!(?handle, "persons lookup disconnected from auth observer");
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.lock_subscription().is_some()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.header.borrow().is_some()
    }

    /// Receiver that observes header changes, e.g. to wait for sign-in.
    #[must_use]
    pub fn auth_changes(&self) -> watch::Receiver<Option<String>> {
        self.header.subscribe()
    }

    #[must_use]
    pub const fn endpoint(&self) -> &PersonsEndpoint {
        &self.endpoint
    }

    /// Classify `search` the same way [`Self::search`] will.
    #[must_use]
    pub fn resolve_search_type(&self, search: &str) -> SearchQuery {
        lookup_core::resolve_search_type(search)
    }

    /// URL that [`Self::search`] would request.
    ///
    /// A non-empty `page_link` is used verbatim.
    #[must_use]
    pub fn request_url(&self, search: &str, page_link: Option<&str>) -> String {
        match page_link.filter(|link| !link.is_empty()) {
            Some(link) => link.to_string(),
            None => self.endpoint.search_url(&self.resolve_search_type(search)),
        }
    }

    /// Search the persons API.
    ///
    /// With `page_link`, fetches that page of a previous result instead of
    /// starting a new search. A 404 is an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotAuthenticated`] before any request if no
    /// bearer header is known, [`LookupError::Api`] for non-success statuses
    /// other than 404, [`LookupError::Http`] for transport failures, and
    /// [`LookupError::Parse`] for unreadable bodies.
    pub async fn search(
        &self,
        search: &str,
        page_link: Option<&str>,
    ) -> Result<PersonPage, LookupError> {
        let authorization = self.header.borrow().clone();
        let Some(authorization) = authorization else {
            return Err(LookupError::NotAuthenticated);
        };

        let url = self.request_url(search, page_link);
        tracing::debug!(%url, "querying persons v4");

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await?;

        let Some(resp) = check_response(resp).await? else {
            tracing::debug!("persons v4 returned 404; no matches");
            return Ok(PersonPage::default());
        };

        let body = resp.text().await?;
        let page = personsv4::parse(&body)?;
        tracing::debug!(
            people = page.len(),
            has_next = page.has_next(),
            "persons v4 search complete"
        );
        Ok(page)
    }

    fn lock_subscription(&self) -> MutexGuard<'_, Option<SubscriptionHandle>> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for PersonsLookup {
    fn drop(&mut self) {
        self.disconnect();
    }
}
