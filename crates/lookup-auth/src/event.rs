//! Authentication state change events.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Where the authentication flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// Nothing has been decided yet (startup, or a refresh in flight).
    Indeterminate,
    Unauthenticated,
    Authenticated,
    /// A token was issued but is no longer valid.
    Expired,
    Error,
}

impl AuthState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indeterminate => "indeterminate",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
            Self::Expired => "expired",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An OAuth bearer token.
///
/// `Debug` never prints the token value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    bearer: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub client_id: Option<String>,
}

impl AuthToken {
    #[must_use]
    pub fn new(bearer: impl Into<String>) -> Self {
        Self {
            bearer: bearer.into(),
            expires_at: None,
            client_id: None,
        }
    }

    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    #[must_use]
    pub fn bearer(&self) -> &str {
        &self.bearer
    }

    /// Value for the `Authorization` request header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.bearer)
    }

    /// True if the token has an expiry within `buffer_secs` of now.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|exp| exp <= Utc::now() + TimeDelta::seconds(buffer_secs))
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("bearer", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// The signed-in person, when the auth flow knows who it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub net_id: Option<String>,
    pub byu_id: Option<String>,
    pub name: Option<String>,
}

/// Payload delivered to observers on every authentication state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    pub state: AuthState,
    pub token: Option<AuthToken>,
    pub user: Option<AuthUser>,
    pub error: Option<String>,
}

impl AuthEvent {
    #[must_use]
    pub const fn indeterminate() -> Self {
        Self {
            state: AuthState::Indeterminate,
            token: None,
            user: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            state: AuthState::Unauthenticated,
            token: None,
            user: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn authenticated(token: AuthToken, user: Option<AuthUser>) -> Self {
        Self {
            state: AuthState::Authenticated,
            token: Some(token),
            user,
            error: None,
        }
    }

    #[must_use]
    pub const fn expired() -> Self {
        Self {
            state: AuthState::Expired,
            token: None,
            user: None,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            state: AuthState::Error,
            token: None,
            user: None,
            error: Some(error.into()),
        }
    }

    /// `Authorization` header carried by this event, if any.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(AuthToken::authorization_header)
    }
}
