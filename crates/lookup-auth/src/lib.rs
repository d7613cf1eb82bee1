//! # lookup-auth
//!
//! Authentication for persons lookup.
//!
//! Provides the [`AuthObserver`] subscription capability and its in-process
//! [`AuthBroadcaster`], the [`AuthEvent`] payload delivered on state changes,
//! OAuth2 client-credentials token fetching, and resolution of the initial
//! auth state from configuration.

pub mod client_credentials;
pub mod error;
pub mod event;
pub mod observer;
pub mod resolve;

pub use error::AuthError;
pub use event::{AuthEvent, AuthState, AuthToken, AuthUser};
pub use observer::{AuthBroadcaster, AuthCallback, AuthObserver, SubscriptionHandle};
pub use resolve::resolve_event;
