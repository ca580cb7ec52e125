//! Driving port for session establishment.
//!
//! Inbound adapters call this port to turn credentials into a dispatch
//! decision without knowing which provider or database sits behind it.

use async_trait::async_trait;

use crate::domain::{Dispatch, Error, IdentityId, LoginCredentials};

/// Sign-in and sign-out use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate, load the caller's profile, and decide their destination.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Dispatch, Error>;

    /// End the caller's provider session.
    async fn logout(&self, identity: &IdentityId) -> Result<(), Error>;
}
