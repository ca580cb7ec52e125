//! Driven port for the external identity provider.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{IdentityId, LoginCredentials};

define_port_error! {
    /// Failures reported by the identity provider.
    ///
    /// The first five variants mirror provider error tags that users are
    /// told about specifically; everything else is `Rejected` or `Transport`.
    pub enum IdentityProviderError {
        /// Password does not match the account.
        WrongPassword => "wrong password",
        /// No account is registered under the email.
        UserNotFound => "user not found",
        /// The email is not well formed.
        InvalidEmail => "invalid email",
        /// Too many failed attempts; the provider is refusing for now.
        TooManyRequests => "too many requests",
        /// An account already exists for the email.
        EmailAlreadyInUse => "email already in use",
        /// The provider refused with some other tag.
        Rejected { tag: String } => "identity provider rejected the request: {tag}",
        /// The provider could not be reached or answered garbage.
        Transport { message: String } => "identity provider unavailable: {message}",
    }
}

impl IdentityProviderError {
    /// Stable tag used in logs and error details.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::WrongPassword => "wrong_password",
            Self::UserNotFound => "user_not_found",
            Self::InvalidEmail => "invalid_email",
            Self::TooManyRequests => "too_many_requests",
            Self::EmailAlreadyInUse => "email_already_in_use",
            Self::Rejected { tag } => tag.as_str(),
            Self::Transport { .. } => "transport",
        }
    }
}

/// Credential sign-in and account creation against the provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the identity they belong to.
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityId, IdentityProviderError>;

    /// Register a new account and return its identity.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityId, IdentityProviderError>;

    /// End the provider-side session for `identity`, where the provider keeps one.
    async fn sign_out(&self, identity: &IdentityId) -> Result<(), IdentityProviderError>;
}
