//! Session establishment: sign in, load the profile, dispatch by role.
//!
//! Provider failures are translated into the fixed set of user-facing
//! messages the login form has always shown; anything unrecognised falls back
//! to a generic credentials message.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, LoginService, ProfileRepository,
    ProfileRepositoryError,
};
use crate::domain::{Dispatch, DispatchError, Error, IdentityId, LoginCredentials, dispatch};

const WRONG_PASSWORD_MESSAGE: &str = "Incorrect password. Please try again.";
const USER_NOT_FOUND_MESSAGE: &str = "No account found with this email.";
const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";
const RATE_LIMITED_MESSAGE: &str = "Too many failed attempts. Please try again later.";
const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Login service backed by an identity provider and profile store.
#[derive(Clone)]
pub struct SessionService<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
}

impl<I, P> SessionService<I, P> {
    /// Create a new service with the given adapters.
    pub fn new(identity: Arc<I>, profiles: Arc<P>) -> Self {
        Self { identity, profiles }
    }
}

impl<I, P> SessionService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    fn map_sign_in_error(error: &IdentityProviderError) -> Error {
        let details = json!({ "code": error.tag() });
        let mapped = match error {
            IdentityProviderError::WrongPassword => Error::unauthorized(WRONG_PASSWORD_MESSAGE),
            IdentityProviderError::UserNotFound => Error::unauthorized(USER_NOT_FOUND_MESSAGE),
            IdentityProviderError::InvalidEmail => Error::invalid_request(INVALID_EMAIL_MESSAGE),
            IdentityProviderError::TooManyRequests => {
                Error::too_many_requests(RATE_LIMITED_MESSAGE)
            }
            IdentityProviderError::EmailAlreadyInUse
            | IdentityProviderError::Rejected { .. }
            | IdentityProviderError::Transport { .. } => Error::unauthorized(LOGIN_FAILED_MESSAGE),
        };
        mapped.with_details(details)
    }

    fn map_profile_error(error: &ProfileRepositoryError) -> Error {
        error!(error = %error, "profile lookup failed during login");
        let (mapped, code) = match error {
            ProfileRepositoryError::Connection { .. } => (
                Error::service_unavailable(LOGIN_FAILED_MESSAGE),
                "profile_store_unavailable",
            ),
            ProfileRepositoryError::Query { .. } => (
                Error::internal(LOGIN_FAILED_MESSAGE),
                "profile_store_error",
            ),
        };
        mapped.with_details(json!({ "code": code }))
    }

    fn map_dispatch_error(error: &DispatchError) -> Error {
        let details = json!({ "code": error.code() });
        let mapped = match error {
            DispatchError::ProfileMissing => Error::not_found(error.user_message()),
            DispatchError::InvalidRole
            | DispatchError::InvalidEmail
            | DispatchError::UnknownRole { .. } => Error::forbidden(error.user_message()),
        };
        mapped.with_details(details)
    }
}

#[async_trait]
impl<I, P> LoginService for SessionService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<Dispatch, Error> {
        let identity = self.identity.sign_in(credentials).await.map_err(|err| {
            warn!(reason = err.tag(), "sign-in rejected");
            Self::map_sign_in_error(&err)
        })?;

        let record = self
            .profiles
            .find(&identity)
            .await
            .map_err(|err| Self::map_profile_error(&err))?;

        let outcome = dispatch(record.as_ref()).map_err(|err| {
            warn!(identity = %identity, reason = err.code(), "dispatch refused: {err}");
            Self::map_dispatch_error(&err)
        })?;

        info!(
            identity = %outcome.identity,
            role = %outcome.role,
            destination = outcome.destination.path(),
            "login dispatched"
        );
        Ok(outcome)
    }

    async fn logout(&self, identity: &IdentityId) -> Result<(), Error> {
        if let Err(err) = self.identity.sign_out(identity).await {
            warn!(identity = %identity, reason = err.tag(), "provider sign-out failed: {err}");
        }
        Ok(())
    }
}
