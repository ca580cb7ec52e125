//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie carries the signed-in identity and the role it was
//! dispatched under. Admin endpoints check the role on every request, so a
//! demoted profile keeps its old role only until the cookie is replaced.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Dispatch, Error, IdentityId, Role};

pub(crate) const IDENTITY_KEY: &str = "identity";
pub(crate) const ROLE_KEY: &str = "role";

/// Identity and role recovered from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Signed-in identity.
    pub identity: IdentityId,
    /// Role the login was dispatched under.
    pub role: Role,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the outcome of a successful login.
    pub fn persist_dispatch(&self, outcome: &Dispatch) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(IDENTITY_KEY, outcome.identity.as_ref())
            .and_then(|()| self.0.insert(ROLE_KEY, outcome.role))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in user, if the cookie carries a usable one.
    pub fn user(&self) -> Result<Option<SessionUser>, Error> {
        let read_error = |error: actix_session::SessionGetError| {
            Error::internal(format!("failed to read session: {error}"))
        };
        let Some(raw) = self.0.get::<String>(IDENTITY_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        let identity = match IdentityId::new(raw) {
            Ok(identity) => identity,
            Err(error) => {
                warn!("invalid identity in session cookie: {error}");
                return Ok(None);
            }
        };
        let role = match self.0.get::<Role>(ROLE_KEY) {
            Ok(Some(role)) => role,
            Ok(None) => return Ok(None),
            Err(error) => {
                warn!("invalid role in session cookie: {error}");
                return Ok(None);
            }
        };
        Ok(Some(SessionUser { identity, role }))
    }

    /// Require a signed-in user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<SessionUser, Error> {
        self.user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require a signed-in admin: `401` without a session, `403` otherwise.
    pub fn require_admin(&self) -> Result<SessionUser, Error> {
        let user = self.require_user()?;
        if user.role == Role::Admin {
            Ok(user)
        } else {
            Err(Error::forbidden("admin access required"))
        }
    }

    /// Drop the session and expire its cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
