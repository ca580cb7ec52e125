//! Session endpoints.
//!
//! ```text
//! POST /api/v1/login {"email":"admin@clinic.test","password":"..."}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::domain::{Dispatch, Error, LoginCredentials, LoginValidationError, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@clinic.test")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Where the client should go after a successful login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub email: String,
    pub role: Role,
    /// Dashboard path, e.g. `/admin-dashboard`.
    #[schema(example = "/admin-dashboard")]
    pub destination: String,
}

impl From<&Dispatch> for LoginResponse {
    fn from(value: &Dispatch) -> Self {
        Self {
            email: value.email.clone(),
            role: value.role,
            destination: value.destination.path().to_owned(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// Authenticate, load the caller's profile, and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Profile cannot be dispatched", body = Error),
        (status = 404, description = "Profile not found", body = Error),
        (status = 429, description = "Too many failed attempts", body = Error),
        (status = 503, description = "Profile store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let outcome = state.login.login(&credentials).await?;
    session.persist_dispatch(&outcome)?;
    debug!(identity = %outcome.identity, "session established");
    Ok(web::Json(LoginResponse::from(&outcome)))
}

/// End the session. Succeeds whether or not one exists.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let user = session.user().unwrap_or_else(|err| {
        warn!(error = %err, "unreadable session cleared on logout");
        None
    });
    if let Some(user) = user {
        match state.login.logout(&user.identity).await {
            Ok(()) => info!(identity = %user.identity, "signed out"),
            Err(err) => warn!(identity = %user.identity, error = %err, "sign-out failed"),
        }
    }
    session.purge();
    HttpResponse::NoContent().finish()
}
