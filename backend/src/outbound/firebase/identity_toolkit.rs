//! Reqwest-backed Identity Toolkit adapter.
//!
//! Email/password accounts are driven through `accounts:signInWithPassword`
//! and `accounts:signUp`. The provider reports failures as an upper-case tag
//! in `error.message`, sometimes followed by ` : ` and prose.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::{AccountResponseDto, ErrorEnvelopeDto, PasswordRequestDto};
use super::{body_preview, join_endpoint};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{IdentityId, LoginCredentials};

const SIGN_IN_PATH: &str = "v1/accounts:signInWithPassword";
const SIGN_UP_PATH: &str = "v1/accounts:signUp";

/// Identity Toolkit client authenticating with a web API key.
pub struct IdentityToolkitClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl IdentityToolkitClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    async fn post_password(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentityId, IdentityProviderError> {
        let url = join_endpoint(&self.endpoint, path)
            .map_err(|err| IdentityProviderError::transport(err.to_string()))?;
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequestDto {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|err| IdentityProviderError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| IdentityProviderError::transport(err.to_string()))?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "identity toolkit refused request");
            return Err(map_error_body(body.as_ref()));
        }

        let account: AccountResponseDto = serde_json::from_slice(body.as_ref()).map_err(|err| {
            IdentityProviderError::transport(format!("invalid account payload: {err}"))
        })?;
        IdentityId::new(account.local_id)
            .map_err(|err| IdentityProviderError::transport(format!("invalid localId: {err}")))
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityId, IdentityProviderError> {
        self.post_password(SIGN_IN_PATH, credentials.email(), credentials.password())
            .await
    }

    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityId, IdentityProviderError> {
        self.post_password(SIGN_UP_PATH, email, password).await
    }

    async fn sign_out(&self, identity: &IdentityId) -> Result<(), IdentityProviderError> {
        // Password sessions are client-held ID tokens; nothing to revoke here.
        debug!(identity = %identity, "identity toolkit sign-out is a no-op");
        Ok(())
    }
}

fn map_error_body(body: &[u8]) -> IdentityProviderError {
    match serde_json::from_slice::<ErrorEnvelopeDto>(body) {
        Ok(envelope) => map_error_tag(&envelope.error.message),
        Err(_) => IdentityProviderError::transport(format!(
            "unexpected error payload: {}",
            body_preview(body)
        )),
    }
}

fn map_error_tag(message: &str) -> IdentityProviderError {
    let tag = message
        .split_once(" : ")
        .map_or(message, |(tag, _)| tag)
        .trim();
    match tag {
        "EMAIL_NOT_FOUND" => IdentityProviderError::UserNotFound,
        "INVALID_PASSWORD" => IdentityProviderError::WrongPassword,
        "INVALID_EMAIL" => IdentityProviderError::InvalidEmail,
        "EMAIL_EXISTS" => IdentityProviderError::EmailAlreadyInUse,
        _ if tag.starts_with("TOO_MANY_ATTEMPTS_TRY_LATER") => {
            IdentityProviderError::TooManyRequests
        }
        other => IdentityProviderError::rejected(other),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network error mapping.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("EMAIL_NOT_FOUND", IdentityProviderError::UserNotFound)]
    #[case("INVALID_PASSWORD", IdentityProviderError::WrongPassword)]
    #[case("INVALID_EMAIL", IdentityProviderError::InvalidEmail)]
    #[case("EMAIL_EXISTS", IdentityProviderError::EmailAlreadyInUse)]
    #[case(
        "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled",
        IdentityProviderError::TooManyRequests
    )]
    #[case(
        "WEAK_PASSWORD : Password should be at least 6 characters",
        IdentityProviderError::rejected("WEAK_PASSWORD")
    )]
    #[case(
        "INVALID_LOGIN_CREDENTIALS",
        IdentityProviderError::rejected("INVALID_LOGIN_CREDENTIALS")
    )]
    fn maps_provider_tags(#[case] message: &str, #[case] expected: IdentityProviderError) {
        assert_eq!(map_error_tag(message), expected);
    }

    #[test]
    fn decodes_error_envelope() {
        let body = br#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        assert_eq!(map_error_body(body), IdentityProviderError::EmailAlreadyInUse);
    }

    #[test]
    fn unreadable_error_body_is_a_transport_failure() {
        let err = map_error_body(b"<html>bad gateway</html>");
        assert!(
            matches!(err, IdentityProviderError::Transport { .. }),
            "non-JSON bodies should map to Transport"
        );
    }
}
