//! Identity provider backed by an in-process account table.
//!
//! Passwords are kept only as salted SHA-256 digests. The adapter reproduces
//! the provider behaviours the login flow depends on: unknown accounts,
//! wrong passwords, malformed emails, duplicate registrations, and a lockout
//! after repeated failed sign-ins.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{IdentityId, LoginCredentials};

/// Consecutive failed sign-ins after which an account is locked.
pub const MAX_FAILED_SIGN_INS: u32 = 5;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const WEAK_PASSWORD_TAG: &str = "WEAK_PASSWORD";

#[derive(Debug)]
struct Account {
    identity: IdentityId,
    salt: [u8; 16],
    digest: String,
    failed_sign_ins: u32,
}

impl Account {
    fn new(password: &str) -> Self {
        let salt = *Uuid::new_v4().as_bytes();
        Self {
            identity: IdentityId::random(),
            salt,
            digest: password_digest(&salt, password),
            failed_sign_ins: 0,
        }
    }

    fn verify(&self, password: &str) -> bool {
        password_digest(&self.salt, password) == self.digest
    }
}

fn password_digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Normalised account key, or `None` when the email is malformed.
fn account_key(email: &str) -> Option<String> {
    let email = email.trim();
    let (local, domain) = email.split_once('@')?;
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace);
    well_formed.then(|| email.to_lowercase())
}

/// In-memory [`IdentityProvider`].
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryIdentityProvider {
    /// Empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account synchronously.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidEmail`, `EmailAlreadyInUse`, or
    /// `Rejected { tag: "WEAK_PASSWORD" }` as the remote provider would.
    pub fn register(&self, email: &str, password: &str) -> Result<IdentityId, IdentityProviderError> {
        let key = account_key(email).ok_or(IdentityProviderError::InvalidEmail)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityProviderError::rejected(WEAK_PASSWORD_TAG));
        }
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&key) {
            return Err(IdentityProviderError::EmailAlreadyInUse);
        }
        let account = Account::new(password);
        let identity = account.identity.clone();
        accounts.insert(key, account);
        debug!(identity = %identity, "identity registered");
        Ok(identity)
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityId, IdentityProviderError> {
        let key = account_key(credentials.email()).ok_or(IdentityProviderError::InvalidEmail)?;
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        let account = accounts
            .get_mut(&key)
            .ok_or(IdentityProviderError::UserNotFound)?;
        if account.failed_sign_ins >= MAX_FAILED_SIGN_INS {
            return Err(IdentityProviderError::TooManyRequests);
        }
        if !account.verify(credentials.password()) {
            account.failed_sign_ins += 1;
            return Err(IdentityProviderError::WrongPassword);
        }
        account.failed_sign_ins = 0;
        Ok(account.identity.clone())
    }

    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityId, IdentityProviderError> {
        self.register(email, password)
    }

    async fn sign_out(&self, identity: &IdentityId) -> Result<(), IdentityProviderError> {
        debug!(identity = %identity, "identity signed out");
        Ok(())
    }
}
