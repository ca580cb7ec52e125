//! Shared handles over the in-memory adapters plus account seeding.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use super::{InMemoryBookingStore, InMemoryIdentityProvider, InMemoryProfileStore};
use crate::domain::ports::IdentityProviderError;
use crate::domain::{IdentityId, PROFILE_STATUS_ACTIVE, ProfileRecord, Role};

/// Account to create before the server accepts traffic.
#[derive(Debug, Clone)]
pub struct SeedAccount {
    /// Sign-in email.
    pub email: String,
    /// Sign-in password.
    pub password: String,
    /// Role written to the profile.
    pub role: Role,
    /// Display name written to the profile.
    pub name: String,
    /// Specialization, for doctors.
    pub specialization: Option<String>,
}

/// Seeding failed at the identity step.
#[derive(Debug, Error)]
#[error("failed to seed account {email}: {source}")]
pub struct SeedError {
    email: String,
    #[source]
    source: IdentityProviderError,
}

/// The three in-memory adapters sharing one process.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    pub identity: Arc<InMemoryIdentityProvider>,
    pub profiles: Arc<InMemoryProfileStore>,
    pub bookings: Arc<InMemoryBookingStore>,
}

impl MemoryDirectory {
    /// Empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `account` and write its profile.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when the identity provider refuses the account,
    /// for example because the email is already registered.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use clinic_backend::domain::Role;
    /// use clinic_backend::outbound::memory::{MemoryDirectory, SeedAccount};
    ///
    /// let directory = MemoryDirectory::new();
    /// directory
    ///     .seed_account(
    ///         &SeedAccount {
    ///             email: "admin@clinic.test".into(),
    ///             password: "admin-pass".into(),
    ///             role: Role::Admin,
    ///             name: "Clinic Admin".into(),
    ///             specialization: None,
    ///         },
    ///         Utc::now(),
    ///     )
    ///     .expect("seeded");
    /// assert_eq!(directory.profiles.len(), 1);
    /// ```
    pub fn seed_account(
        &self,
        account: &SeedAccount,
        created_at: DateTime<Utc>,
    ) -> Result<IdentityId, SeedError> {
        let identity = self
            .identity
            .register(&account.email, &account.password)
            .map_err(|source| SeedError {
                email: account.email.clone(),
                source,
            })?;
        let mut record = ProfileRecord::new(identity.clone());
        record.role = Some(account.role.as_str().to_owned());
        record.email = Some(account.email.trim().to_owned());
        record.name = Some(account.name.clone());
        record.specialization = account.specialization.clone();
        record.status = Some(PROFILE_STATUS_ACTIVE.to_owned());
        record.created_at = Some(created_at);
        self.profiles.upsert(record);
        info!(identity = %identity, role = %account.role, "account seeded");
        Ok(identity)
    }
}
