//! Driven port for the `users` profile collection.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{IdentityId, ProfileRecord};

define_port_error! {
    /// Failures raised by profile storage adapters.
    pub enum ProfileRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "profile store connection failed: {message}",
        /// The store answered with an error or an undecodable document.
        Query { message: String } => "profile store query failed: {message}",
    }
}

/// Whole-record access to stored profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile keyed by `identity`.
    async fn find(
        &self,
        identity: &IdentityId,
    ) -> Result<Option<ProfileRecord>, ProfileRepositoryError>;

    /// Fetch every stored profile.
    async fn list(&self) -> Result<Vec<ProfileRecord>, ProfileRepositoryError>;

    /// Write `record` under its identity, replacing any existing document.
    async fn put(&self, record: &ProfileRecord) -> Result<(), ProfileRepositoryError>;
}
