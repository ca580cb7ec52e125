//! Profile store keyed by identity.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{IdentityId, ProfileRecord};

/// Profiles held in memory.
///
/// Records keep their first-insertion position, so `list` returns a stable
/// order the way a document store does.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    records: RwLock<Vec<ProfileRecord>>,
}

impl InMemoryProfileStore {
    /// Store pre-populated with `records`.
    #[must_use]
    pub fn new(records: Vec<ProfileRecord>) -> Self {
        let store = Self::default();
        for record in records {
            store.upsert(record);
        }
        store
    }

    /// Insert or replace the record for its identity.
    pub fn upsert(&self, record: ProfileRecord) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        match records
            .iter_mut()
            .find(|existing| existing.identity == record.identity)
        {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileStore {
    async fn find(
        &self,
        identity: &IdentityId,
    ) -> Result<Option<ProfileRecord>, ProfileRepositoryError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|record| &record.identity == identity)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ProfileRecord>, ProfileRepositoryError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn put(&self, record: &ProfileRecord) -> Result<(), ProfileRepositoryError> {
        self.upsert(record.clone());
        Ok(())
    }
}
