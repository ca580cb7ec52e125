//! Driving port for adding doctors to the roster.

use async_trait::async_trait;

use crate::domain::{DoctorDraft, Error, ProvisionedDoctor};

/// Doctor account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorProvisioning: Send + Sync {
    /// Create the doctor's identity and profile.
    async fn provision(&self, draft: DoctorDraft) -> Result<ProvisionedDoctor, Error>;
}
