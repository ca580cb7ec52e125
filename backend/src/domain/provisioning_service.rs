//! Doctor provisioning: create the identity, then write the profile.
//!
//! The two writes are not transactional. If the profile write fails after
//! the identity exists, the identity is left behind and logged so an
//! operator can clean it up.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    DoctorProvisioning, IdentityProvider, IdentityProviderError, ProfileRepository,
};
use crate::domain::{DoctorDraft, Error, ProvisionedDoctor, RosterEntry, TEMPORARY_PASSWORD};

const EMAIL_IN_USE_MESSAGE: &str =
    "This email is already registered. Please use a different email.";
const PROVISIONING_FAILED_MESSAGE: &str = "Failed to add doctor. Please try again.";

/// Provisioning service implementing [`DoctorProvisioning`].
#[derive(Clone)]
pub struct ProvisioningService<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<I, P> ProvisioningService<I, P> {
    /// Create a new service with the given adapters and clock.
    pub fn new(identity: Arc<I>, profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            identity,
            profiles,
            clock,
        }
    }
}

fn map_identity_error(err: &IdentityProviderError) -> Error {
    match err {
        IdentityProviderError::EmailAlreadyInUse => Error::conflict(EMAIL_IN_USE_MESSAGE),
        other => {
            error!(reason = other.tag(), error = %other, "doctor identity creation failed");
            Error::service_unavailable(PROVISIONING_FAILED_MESSAGE)
        }
    }
}

#[async_trait]
impl<I, P> DoctorProvisioning for ProvisioningService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn provision(&self, draft: DoctorDraft) -> Result<ProvisionedDoctor, Error> {
        let identity = self
            .identity
            .create_identity(draft.email(), TEMPORARY_PASSWORD)
            .await
            .map_err(|err| map_identity_error(&err))?;

        let record = draft.into_record(identity.clone(), self.clock.utc());
        if let Err(err) = self.profiles.put(&record).await {
            error!(
                identity = %identity,
                error = %err,
                "profile write failed; identity left without a profile"
            );
            return Err(Error::service_unavailable(PROVISIONING_FAILED_MESSAGE));
        }

        let Some(doctor) = RosterEntry::from_record(record) else {
            warn!(identity = %identity, "provisioned profile is not a roster entry");
            return Err(Error::internal("provisioned profile is not a doctor"));
        };
        info!(identity = %identity, "doctor provisioned");
        Ok(ProvisionedDoctor {
            doctor,
            temporary_password: TEMPORARY_PASSWORD,
        })
    }
}
