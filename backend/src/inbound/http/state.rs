//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    BookingRepository, DoctorProvisioning, IdentityProvider, LoginService, ProfileRepository,
    RosterQuery,
};
use crate::domain::{ProvisioningService, RosterService, SessionService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub roster: Arc<dyn RosterQuery>,
    pub provisioning: Arc<dyn DoctorProvisioning>,
}

impl HttpState {
    /// Construct state from the driving ports.
    pub fn new(
        login: Arc<dyn LoginService>,
        roster: Arc<dyn RosterQuery>,
        provisioning: Arc<dyn DoctorProvisioning>,
    ) -> Self {
        Self {
            login,
            roster,
            provisioning,
        }
    }

    /// Wire the domain services over one set of driven adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use clinic_backend::inbound::http::state::HttpState;
    /// use clinic_backend::outbound::memory::MemoryDirectory;
    /// use mockable::DefaultClock;
    ///
    /// let directory = MemoryDirectory::new();
    /// let state = HttpState::with_services(
    ///     directory.identity,
    ///     directory.profiles,
    ///     directory.bookings,
    ///     Arc::new(DefaultClock),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn with_services<I, P, B>(
        identity: Arc<I>,
        profiles: Arc<P>,
        bookings: Arc<B>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        I: IdentityProvider + 'static,
        P: ProfileRepository + 'static,
        B: BookingRepository + 'static,
    {
        Self::new(
            Arc::new(SessionService::new(identity.clone(), profiles.clone())),
            Arc::new(RosterService::new(profiles.clone(), bookings)),
            Arc::new(ProvisioningService::new(identity, profiles, clock)),
        )
    }
}
