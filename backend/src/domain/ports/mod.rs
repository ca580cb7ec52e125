//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `RosterQuery`, `DoctorProvisioning`) are
//! what inbound adapters call. Driven ports (`IdentityProvider`,
//! `ProfileRepository`, `BookingRepository`) are what outbound adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_repository;
mod doctor_provisioning;
mod identity_provider;
mod login_service;
mod profile_repository;
mod roster_query;

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
pub use doctor_provisioning::DoctorProvisioning;
#[cfg(test)]
pub use doctor_provisioning::MockDoctorProvisioning;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::RosterQuery;
