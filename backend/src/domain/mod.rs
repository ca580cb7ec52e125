//! Domain primitives, services, and ports.
//!
//! Purpose: hold the clinic's business rules (role dispatch, roster
//! filtering, doctor provisioning) independent of HTTP and of the external
//! identity provider and database. Adapters talk to this module through the
//! traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - dispatch / Role / Destination: where a signed-in caller goes.
//! - RosterEntry / RosterFilter: the admin's doctor list.
//! - DoctorDraft / ProvisionedDoctor: adding doctors.
//! - SessionService / RosterService / ProvisioningService: driving-port
//!   implementations.

pub mod auth;
pub mod booking;
pub mod dispatch;
pub mod error;
pub mod ports;
pub mod profile;
pub mod provisioning;
mod provisioning_service;
pub mod roster;
mod roster_service;
mod session_service;
pub mod summary;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::booking::{Booking, DoctorRef, UNKNOWN_DOCTOR};
pub use self::dispatch::{
    Destination, Dispatch, DispatchError, Role, ValidatedProfile, dispatch, validate_profile,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::profile::{IdentityId, IdentityIdError, PROFILE_STATUS_ACTIVE, ProfileRecord};
pub use self::provisioning::{
    DoctorDraft, DraftValidationError, ProvisionedDoctor, TEMPORARY_PASSWORD,
};
pub use self::provisioning_service::ProvisioningService;
pub use self::roster::{RosterEntry, RosterFilter};
pub use self::roster_service::RosterService;
pub use self::session_service::SessionService;
pub use self::summary::{ChartSeries, DashboardSummary};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use clinic_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
