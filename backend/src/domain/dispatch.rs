//! Post-authentication role dispatch.
//!
//! Once the identity provider has vouched for a caller, their profile decides
//! which dashboard they land on. The role table is matched exactly: stored
//! data uses both `doctor` and `Doctor` (likewise for admin), while patients
//! only ever appear in lowercase.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{IdentityId, ProfileRecord};

/// Role a profile is dispatched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Clinic doctor.
    Doctor,
    /// Clinic patient.
    Patient,
    /// Clinic administrator.
    Admin,
}

impl Role {
    /// Look a stored role tag up in the dispatch table.
    ///
    /// # Examples
    /// ```
    /// use clinic_backend::domain::Role;
    ///
    /// assert_eq!(Role::from_tag("Doctor"), Some(Role::Doctor));
    /// assert_eq!(Role::from_tag("Patient"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "doctor" | "Doctor" => Some(Self::Doctor),
            "patient" => Some(Self::Patient),
            "admin" | "Admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Canonical tag written for new profiles.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Patient => "patient",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard a caller is sent to after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    /// `/doctor-dashboard`
    DoctorDashboard,
    /// `/patient-dashboard`
    PatientDashboard,
    /// `/admin-dashboard`
    AdminDashboard,
}

impl Destination {
    /// Destination for a dispatched role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Doctor => Self::DoctorDashboard,
            Role::Patient => Self::PatientDashboard,
            Role::Admin => Self::AdminDashboard,
        }
    }

    /// Path the client should navigate to.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::DoctorDashboard => "/doctor-dashboard",
            Self::PatientDashboard => "/patient-dashboard",
            Self::AdminDashboard => "/admin-dashboard",
        }
    }
}

/// Reasons a signed-in caller cannot be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No profile document exists for the identity.
    ProfileMissing,
    /// The role field is absent, empty, or not a string.
    InvalidRole,
    /// The email field is absent, empty, or not a string.
    InvalidEmail,
    /// The role tag is not in the dispatch table.
    UnknownRole {
        /// Tag as stored.
        tag: String,
    },
}

impl DispatchError {
    /// Message shown to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::ProfileMissing => "User data not found",
            Self::InvalidRole => "invalid role",
            Self::InvalidEmail => "invalid email",
            Self::UnknownRole { .. } => "Invalid user role",
        }
    }

    /// Machine-readable code for error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ProfileMissing => "profile_missing",
            Self::InvalidRole => "invalid_role_data",
            Self::InvalidEmail => "invalid_email_data",
            Self::UnknownRole { .. } => "unknown_role",
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole { tag } => write!(f, "unknown role tag '{tag}'"),
            other => f.write_str(other.user_message()),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Profile fields required before dispatch, in their stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProfile {
    /// Identity the profile belongs to.
    pub identity: IdentityId,
    /// Non-empty role tag, not yet looked up.
    pub role_tag: String,
    /// Non-empty email.
    pub email: String,
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Identity that signed in.
    pub identity: IdentityId,
    /// Email from the profile.
    pub email: String,
    /// Role from the dispatch table.
    pub role: Role,
    /// Dashboard to navigate to.
    pub destination: Destination,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.is_empty())
}

/// Check that a profile carries usable role and email strings.
///
/// Role is checked first, so a record missing both reports the role.
pub fn validate_profile(record: &ProfileRecord) -> Result<ValidatedProfile, DispatchError> {
    let role_tag = non_empty(record.role.as_ref()).ok_or(DispatchError::InvalidRole)?;
    let email = non_empty(record.email.as_ref()).ok_or(DispatchError::InvalidEmail)?;
    Ok(ValidatedProfile {
        identity: record.identity.clone(),
        role_tag: role_tag.to_owned(),
        email: email.to_owned(),
    })
}

/// Decide where a signed-in caller goes.
///
/// `record` is `None` when the database has no profile for the identity.
///
/// # Examples
/// ```
/// use clinic_backend::domain::{dispatch, Destination, IdentityId, ProfileRecord};
///
/// let mut record = ProfileRecord::new(IdentityId::new("uid-1").expect("id"));
/// record.role = Some("Admin".into());
/// record.email = Some("admin@clinic.test".into());
///
/// let outcome = dispatch(Some(&record)).expect("dispatches");
/// assert_eq!(outcome.destination, Destination::AdminDashboard);
/// ```
pub fn dispatch(record: Option<&ProfileRecord>) -> Result<Dispatch, DispatchError> {
    let record = record.ok_or(DispatchError::ProfileMissing)?;
    let ValidatedProfile {
        identity,
        role_tag,
        email,
    } = validate_profile(record)?;
    let role = Role::from_tag(&role_tag).ok_or(DispatchError::UnknownRole { tag: role_tag })?;
    Ok(Dispatch {
        identity,
        email,
        role,
        destination: Destination::for_role(role),
    })
}
