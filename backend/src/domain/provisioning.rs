//! Doctor account drafts and the fixed temporary secret.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{IdentityId, PROFILE_STATUS_ACTIVE, ProfileRecord, Role, RosterEntry};

/// Password assigned to every newly provisioned doctor account.
///
/// The admin relays it to the doctor, who is expected to change it.
pub const TEMPORARY_PASSWORD: &str = "password@1";

/// A required draft field was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftValidationError {
    field: &'static str,
}

impl DraftValidationError {
    /// First blank required field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }
}

impl fmt::Display for DraftValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Please fill required fields")
    }
}

impl std::error::Error for DraftValidationError {}

/// New doctor details entered by an admin.
///
/// ## Invariants
/// - `name`, `specialization`, and `email` are trimmed and non-empty.
/// - Blank optional fields are stored as `None`.
///
/// # Examples
/// ```
/// use clinic_backend::domain::DoctorDraft;
///
/// let draft = DoctorDraft::try_new("Ann Lee", "Cardiology", "ann@clinic.test", "", " MD ")
///     .expect("valid draft");
/// assert_eq!(draft.phone(), None);
/// assert_eq!(draft.qualification(), Some("MD"));
///
/// let err = DoctorDraft::try_new("Ann Lee", " ", "ann@clinic.test", "", "").unwrap_err();
/// assert_eq!(err.field(), "specialization");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDraft {
    name: String,
    specialization: String,
    email: String,
    phone: Option<String>,
    qualification: Option<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, DraftValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DraftValidationError { field })
    } else {
        Ok(trimmed.to_owned())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl DoctorDraft {
    /// Validate raw form input.
    pub fn try_new(
        name: &str,
        specialization: &str,
        email: &str,
        phone: &str,
        qualification: &str,
    ) -> Result<Self, DraftValidationError> {
        Ok(Self {
            name: required(name, "name")?,
            specialization: required(specialization, "specialization")?,
            email: required(email, "email")?,
            phone: optional(phone),
            qualification: optional(qualification),
        })
    }

    /// Doctor's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Medical specialization.
    #[must_use]
    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    /// Account email, used as the sign-in identifier.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone, if given.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Qualification, if given.
    #[must_use]
    pub fn qualification(&self) -> Option<&str> {
        self.qualification.as_deref()
    }

    /// Profile document to write once the identity exists.
    #[must_use]
    pub fn into_record(self, identity: IdentityId, created_at: DateTime<Utc>) -> ProfileRecord {
        ProfileRecord {
            identity,
            role: Some(Role::Doctor.as_str().to_owned()),
            email: Some(self.email),
            name: Some(self.name),
            specialization: Some(self.specialization),
            phone: self.phone,
            qualification: self.qualification,
            status: Some(PROFILE_STATUS_ACTIVE.to_owned()),
            created_at: Some(created_at),
        }
    }
}

/// Result of provisioning a doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedDoctor {
    /// Roster entry for the new doctor.
    pub doctor: RosterEntry,
    /// Secret to show the admin once.
    pub temporary_password: &'static str,
}
