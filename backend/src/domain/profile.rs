//! Stored user profiles and the identity handle they are keyed by.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status written on freshly provisioned profiles and assumed when absent.
pub const PROFILE_STATUS_ACTIVE: &str = "active";

/// Validation errors for [`IdentityId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityIdError {
    /// The handle was empty.
    Empty,
    /// The handle carried leading or trailing whitespace.
    Padded,
}

impl fmt::Display for IdentityIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identity id must not be empty"),
            Self::Padded => write!(f, "identity id must not have surrounding whitespace"),
        }
    }
}

impl std::error::Error for IdentityIdError {}

/// Opaque handle issued by the identity provider.
///
/// The provider decides the format; this system only requires a non-empty
/// string without surrounding whitespace.
///
/// # Examples
/// ```
/// use clinic_backend::domain::IdentityId;
///
/// let id = IdentityId::new("x1Yz9").expect("valid handle");
/// assert_eq!(id.as_ref(), "x1Yz9");
/// assert!(IdentityId::new(" x1Yz9").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityId(String);

impl IdentityId {
    /// Validate and wrap a provider handle.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(IdentityIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(IdentityIdError::Padded);
        }
        Ok(Self(raw))
    }

    /// Mint a fresh handle, as an in-process provider would.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IdentityId {
    type Error = IdentityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IdentityId> for String {
    fn from(value: IdentityId) -> Self {
        value.0
    }
}

/// Profile document as stored by the external database.
///
/// Fields other than `identity` are optional because documents are written by
/// more than one client and are not schema-checked. Adapters decode any
/// non-string value as `None`, so "missing" and "wrong type" look the same to
/// the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Identity handle the document is keyed by.
    pub identity: IdentityId,
    /// Raw role tag, e.g. `doctor` or `Admin`.
    pub role: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Medical specialization, for doctors.
    pub specialization: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Professional qualification, for doctors.
    pub qualification: Option<String>,
    /// Account status, e.g. `active`.
    pub status: Option<String>,
    /// When the profile was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl ProfileRecord {
    /// Empty record for `identity`; callers fill in the fields they know.
    #[must_use]
    pub const fn new(identity: IdentityId) -> Self {
        Self {
            identity,
            role: None,
            email: None,
            name: None,
            specialization: None,
            phone: None,
            qualification: None,
            status: None,
            created_at: None,
        }
    }
}
