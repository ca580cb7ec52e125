//! Doctor roster entries and client-side style filtering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{IdentityId, PROFILE_STATUS_ACTIVE, ProfileRecord, Role};

/// One doctor as listed on the admin dashboard.
///
/// ## Invariants
/// - Built only from profiles whose role tag dispatches to [`Role::Doctor`].
/// - `status` falls back to `active` when the stored record omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    /// Identity handle, also the profile document id.
    #[schema(value_type = String, example = "Zr8pQ2")]
    pub id: IdentityId,
    /// Display name; empty when the stored record has none.
    pub name: String,
    /// Contact email; empty when the stored record has none.
    pub email: String,
    /// Medical specialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Professional qualification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    /// Account status.
    pub status: String,
    /// Creation time, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RosterEntry {
    /// Project a stored profile onto the roster, if it belongs there.
    ///
    /// Returns `None` for anything that is not a doctor.
    #[must_use]
    pub fn from_record(record: ProfileRecord) -> Option<Self> {
        let role = record.role.as_deref().and_then(Role::from_tag);
        if role != Some(Role::Doctor) {
            return None;
        }
        Some(Self {
            id: record.identity,
            name: record.name.unwrap_or_default(),
            email: record.email.unwrap_or_default(),
            specialization: record.specialization,
            phone: record.phone,
            qualification: record.qualification,
            status: record
                .status
                .unwrap_or_else(|| PROFILE_STATUS_ACTIVE.to_owned()),
            created_at: record.created_at,
        })
    }
}

/// Filter criteria for the roster.
///
/// Both criteria are optional and combine conjunctively. `search` matches a
/// case-insensitive substring of the name or email; `specialty` matches a
/// case-sensitive substring of the specialization.
///
/// # Examples
/// ```
/// use clinic_backend::domain::RosterFilter;
///
/// let filter = RosterFilter::new(Some("ann".into()), Some(String::new()));
/// assert_eq!(filter.search(), Some("ann"));
/// assert_eq!(filter.specialty(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    search: Option<String>,
    specialty: Option<String>,
}

impl RosterFilter {
    /// Build a filter; empty strings count as "not supplied".
    #[must_use]
    pub fn new(search: Option<String>, specialty: Option<String>) -> Self {
        Self {
            search: search
                .filter(|text| !text.is_empty())
                .map(|text| text.to_lowercase()),
            specialty: specialty.filter(|text| !text.is_empty()),
        }
    }

    /// Lowercased free-text criterion, if supplied.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Specialization criterion, if supplied.
    #[must_use]
    pub fn specialty(&self) -> Option<&str> {
        self.specialty.as_deref()
    }

    /// Whether no criterion is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_none() && self.specialty.is_none()
    }

    /// Whether `entry` satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, entry: &RosterEntry) -> bool {
        let specialty_ok = self.specialty.as_deref().is_none_or(|wanted| {
            entry
                .specialization
                .as_deref()
                .is_some_and(|have| have.contains(wanted))
        });
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            entry.name.to_lowercase().contains(needle)
                || entry.email.to_lowercase().contains(needle)
        });
        specialty_ok && search_ok
    }

    /// Entries satisfying the filter, in input order.
    #[must_use]
    pub fn apply(&self, roster: &[RosterEntry]) -> Vec<RosterEntry> {
        roster
            .iter()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect()
    }
}
