//! DTOs for the Firebase REST APIs.
//!
//! Firestore documents arrive as maps of typed values (`{"stringValue": ..}`).
//! The adapter decodes into these DTOs first and maps them onto domain records
//! in one pass. Fields of an unexpected type decode as absent.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::FirebaseError;
use crate::domain::{Booking, DoctorRef, IdentityId, ProfileRecord};

/// One Firestore typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) enum FirestoreValue {
    StringValue(String),
    IntegerValue(String),
    DoubleValue(f64),
    BooleanValue(bool),
    NullValue(()),
    TimestampValue(String),
    ReferenceValue(String),
    BytesValue(String),
    GeoPointValue(serde_json::Value),
    MapValue(MapValue),
    ArrayValue(ArrayValue),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct MapValue {
    #[serde(default)]
    pub(super) fields: BTreeMap<String, FirestoreValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct ArrayValue {
    #[serde(default)]
    pub(super) values: Vec<FirestoreValue>,
}

/// Firestore document as returned by `get` and `list`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct DocumentDto {
    /// Full resource name ending in `/{collection}/{id}`.
    pub(super) name: String,
    #[serde(default)]
    pub(super) fields: BTreeMap<String, FirestoreValue>,
}

/// Body sent when writing a document.
#[derive(Debug, Serialize)]
pub(super) struct DocumentWriteDto {
    pub(super) fields: BTreeMap<String, FirestoreValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListDocumentsDto {
    #[serde(default)]
    pub(super) documents: Vec<DocumentDto>,
    pub(super) next_page_token: Option<String>,
}

/// Error envelope shared by Identity Toolkit and Firestore.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PasswordRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccountResponseDto {
    pub(super) local_id: String,
}

impl DocumentDto {
    /// Last path segment of the resource name.
    pub(super) fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    fn string(&self, key: &str) -> Option<String> {
        string_of(self.fields.get(key)?)
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.fields.get(key)? {
            FirestoreValue::TimestampValue(raw) | FirestoreValue::StringValue(raw) => {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|parsed| parsed.with_timezone(&Utc))
            }
            _ => None,
        }
    }

    pub(super) fn into_profile(self) -> Result<ProfileRecord, FirebaseError> {
        let identity =
            IdentityId::new(self.id()).map_err(|source| FirebaseError::DocumentId {
                name: self.name.clone(),
                source,
            })?;
        Ok(ProfileRecord {
            role: self.string("role"),
            email: self.string("email"),
            name: self.string("name"),
            specialization: self.string("specialization"),
            phone: self.string("phone"),
            qualification: self.string("qualification"),
            status: self.string("status"),
            created_at: self.timestamp("createdAt"),
            identity,
        })
    }

    pub(super) fn into_booking(self) -> Booking {
        let doctor = match self.fields.get("doctor") {
            Some(FirestoreValue::MapValue(map)) => map
                .fields
                .get("name")
                .and_then(string_of)
                .map(|name| DoctorRef { name }),
            _ => None,
        };
        Booking {
            id: self.id().to_owned(),
            patient_name: self.string("patientName").unwrap_or_default(),
            date: self.string("date").unwrap_or_default(),
            time: self.string("time").unwrap_or_default(),
            doctor,
        }
    }
}

fn string_of(value: &FirestoreValue) -> Option<String> {
    match value {
        FirestoreValue::StringValue(text) => Some(text.clone()),
        _ => None,
    }
}

impl From<&ProfileRecord> for DocumentWriteDto {
    fn from(record: &ProfileRecord) -> Self {
        let mut fields = BTreeMap::new();
        let mut put = |key: &str, value: Option<&String>| {
            if let Some(text) = value {
                fields.insert(key.to_owned(), FirestoreValue::StringValue(text.clone()));
            }
        };
        put("role", record.role.as_ref());
        put("email", record.email.as_ref());
        put("name", record.name.as_ref());
        put("specialization", record.specialization.as_ref());
        put("phone", record.phone.as_ref());
        put("qualification", record.qualification.as_ref());
        put("status", record.status.as_ref());
        fields.insert(
            "uid".to_owned(),
            FirestoreValue::StringValue(record.identity.to_string()),
        );
        if let Some(created_at) = record.created_at {
            fields.insert(
                "createdAt".to_owned(),
                FirestoreValue::StringValue(
                    created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
            );
        }
        Self { fields }
    }
}
