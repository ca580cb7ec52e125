//! Firebase REST adapters.
//!
//! `IdentityToolkitClient` implements `IdentityProvider` against the
//! Identity Toolkit API; `FirestoreClient` implements `ProfileRepository`
//! and `BookingRepository` against the Firestore REST API. Both speak plain
//! JSON over reqwest and carry no Firebase SDK.

mod dto;
mod firestore;
mod identity_toolkit;

use reqwest::Url;
use thiserror::Error;

use crate::domain::IdentityIdError;

pub use firestore::FirestoreClient;
pub use identity_toolkit::IdentityToolkitClient;

/// Default Identity Toolkit origin.
pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/";

/// Default Firestore origin.
pub const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com/";

/// Failure to build a Firebase adapter or decode one of its documents.
#[derive(Debug, Error)]
pub enum FirebaseError {
    /// The endpoint cannot have path segments appended, e.g. `mailto:` URLs.
    #[error("endpoint '{endpoint}' cannot carry a path")]
    OpaqueEndpoint { endpoint: Url },
    /// A relative API path did not join onto the endpoint.
    #[error("invalid endpoint path '{path}': {reason}")]
    EndpointPath { path: String, reason: String },
    /// The reqwest client could not be constructed.
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
    /// A document name ends in an unusable identity handle.
    #[error("document '{name}' has an unusable id: {source}")]
    DocumentId {
        name: String,
        #[source]
        source: IdentityIdError,
    },
}

fn join_endpoint(endpoint: &Url, path: &str) -> Result<Url, FirebaseError> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path).map_err(|err| FirebaseError::EndpointPath {
        path: path.to_owned(),
        reason: err.to_string(),
    })
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://identitytoolkit.googleapis.com")]
    #[case("https://identitytoolkit.googleapis.com/")]
    fn joins_relative_paths_onto_the_origin(#[case] endpoint: &str) {
        let endpoint = Url::parse(endpoint).expect("endpoint");
        let url = join_endpoint(&endpoint, "v1/accounts:signUp").expect("join");
        assert_eq!(
            url.as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp"
        );
    }

    #[test]
    fn keeps_emulator_prefixes() {
        let endpoint =
            Url::parse("http://127.0.0.1:9099/identitytoolkit.googleapis.com").expect("endpoint");
        let url = join_endpoint(&endpoint, "v1/accounts:signInWithPassword").expect("join");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1/accounts:signInWithPassword"
        );
    }

    #[test]
    fn rejects_endpoints_that_cannot_be_a_base() {
        let endpoint = Url::parse("mailto:ops@clinic.test").expect("endpoint");
        let err = join_endpoint(&endpoint, "v1/accounts:signUp").expect_err("opaque endpoint");
        assert!(
            matches!(&err, FirebaseError::EndpointPath { path, .. } if path == "v1/accounts:signUp"),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.len(), 163);
        assert!(preview.ends_with("..."));
    }
}
