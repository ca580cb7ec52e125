//! Reqwest-backed Firestore adapter for the `users` and `appointments`
//! collections.
//!
//! Writes use `PATCH` without an update mask, which replaces the whole
//! document the way `setDoc` does.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::debug;

use super::{FirebaseError, body_preview};
use super::dto::{DocumentDto, DocumentWriteDto, ListDocumentsDto};
use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{Booking, IdentityId, ProfileRecord};

const USERS_COLLECTION: &str = "users";
const APPOINTMENTS_COLLECTION: &str = "appointments";
const PAGE_SIZE: &str = "300";

/// Transport-level failure before it is mapped onto a port error.
#[derive(Debug)]
enum FetchError {
    Connection(String),
    Query(String),
}

impl From<FetchError> for ProfileRepositoryError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Connection(message) => Self::connection(message),
            FetchError::Query(message) => Self::query(message),
        }
    }
}

impl From<FetchError> for BookingRepositoryError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Connection(message) => Self::connection(message),
            FetchError::Query(message) => Self::query(message),
        }
    }
}

fn map_transport_error(err: &reqwest::Error) -> FetchError {
    if err.is_connect() || err.is_timeout() {
        FetchError::Connection(err.to_string())
    } else {
        FetchError::Query(err.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> FetchError {
    let message = format!("status {}: {}", status.as_u16(), body_preview(body));
    if status.is_server_error() {
        FetchError::Connection(message)
    } else {
        FetchError::Query(message)
    }
}

/// Firestore REST client scoped to one project's default database.
pub struct FirestoreClient {
    client: Client,
    documents: Url,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl FirestoreClient {
    /// Build an adapter for `project_id` using a reqwest client with an
    /// explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint cannot carry a document path or the
    /// reqwest client cannot be constructed.
    pub fn new(
        endpoint: &Url,
        project_id: &str,
        timeout: Duration,
    ) -> Result<Self, FirebaseError> {
        let mut documents = endpoint.clone();
        documents
            .path_segments_mut()
            .map_err(|()| FirebaseError::OpaqueEndpoint {
                endpoint: endpoint.clone(),
            })?
            .pop_if_empty()
            .extend(["v1", "projects", project_id, "databases", "(default)", "documents"]);
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            documents,
            api_key: None,
            access_token: None,
        })
    }

    /// Authenticate requests with a web API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Authenticate requests with an OAuth bearer token.
    #[must_use]
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }

    fn collection_url(&self, segments: &[&str]) -> Url {
        let mut url = self.documents.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match self.api_key.as_deref() {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        };
        match self.access_token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), FetchError> {
        let response = self
            .authorise(request)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_transport_error(&err))?;
        Ok((status, body.to_vec()))
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<DocumentDto>, FetchError> {
        let url = self.collection_url(&[collection, id]);
        let (status, body) = self.send(self.client.get(url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|err| FetchError::Query(format!("invalid document payload: {err}")))
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<DocumentDto>, FetchError> {
        let url = self.collection_url(&[collection]);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self.client.get(url.clone()).query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = page_token.as_deref() {
                request = request.query(&[("pageToken", token)]);
            }
            let (status, body) = self.send(request).await?;
            if !status.is_success() {
                return Err(map_status_error(status, &body));
            }
            let page: ListDocumentsDto = serde_json::from_slice(&body)
                .map_err(|err| FetchError::Query(format!("invalid list payload: {err}")))?;
            documents.extend(page.documents);
            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        debug!(collection, count = documents.len(), "collection listed");
        Ok(documents)
    }
}

#[async_trait]
impl ProfileRepository for FirestoreClient {
    async fn find(
        &self,
        identity: &IdentityId,
    ) -> Result<Option<ProfileRecord>, ProfileRepositoryError> {
        self.get_document(USERS_COLLECTION, identity.as_ref())
            .await?
            .map(DocumentDto::into_profile)
            .transpose()
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))
    }

    async fn list(&self) -> Result<Vec<ProfileRecord>, ProfileRepositoryError> {
        self.list_documents(USERS_COLLECTION)
            .await?
            .into_iter()
            .map(DocumentDto::into_profile)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))
    }

    async fn put(&self, record: &ProfileRecord) -> Result<(), ProfileRepositoryError> {
        let url = self.collection_url(&[USERS_COLLECTION, record.identity.as_ref()]);
        let request = self.client.patch(url).json(&DocumentWriteDto::from(record));
        let (status, body) = self.send(request).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(map_status_error(status, &body).into())
        }
    }
}

#[async_trait]
impl BookingRepository for FirestoreClient {
    async fn list(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(self
            .list_documents(APPOINTMENTS_COLLECTION)
            .await?
            .into_iter()
            .map(DocumentDto::into_booking)
            .collect())
    }
}
