// src/infrastructure/blobs.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::application::BlobStore;
use crate::domain::DomainError;

/// Client for the key-addressed blob store.
///
/// Objects live under `/o/{key}`; `/o/{key}/url` mints a short-lived
/// download URL. Keys are percent-encoded since they embed user names
/// and original file names.
pub struct HttpBlobStore {
    http: Client,
    endpoint: String,
    token: String,
}

impl HttpBlobStore {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/o/{}", self.endpoint, urlencoding::encode(key))
    }
}

#[derive(Debug, Deserialize)]
struct PresignedUrl {
    url: String,
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    #[instrument(level = "debug", skip(self, bytes), fields(len = bytes.len()))]
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), DomainError> {
        let response = self
            .http
            .put(self.object_url(key))
            .bearer_auth(&self.token)
            .body(bytes)
            .send()
            .await
            .map_err(|e| DomainError::BlobStore(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::BlobStore(format!(
                "Upload failed with status {status}"
            )));
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_url(&self, key: &str) -> Result<String, DomainError> {
        let response = self
            .http
            .get(format!("{}/url", self.object_url(key)))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DomainError::BlobStore(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::BlobStore(format!(
                "URL resolution failed with status {status}"
            )));
        }
        let presigned: PresignedUrl = response
            .json()
            .await
            .map_err(|e| DomainError::BlobStore(e.to_string()))?;
        Ok(presigned.url)
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let response = self
            .http
            .delete(self.object_url(key))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DomainError::BlobStore(e.to_string()))?;
        let status = response.status();
        // An already-absent object counts as removed.
        if status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !status.is_success() {
            return Err(DomainError::BlobStore(format!(
                "Removal failed with status {status}"
            )));
        }
        Ok(())
    }
}
