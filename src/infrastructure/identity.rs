// src/infrastructure/identity.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::IdentityProvider;
use crate::domain::DomainError;

/// Client for the external identity provider's userinfo endpoint.
pub struct HttpIdentityProvider {
    http: Client,
    endpoint: String,
    token: String,
}

impl HttpIdentityProvider {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    username: String,
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    #[instrument(level = "debug", skip(self))]
    async fn current_user(&self) -> Result<Option<String>, DomainError> {
        let response = self
            .http
            .get(format!("{}/userinfo", self.endpoint))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DomainError::IdentityLookup(e.to_string()))?;

        // Unauthenticated is a value, not a failure.
        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("No signed-in user");
            return Ok(None);
        }
        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::IdentityLookup(format!(
                "Request failed with status {status}"
            )));
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| DomainError::IdentityLookup(e.to_string()))?;
        Ok(Some(info.username))
    }
}
