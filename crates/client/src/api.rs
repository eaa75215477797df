//! REST client for the Scribe HTTP API.
//!
//! Covers the endpoints the generation flow needs: eligibility, reading,
//! clearing and starting generated content. Every request carries the
//! configured Bearer token.

use scribe_core::eligibility::EligibilityReport;
use scribe_core::types::DbId;
use scribe_db::models::generated_content::GeneratedContent;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::poller::ContentSource;

/// HTTP client for one Scribe API deployment.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ScribeClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
    pub(crate) poll_interval: std::time::Duration,
}

impl ScribeClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            token: config.api_token.clone(),
            poll_interval: config.poll_interval,
        }
    }

    fn project_url(&self, project_id: DbId, resource: &str) -> String {
        format!("{}/api/v1/projects/{project_id}/{resource}", self.api_url)
    }

    /// `GET /projects/{id}/generation-eligibility`
    pub async fn eligibility(&self, project_id: DbId) -> Result<EligibilityReport, ClientError> {
        let response = self
            .client
            .get(self.project_url(project_id, "generation-eligibility"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /projects/{id}/generated-content`
    pub async fn fetch_generated(
        &self,
        project_id: DbId,
    ) -> Result<Vec<GeneratedContent>, ClientError> {
        let response = self
            .client
            .get(self.project_url(project_id, "generated-content"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `DELETE /projects/{id}/generated-content`
    pub async fn delete_generated(&self, project_id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.project_url(project_id, "generated-content"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `POST /projects/{id}/generated-content`
    ///
    /// Resolves only when the whole run has finished on the server.
    pub async fn start_generation(
        &self,
        project_id: DbId,
    ) -> Result<Vec<GeneratedContent>, ClientError> {
        let response = self
            .client
            .post(self.project_url(project_id, "generated-content"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or [`ClientError::Api`]
    /// with the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ScribeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScribeClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl ContentSource for ScribeClient {
    async fn fetch_generated(&self, project_id: DbId) -> Result<Vec<GeneratedContent>, ClientError> {
        ScribeClient::fetch_generated(self, project_id).await
    }
}
