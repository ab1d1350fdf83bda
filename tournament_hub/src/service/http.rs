//! HTTP implementation of the tournament service.

use super::{ServiceError, ServiceResult, TournamentService};
use crate::domain::Tournament;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Serialize)]
struct CreateTournamentRequest<'a> {
    name: &'a str,
}

/// API client for the tournaments endpoint
#[derive(Debug, Clone)]
pub struct HttpTournamentService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTournamentService {
    /// Create a new client for `base_url`, e.g. `http://localhost:4000/tournaments`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

/// Fail on non-success statuses, keeping the body for diagnostics
async fn check_status(response: reqwest::Response) -> ServiceResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Check the status and decode the JSON body
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ServiceResult<T> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl TournamentService for HttpTournamentService {
    async fn list(&self, query: Option<&str>) -> ServiceResult<Vec<Tournament>> {
        let mut request = self.client.get(&self.base_url);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            request = request.query(&[("q", q)]);
        }

        tracing::debug!(url = %self.base_url, query = ?query, "Listing tournaments");
        let tournaments: Vec<Tournament> = decode(request.send().await?).await?;
        tracing::debug!(count = tournaments.len(), "Tournaments listed");

        Ok(tournaments)
    }

    async fn create(&self, name: &str) -> ServiceResult<Tournament> {
        tracing::debug!(url = %self.base_url, name, "Creating tournament");
        let response = self
            .client
            .post(&self.base_url)
            .json(&CreateTournamentRequest { name })
            .send()
            .await?;

        decode(response).await
    }

    async fn update(&self, tournament: &Tournament) -> ServiceResult<Tournament> {
        let url = self.item_url(&tournament.id);
        tracing::debug!(url = %url, "Updating tournament");
        let response = self.client.put(&url).json(tournament).send().await?;

        decode(response).await
    }

    async fn delete(&self, id: &str) -> ServiceResult<()> {
        let url = self.item_url(id);
        tracing::debug!(url = %url, "Deleting tournament");
        let response = self.client.delete(&url).send().await?;

        // Body contract is undefined, only the status matters
        check_status(response).await?;
        Ok(())
    }
}
