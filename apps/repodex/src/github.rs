//! # GitHub Client
//!
//! Async client for the GitHub REST API, used as the [`MetadataSource`] for
//! live collection runs.
//!
//! Endpoints:
//! - `GET /repos/{owner}/{repo}` for collection runs
//! - `GET /repositories/{id}` for `repodex inspect`, returned as raw JSON
//!
//! Every failure (transport, non-2xx status, undecodable body) becomes
//! `RepodexError::Fetch` with the provider-supplied `message` when the
//! response carries one.

use crate::config::Credential;
use chrono::{DateTime, Utc};
use repodex_core::{MetadataSource, RepoId, RepoMetadata, RepodexError};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// User-Agent sent with every request; GitHub rejects anonymous agents.
const USER_AGENT: &str = concat!("repodex/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// RESPONSE PAYLOADS
// =============================================================================

/// Subset of the `GET /repos/{owner}/{repo}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoPayload {
    pub id: u64,
    pub name: String,
    pub owner: OwnerPayload,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
}

impl From<RepoPayload> for RepoMetadata {
    /// Repositories that were never pushed to report `pushed_at: null`;
    /// their `updated_at` stands in so they still count as live.
    fn from(payload: RepoPayload) -> Self {
        Self {
            id: Some(payload.id),
            name: payload.name,
            owner: payload.owner.login,
            html_url: payload.html_url,
            description: payload.description.unwrap_or_default(),
            pushed_at: payload.pushed_at.or(payload.updated_at),
            archived: payload.archived,
        }
    }
}

/// Build the error text for a failed response.
///
/// Uses the JSON `message` field when present, the raw body otherwise.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, body)
            }
        })
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client wrapping the GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Credential,
}

impl GitHubClient {
    /// Create a client for the given API base URL.
    pub fn new(
        base_url: impl Into<String>,
        token: Credential,
        timeout: std::time::Duration,
    ) -> Result<Self, RepodexError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| RepodexError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Build an authenticated GET request.
    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .get(&url)
            .bearer_auth(self.token.expose())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
    }

    /// Send a request, check the status code and decode the body.
    async fn send<T: DeserializeOwned>(&self, path: &str) -> Result<T, RepodexError> {
        let resp = self
            .request(path)
            .send()
            .await
            .map_err(|e| RepodexError::Fetch(format!("{}: {}", self.base_url, e)))?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, RepodexError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RepodexError::Fetch(error_message(status.as_u16(), &body)));
        }
        resp.json::<T>()
            .await
            .map_err(|e| RepodexError::Fetch(format!("Parse error: {}", e)))
    }

    /// GET /repos/{owner}/{repo}
    pub async fn repository(&self, repo: &RepoId) -> Result<RepoPayload, RepodexError> {
        self.send(&format!("/repos/{}", repo.slug())).await
    }

    /// GET /repositories/{id}, the full payload as returned by GitHub.
    pub async fn repository_by_id(&self, id: u64) -> Result<serde_json::Value, RepodexError> {
        self.send(&format!("/repositories/{}", id)).await
    }
}

impl MetadataSource for GitHubClient {
    async fn fetch(&self, repo: &RepoId) -> Result<RepoMetadata, RepodexError> {
        self.repository(repo).await.map(RepoMetadata::from)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish()
    }
}
