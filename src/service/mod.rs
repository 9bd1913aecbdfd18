//! HTTP client for the external session service
//!
//! The service stores sessions and computes their stats; this client only
//! reads the session list and issues tag/visibility/delete mutations.

mod bulk;
mod message;
mod sequence;

pub use bulk::BulkOutcome;
pub use message::{ActiveRequest, BulkTagRequest, HealthReport, Status, StatusResponse, TagRequest};
pub use sequence::{FetchSequencer, FetchTicket};

use crate::config::ServiceConfig;
use crate::session::{SessionId, SessionSummary};
use futures::future::join_all;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid service URL '{0}'")]
    InvalidUrl(String),

    #[error("Service rejected request: {0}")]
    Rejected(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Client for the session service REST API
#[derive(Debug, Clone)]
pub struct SessionClient {
    http: Client,
    base_url: Url,
}

impl SessionClient {
    /// Build a client from the service configuration
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| ServiceError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ServiceError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Fetch every session summary.
    ///
    /// Records that cannot be decoded at all (e.g. missing `id`) are skipped.
    pub async fn fetch_sessions(&self) -> Result<Vec<SessionSummary>, ServiceError> {
        let url = self.endpoint(&["sessions"])?;
        tracing::debug!("Fetching sessions from {}", url);

        let body: Value = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match body {
            Value::Array(records) => {
                let total = records.len();
                let sessions: Vec<SessionSummary> = records
                    .into_iter()
                    .filter_map(|record| match serde_json::from_value(record) {
                        Ok(session) => Some(session),
                        Err(e) => {
                            tracing::warn!("Skipping undecodable session record: {}", e);
                            None
                        }
                    })
                    .collect();
                tracing::debug!("Fetched {} of {} sessions", sessions.len(), total);
                Ok(sessions)
            }
            other => match serde_json::from_value::<StatusResponse>(other) {
                Ok(status) if !status.is_success() => Err(ServiceError::Rejected(
                    status.message.unwrap_or_else(|| "unknown error".to_string()),
                )),
                _ => Err(ServiceError::UnexpectedResponse(
                    "expected an array of sessions".to_string(),
                )),
            },
        }
    }

    /// Attach a tag to one session
    pub async fn add_tag(&self, id: &SessionId, tag: &str) -> Result<(), ServiceError> {
        let tag = validate_tag(tag)?;
        let url = self.endpoint(&["sessions", &id.to_string(), "tags"])?;
        tracing::info!("Adding tag '{}' to session {}", tag, id);

        self.send_mutation(self.http.post(url).json(&TagRequest {
            tag: tag.to_string(),
        }))
        .await
    }

    /// Remove a tag from one session
    pub async fn remove_tag(&self, id: &SessionId, tag: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["sessions", &id.to_string(), "tags", tag])?;
        tracing::info!("Removing tag '{}' from session {}", tag, id);

        self.send_mutation(self.http.delete(url)).await
    }

    /// Attach a tag to several sessions in one request
    pub async fn bulk_add_tag(&self, ids: &[SessionId], tag: &str) -> Result<(), ServiceError> {
        let tag = validate_tag(tag)?;
        if ids.is_empty() {
            return Err(ServiceError::InvalidRequest("no sessions selected".to_string()));
        }

        let url = self.endpoint(&["sessions", "bulk", "tags"])?;
        tracing::info!("Adding tag '{}' to {} sessions", tag, ids.len());

        self.send_mutation(self.http.post(url).json(&BulkTagRequest {
            session_ids: ids.to_vec(),
            tag: tag.to_string(),
        }))
        .await
    }

    /// Set a session's visibility flag
    pub async fn set_active(&self, id: &SessionId, active: bool) -> Result<(), ServiceError> {
        let url = self.endpoint(&["sessions", &id.to_string(), "toggle-active"])?;
        tracing::info!("Setting session {} active={}", id, active);

        self.send_mutation(self.http.post(url).json(&ActiveRequest { active }))
            .await
    }

    pub async fn delete_session(&self, id: &SessionId) -> Result<(), ServiceError> {
        let url = self.endpoint(&["sessions", &id.to_string()])?;
        tracing::info!("Deleting session {}", id);

        self.send_mutation(self.http.delete(url)).await
    }

    /// Set visibility on several sessions, one concurrent request each
    pub async fn bulk_set_active(&self, ids: &[SessionId], active: bool) -> BulkOutcome {
        let requests = ids.iter().map(|id| async move {
            let result = self.set_active(id, active).await;
            (id.clone(), result)
        });
        let outcome = BulkOutcome::from_results(join_all(requests).await);
        log_bulk_outcome("visibility", &outcome);
        outcome
    }

    /// Delete several sessions, one concurrent request each
    pub async fn bulk_delete(&self, ids: &[SessionId]) -> BulkOutcome {
        let requests = ids.iter().map(|id| async move {
            let result = self.delete_session(id).await;
            (id.clone(), result)
        });
        let outcome = BulkOutcome::from_results(join_all(requests).await);
        log_bulk_outcome("delete", &outcome);
        outcome
    }

    pub async fn health(&self) -> Result<HealthReport, ServiceError> {
        let url = self.endpoint(&["healthcheck"])?;
        let report = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<HealthReport>()
            .await?;
        Ok(report)
    }

    async fn send_mutation(&self, request: RequestBuilder) -> Result<(), ServiceError> {
        let response: StatusResponse = request.send().await?.error_for_status()?.json().await?;

        if response.is_success() {
            Ok(())
        } else {
            Err(ServiceError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

fn validate_tag(tag: &str) -> Result<&str, ServiceError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(ServiceError::InvalidRequest("tag must not be empty".to_string()));
    }
    Ok(tag)
}

fn log_bulk_outcome(action: &str, outcome: &BulkOutcome) {
    if outcome.is_complete() {
        tracing::info!("Bulk {} succeeded for {} sessions", action, outcome.total());
    } else {
        for (id, e) in &outcome.failed {
            tracing::warn!("Bulk {} failed for session {}: {}", action, id, e);
        }
    }
}
