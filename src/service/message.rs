//! Request and response bodies exchanged with the session service

use crate::session::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /sessions/{id}/tags`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest {
    pub tag: String,
}

/// Body of `POST /sessions/bulk/tags`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkTagRequest {
    pub session_ids: Vec<SessionId>,
    pub tag: String,
}

/// Body of `POST /sessions/{id}/toggle-active`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRequest {
    pub active: bool,
}

/// Outcome reported by the service for a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
    Ok,
}

/// Envelope the service answers mutations (and failed reads) with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Status,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<Value>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        matches!(self.status, Status::Success | Status::Ok)
    }
}

/// Body of `GET /healthcheck`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub environment: Option<String>,
}
