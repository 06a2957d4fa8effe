//! Data Transfer Objects - request/response types for the API.
//!
//! `author` crosses the wire as a single display string; the structured
//! name pair only exists inside the domain and storage layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One post as the API exposes it. Exactly these five fields, no more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub title: String,
    pub created: DateTime<Utc>,
}

/// Request to create a post. `created` may be supplied by the client
/// (fixtures backdate it) and defaults to now when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: String,
    pub content: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Partial update to a post. The `id` must match the path; any subset of
/// the remaining fields may be supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
