//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types. Enum-valued fields
//! arrive as strings and are parsed explicitly so a bad value becomes a
//! 400 with our error body instead of a framework rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::session::SessionView;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to open a new session with a professional.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSessionRequest {
    pub attendee: String,
    pub professional: String,
    #[serde(rename = "type")]
    pub session_type: String,
    /// Client-side submission time; optional placeholder for the session
    /// date until approval.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Professional's verdict on a pending session.
#[derive(Debug, Clone, Deserialize)]
pub struct DecideSessionRequest {
    pub status: String,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
}

/// Recommendation note.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachRecommendationRequest {
    pub text: String,
}

/// Query parameters for listing sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSessionsParams {
    #[serde(default)]
    pub attendee: Option<String>,
    #[serde(default)]
    pub professional: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for session command operations.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCommandResponse {
    pub session_id: String,
    pub message: String,
}

/// Detailed session view for API responses.
///
/// `join_access` is derived against the clock at response time, never read
/// from storage.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub attendee: String,
    pub professional: String,
    #[serde(rename = "type")]
    pub session_type: String,
    pub status: String,
    pub session_date: String,
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    pub join_access: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        let session = view.session;
        Self {
            id: session.id().to_string(),
            attendee: session.attendee().to_string(),
            professional: session.professional().to_string(),
            session_type: session.session_type().to_string(),
            status: session.status().to_string(),
            session_date: session.session_date().as_datetime().to_rfc3339(),
            payment_status: session.payment_status().to_string(),
            recommendation: session.recommendation().map(str::to_string),
            join_access: view.join_access,
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// List of sessions for a party's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionResponse>,
    pub total: usize,
}

impl From<Vec<SessionView>> for SessionListResponse {
    fn from(views: Vec<SessionView>) -> Self {
        let items: Vec<SessionResponse> = views.into_iter().map(Into::into).collect();
        let total = items.len();
        Self { items, total }
    }
}
