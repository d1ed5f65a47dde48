//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::session::{
    AttachRecommendationCommand, AttachRecommendationHandler, CompleteSessionCommand,
    CompleteSessionHandler, DecideSessionCommand, DecideSessionHandler, Decision,
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, ListSessionsQuery, PartyFilter,
    RequestSessionCommand, RequestSessionHandler,
};
use crate::domain::foundation::{
    AttendeeRef, CommandMetadata, ProfessionalRef, SessionId, SessionType, Timestamp,
};
use crate::domain::session::SessionError;

use super::dto::{
    AttachRecommendationRequest, DecideSessionRequest, ListSessionsParams,
    RequestSessionRequest, SessionCommandResponse, SessionListResponse, SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    request_handler: Arc<RequestSessionHandler>,
    decide_handler: Arc<DecideSessionHandler>,
    complete_handler: Arc<CompleteSessionHandler>,
    recommend_handler: Arc<AttachRecommendationHandler>,
    get_handler: Arc<GetSessionHandler>,
    list_handler: Arc<ListSessionsHandler>,
}

impl SessionHandlers {
    pub fn new(
        request_handler: Arc<RequestSessionHandler>,
        decide_handler: Arc<DecideSessionHandler>,
        complete_handler: Arc<CompleteSessionHandler>,
        recommend_handler: Arc<AttachRecommendationHandler>,
        get_handler: Arc<GetSessionHandler>,
        list_handler: Arc<ListSessionsHandler>,
    ) -> Self {
        Self {
            request_handler,
            decide_handler,
            complete_handler,
            recommend_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions/request - Request a new session
pub async fn request_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<RequestSessionRequest>,
) -> Response {
    let session_type = match req.session_type.as_str() {
        "online" => SessionType::Online,
        "offline" => SessionType::Offline,
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "Unknown session type '{}', expected online or offline",
                    other
                ))),
            )
                .into_response()
        }
    };

    let metadata = CommandMetadata::new(req.attendee.clone());
    let cmd = RequestSessionCommand {
        attendee: req.attendee,
        professional: req.professional,
        session_type,
        requested_at: req.date.map(Timestamp::from_datetime),
    };

    match handlers.request_handler.handle(cmd, metadata).await {
        Ok(session) => {
            let response = SessionCommandResponse {
                session_id: session.id().to_string(),
                message: "Session requested".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id - Get one session with its derived access flag
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetSessionQuery { session_id })
        .await
    {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions - List a party's sessions, newest first
pub async fn list_sessions(
    State(handlers): State<SessionHandlers>,
    Query(params): Query<ListSessionsParams>,
) -> Response {
    let party = match (params.attendee, params.professional) {
        (Some(attendee), None) => match AttendeeRef::new(attendee) {
            Ok(a) => PartyFilter::Attendee(a),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(e.to_string())),
                )
                    .into_response()
            }
        },
        (None, Some(professional)) => match ProfessionalRef::new(professional) {
            Ok(p) => PartyFilter::Professional(p),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(e.to_string())),
                )
                    .into_response()
            }
        },
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(
                    "Provide exactly one of 'attendee' or 'professional'",
                )),
            )
                .into_response()
        }
    };

    match handlers
        .list_handler
        .handle(ListSessionsQuery { party })
        .await
    {
        Ok(views) => {
            let response: SessionListResponse = views.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/approve - Approve or decline a pending session
pub async fn decide_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<DecideSessionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    // Bad enum values are rejected here, before any state is touched.
    let decision: Decision = match req.status.parse() {
        Ok(d) => d,
        Err(e) => return handle_session_error(e),
    };

    let cmd = DecideSessionCommand {
        session_id,
        decision,
        scheduled_date: req.scheduled_date.map(Timestamp::from_datetime),
    };

    match handlers
        .decide_handler
        .handle(cmd, CommandMetadata::new("professional"))
        .await
    {
        Ok(session) => {
            let response = SessionCommandResponse {
                session_id: session_id.to_string(),
                message: format!("Session {}", session.status()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/complete - Mark an approved session held
pub async fn complete_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .complete_handler
        .handle(
            CompleteSessionCommand { session_id },
            CommandMetadata::new("professional"),
        )
        .await
    {
        Ok(_) => {
            let response = SessionCommandResponse {
                session_id: session_id.to_string(),
                message: "Session completed".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/recommendations - Attach or replace the note
pub async fn attach_recommendation(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<AttachRecommendationRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .recommend_handler
        .handle(
            AttachRecommendationCommand {
                session_id,
                text: req.text,
            },
            CommandMetadata::new("professional"),
        )
        .await
    {
        Ok(_) => {
            let response = SessionCommandResponse {
                session_id: session_id.to_string(),
                message: "Recommendation attached".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

pub fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        SessionError::InvalidState(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        )
            .into_response(),
        SessionError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        SessionError::PaymentGateway(msg) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::bad_gateway(msg)),
        )
            .into_response(),
        SessionError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
