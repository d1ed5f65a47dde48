//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    attach_recommendation, complete_session, decide_session, get_session, list_sessions,
    request_session, SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/request", post(request_session))
        .route("/", get(list_sessions))
        .route("/:id", get(get_session))
        .route("/:id/approve", post(decide_session))
        .route("/:id/complete", post(complete_session))
        .route("/:id/recommendations", post(attach_recommendation))
        .with_state(handlers)
}
