//! HTTP routes for availability endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{book_slot, list_open_slots, publish_slots, AvailabilityHandlers};

/// Creates the availability router with all endpoints.
pub fn availability_routes(handlers: AvailabilityHandlers) -> Router {
    Router::new()
        .route("/", post(publish_slots))
        .route("/:professional", get(list_open_slots))
        .route("/slots/:slot_id/book", post(book_slot))
        .with_state(handlers)
}
