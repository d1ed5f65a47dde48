//! HTTP handlers for availability endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::availability::{
    BookSlotCommand, BookSlotHandler, ListOpenSlotsHandler, ListOpenSlotsQuery,
    PublishSlotsCommand, PublishSlotsHandler, SlotDraft,
};
use crate::domain::availability::SlotError;
use crate::domain::foundation::{CommandMetadata, SlotId};

use super::dto::{
    BookSlotRequest, PublishSlotsRequest, PublishSlotsResponse, SlotListResponse, SlotResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AvailabilityHandlers {
    publish_handler: Arc<PublishSlotsHandler>,
    list_handler: Arc<ListOpenSlotsHandler>,
    book_handler: Arc<BookSlotHandler>,
}

impl AvailabilityHandlers {
    pub fn new(
        publish_handler: Arc<PublishSlotsHandler>,
        list_handler: Arc<ListOpenSlotsHandler>,
        book_handler: Arc<BookSlotHandler>,
    ) -> Self {
        Self {
            publish_handler,
            list_handler,
            book_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/availability - Publish a batch of slots
pub async fn publish_slots(
    State(handlers): State<AvailabilityHandlers>,
    Json(req): Json<PublishSlotsRequest>,
) -> Response {
    let metadata = CommandMetadata::new(req.professional.clone());
    let cmd = PublishSlotsCommand {
        professional: req.professional,
        slots: req
            .slots
            .into_iter()
            .map(|draft| SlotDraft {
                date: draft.date,
                start: draft.start,
                end: draft.end,
            })
            .collect(),
    };

    match handlers.publish_handler.handle(cmd, metadata).await {
        Ok(created) => {
            (StatusCode::CREATED, Json(PublishSlotsResponse { created })).into_response()
        }
        Err(e) => handle_slot_error(e),
    }
}

/// GET /api/availability/:professional - Open slots for a professional
pub async fn list_open_slots(
    State(handlers): State<AvailabilityHandlers>,
    Path(professional): Path<String>,
) -> Response {
    match handlers
        .list_handler
        .handle(ListOpenSlotsQuery { professional })
        .await
    {
        Ok(slots) => {
            let response: SlotListResponse = slots.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_slot_error(e),
    }
}

/// POST /api/availability/slots/:slot_id/book - Book an open slot
pub async fn book_slot(
    State(handlers): State<AvailabilityHandlers>,
    Path(slot_id): Path<String>,
    Json(req): Json<BookSlotRequest>,
) -> Response {
    let slot_id = match slot_id.parse::<SlotId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid slot ID")),
            )
                .into_response()
        }
    };

    let metadata = CommandMetadata::new(req.attendee.clone());
    let cmd = BookSlotCommand {
        slot_id,
        attendee: req.attendee,
    };

    match handlers.book_handler.handle(cmd, metadata).await {
        Ok(slot) => {
            let response: SlotResponse = slot.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_slot_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_slot_error(error: SlotError) -> Response {
    match error {
        SlotError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Slot", &id.to_string())),
        )
            .into_response(),
        SlotError::AlreadyBooked(id) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!(
                "Slot already booked: {}",
                id
            ))),
        )
            .into_response(),
        SlotError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        SlotError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
