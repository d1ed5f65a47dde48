//! BookSlotHandler - an attendee takes an open slot.

use std::sync::Arc;

use crate::domain::availability::{AvailabilitySlot, SlotError};
use crate::domain::foundation::{AttendeeRef, CommandMetadata, ErrorCode, SlotId, Timestamp};
use crate::ports::SlotRepository;

/// Command to book a slot.
#[derive(Debug, Clone)]
pub struct BookSlotCommand {
    pub slot_id: SlotId,
    pub attendee: String,
}

/// Handler for slot booking.
///
/// Booking must survive two attendees racing for the same slot: the
/// repository performs one conditional check-and-set, so exactly one
/// caller wins and the other sees `AlreadyBooked` and picks a different
/// slot. There is no automatic retry.
pub struct BookSlotHandler {
    repository: Arc<dyn SlotRepository>,
}

impl BookSlotHandler {
    pub fn new(repository: Arc<dyn SlotRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: BookSlotCommand,
        metadata: CommandMetadata,
    ) -> Result<AvailabilitySlot, SlotError> {
        let attendee = AttendeeRef::new(cmd.attendee)
            .map_err(|e| SlotError::validation("attendee", e.to_string()))?;

        let booked = self
            .repository
            .book(&cmd.slot_id, &attendee, Timestamp::now())
            .await
            .map_err(|e| match e.code {
                ErrorCode::SlotNotFound => SlotError::NotFound(cmd.slot_id),
                ErrorCode::SlotAlreadyBooked => SlotError::AlreadyBooked(cmd.slot_id),
                _ => e.into(),
            })?;

        tracing::info!(
            slot_id = %cmd.slot_id,
            correlation_id = %metadata.correlation_id(),
            "slot booked"
        );

        Ok(booked)
    }
}
