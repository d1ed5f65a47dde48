//! HTTP DTOs for availability endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::availability::AvailabilitySlot;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One proposed time window.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotDraftDto {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Request to publish a batch of slots.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishSlotsRequest {
    pub professional: String,
    pub slots: Vec<SlotDraftDto>,
}

/// Request to book a slot.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSlotRequest {
    pub attendee: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for bulk publishing: only the created count, per the
/// best-effort contract.
#[derive(Debug, Clone, Serialize)]
pub struct PublishSlotsResponse {
    pub created: u32,
}

/// One slot in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub professional: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub is_booked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_at: Option<String>,
}

impl From<AvailabilitySlot> for SlotResponse {
    fn from(slot: AvailabilitySlot) -> Self {
        Self {
            id: slot.id().to_string(),
            professional: slot.professional().to_string(),
            date: slot.slot_date(),
            start: slot.start_time(),
            end: slot.end_time(),
            is_booked: slot.is_booked(),
            booked_at: slot.booked_at().map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

/// Open slots for one professional.
#[derive(Debug, Clone, Serialize)]
pub struct SlotListResponse {
    pub items: Vec<SlotResponse>,
    pub total: usize,
}

impl From<Vec<AvailabilitySlot>> for SlotListResponse {
    fn from(slots: Vec<AvailabilitySlot>) -> Self {
        let items: Vec<SlotResponse> = slots.into_iter().map(Into::into).collect();
        let total = items.len();
        Self { items, total }
    }
}
