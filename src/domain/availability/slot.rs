//! Availability slot aggregate.
//!
//! A slot is a bookable time window published by a professional. Slots for
//! one professional are unique per (date, start_time); a slot is booked at
//! most once and never deleted.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AttendeeRef, DomainError, ErrorCode, ProfessionalRef, SlotId, Timestamp,
};

/// A publishable, bookable time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Unique identifier for this slot.
    id: SlotId,

    /// Professional the slot belongs to.
    professional: ProfessionalRef,

    /// Calendar day of the window.
    slot_date: NaiveDate,

    /// Window start; part of the natural key with professional + date.
    start_time: NaiveTime,

    /// Window end; must be after start.
    end_time: NaiveTime,

    /// Whether an attendee has taken the slot.
    is_booked: bool,

    /// Who booked it, once booked.
    booked_by: Option<AttendeeRef>,

    /// When it was booked.
    booked_at: Option<Timestamp>,

    /// When the slot was published.
    created_at: Timestamp,
}

impl AvailabilitySlot {
    /// Create a new open slot.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `start_time` is not before `end_time`
    pub fn new(
        id: SlotId,
        professional: ProfessionalRef,
        slot_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, DomainError> {
        if start_time >= end_time {
            return Err(DomainError::validation(
                "start_time",
                "Slot start must be before its end",
            ));
        }

        Ok(Self {
            id,
            professional,
            slot_date,
            start_time,
            end_time,
            is_booked: false,
            booked_by: None,
            booked_at: None,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a slot from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SlotId,
        professional: ProfessionalRef,
        slot_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        is_booked: bool,
        booked_by: Option<AttendeeRef>,
        booked_at: Option<Timestamp>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            professional,
            slot_date,
            start_time,
            end_time,
            is_booked,
            booked_by,
            booked_at,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SlotId {
        &self.id
    }

    pub fn professional(&self) -> &ProfessionalRef {
        &self.professional
    }

    pub fn slot_date(&self) -> NaiveDate {
        self.slot_date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn is_booked(&self) -> bool {
        self.is_booked
    }

    pub fn booked_by(&self) -> Option<&AttendeeRef> {
        self.booked_by.as_ref()
    }

    pub fn booked_at(&self) -> Option<&Timestamp> {
        self.booked_at.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Book the slot for an attendee.
    ///
    /// The open -> booked transition happens exactly once. Persistence must
    /// enforce the same rule with a conditional write; this method is the
    /// in-memory mirror of that check.
    ///
    /// # Errors
    ///
    /// - `SlotAlreadyBooked` if the slot is already taken
    pub fn mark_booked(
        &mut self,
        attendee: AttendeeRef,
        at: Timestamp,
    ) -> Result<(), DomainError> {
        if self.is_booked {
            return Err(DomainError::new(
                ErrorCode::SlotAlreadyBooked,
                format!("Slot already booked: {}", self.id),
            ));
        }

        self.is_booked = true;
        self.booked_by = Some(attendee);
        self.booked_at = Some(at);
        Ok(())
    }
}
