//! Availability slot repository port.
//!
//! # Design
//!
//! - **Best-effort publishing**: [`SlotRepository::insert_many`] skips
//!   natural-key duplicates silently and reports only the created count.
//!   This is the one place the system swallows errors, and it is the
//!   documented contract of bulk publishing.
//! - **Atomic booking**: [`SlotRepository::book`] must be a single
//!   conditional check-and-set on the booked flag. Of two racing callers
//!   exactly one wins; the loser observes `SlotAlreadyBooked`.

use crate::domain::availability::AvailabilitySlot;
use crate::domain::foundation::{AttendeeRef, DomainError, ProfessionalRef, SlotId, Timestamp};
use async_trait::async_trait;

/// Repository port for AvailabilitySlot persistence.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Insert a batch of slots, skipping any that collide with an existing
    /// (professional, date, start_time) key. Returns the number created.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert_many(&self, slots: &[AvailabilitySlot]) -> Result<u32, DomainError>;

    /// Find a slot by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SlotId) -> Result<Option<AvailabilitySlot>, DomainError>;

    /// All open slots for a professional, ordered by (date, start_time)
    /// ascending.
    async fn find_open_by_professional(
        &self,
        professional: &ProfessionalRef,
    ) -> Result<Vec<AvailabilitySlot>, DomainError>;

    /// Atomically book an open slot for an attendee and return the booked
    /// slot.
    ///
    /// # Errors
    ///
    /// - `SlotNotFound` if the slot doesn't exist
    /// - `SlotAlreadyBooked` if the booked flag was already set at write time
    /// - `DatabaseError` on persistence failure
    async fn book(
        &self,
        id: &SlotId,
        attendee: &AttendeeRef,
        at: Timestamp,
    ) -> Result<AvailabilitySlot, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn slot_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SlotRepository) {}
    }
}
