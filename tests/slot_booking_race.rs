//! Integration test for the slot booking race.
//!
//! Two (or more) attendees going for the same open slot must resolve to
//! exactly one winner; everyone else observes `AlreadyBooked` and nobody
//! overwrites the winner's booking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use futures::future::join_all;

use mindharbor::application::handlers::availability::{BookSlotCommand, BookSlotHandler};
use mindharbor::domain::availability::{AvailabilitySlot, SlotError};
use mindharbor::domain::foundation::{
    AttendeeRef, CommandMetadata, DomainError, ErrorCode, ProfessionalRef, SlotId, Timestamp,
};
use mindharbor::ports::SlotRepository;

/// In-memory slot repository whose `book` is a single check-and-set under
/// one lock - the same atomicity contract as the conditional UPDATE in the
/// production adapter.
struct InMemorySlotRepository {
    slots: Mutex<HashMap<SlotId, AvailabilitySlot>>,
}

impl InMemorySlotRepository {
    fn with_slot(slot: AvailabilitySlot) -> Self {
        let repo = Self {
            slots: Mutex::new(HashMap::new()),
        };
        repo.slots.lock().unwrap().insert(*slot.id(), slot);
        repo
    }

    fn get(&self, id: &SlotId) -> Option<AvailabilitySlot> {
        self.slots.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn insert_many(&self, slots: &[AvailabilitySlot]) -> Result<u32, DomainError> {
        let mut stored = self.slots.lock().unwrap();
        let mut created = 0;
        for slot in slots {
            let duplicate = stored.values().any(|existing| {
                existing.professional() == slot.professional()
                    && existing.slot_date() == slot.slot_date()
                    && existing.start_time() == slot.start_time()
            });
            if !duplicate {
                stored.insert(*slot.id(), slot.clone());
                created += 1;
            }
        }
        Ok(created)
    }

    async fn find_by_id(&self, id: &SlotId) -> Result<Option<AvailabilitySlot>, DomainError> {
        Ok(self.slots.lock().unwrap().get(id).cloned())
    }

    async fn find_open_by_professional(
        &self,
        professional: &ProfessionalRef,
    ) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let mut open: Vec<AvailabilitySlot> = self
            .slots
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.professional() == professional && !s.is_booked())
            .cloned()
            .collect();
        open.sort_by_key(|s| (s.slot_date(), s.start_time()));
        Ok(open)
    }

    async fn book(
        &self,
        id: &SlotId,
        attendee: &AttendeeRef,
        at: Timestamp,
    ) -> Result<AvailabilitySlot, DomainError> {
        // Check-and-set happens entirely under the lock.
        let mut stored = self.slots.lock().unwrap();
        let slot = stored.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SlotNotFound, format!("Slot not found: {}", id))
        })?;
        slot.mark_booked(attendee.clone(), at)?;
        Ok(slot.clone())
    }
}

fn open_slot() -> AvailabilitySlot {
    AvailabilitySlot::new(
        SlotId::new(),
        ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn exactly_one_of_two_racing_bookings_wins() {
    let slot = open_slot();
    let slot_id = *slot.id();
    let repo = Arc::new(InMemorySlotRepository::with_slot(slot));
    let handler = Arc::new(BookSlotHandler::new(repo.clone()));

    let attempts = ["sam@example.com", "kim@example.com"].map(|attendee| {
        let handler = handler.clone();
        let attendee = attendee.to_string();
        tokio::spawn(async move {
            handler
                .handle(
                    BookSlotCommand {
                        slot_id,
                        attendee,
                    },
                    CommandMetadata::new("race-test"),
                )
                .await
        })
    });

    let outcomes: Vec<Result<AvailabilitySlot, SlotError>> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    let losers: Vec<_> = outcomes.iter().filter_map(|r| r.as_ref().err()).collect();

    assert_eq!(winners, 1, "exactly one booking must succeed");
    assert_eq!(losers.len(), 1);
    assert_eq!(losers[0], &SlotError::AlreadyBooked(slot_id));

    // The slot ended booked exactly once, by the winner.
    let stored = repo.get(&slot_id).unwrap();
    assert!(stored.is_booked());
    let winner_slot = outcomes.iter().find_map(|r| r.as_ref().ok()).unwrap();
    assert_eq!(stored.booked_by(), winner_slot.booked_by());
}

#[tokio::test]
async fn many_racing_bookings_still_yield_a_single_winner() {
    let slot = open_slot();
    let slot_id = *slot.id();
    let repo = Arc::new(InMemorySlotRepository::with_slot(slot));
    let handler = Arc::new(BookSlotHandler::new(repo.clone()));

    let attempts: Vec<_> = (0..16)
        .map(|i| {
            let handler = handler.clone();
            tokio::spawn(async move {
                handler
                    .handle(
                        BookSlotCommand {
                            slot_id,
                            attendee: format!("attendee{}@example.com", i),
                        },
                        CommandMetadata::new("race-test"),
                    )
                    .await
            })
        })
        .collect();

    let outcomes: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == SlotError::AlreadyBooked(slot_id)));
    assert!(repo.get(&slot_id).unwrap().is_booked());
}

#[tokio::test]
async fn loser_can_retry_against_a_different_slot() {
    let first = open_slot();
    let second = AvailabilitySlot::new(
        SlotId::new(),
        ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
    )
    .unwrap();
    let first_id = *first.id();
    let second_id = *second.id();

    let repo = Arc::new(InMemorySlotRepository::with_slot(first));
    repo.insert_many(std::slice::from_ref(&second)).await.unwrap();
    let handler = BookSlotHandler::new(repo.clone());

    // Sam takes the first slot; Kim loses the race.
    handler
        .handle(
            BookSlotCommand {
                slot_id: first_id,
                attendee: "sam@example.com".to_string(),
            },
            CommandMetadata::new("race-test"),
        )
        .await
        .unwrap();
    let lost = handler
        .handle(
            BookSlotCommand {
                slot_id: first_id,
                attendee: "kim@example.com".to_string(),
            },
            CommandMetadata::new("race-test"),
        )
        .await;
    assert!(matches!(lost, Err(SlotError::AlreadyBooked(_))));

    // Recovery is caller-driven: Kim books the next slot instead.
    let booked = handler
        .handle(
            BookSlotCommand {
                slot_id: second_id,
                attendee: "kim@example.com".to_string(),
            },
            CommandMetadata::new("race-test"),
        )
        .await
        .unwrap();
    assert_eq!(
        booked.booked_by(),
        Some(&AttendeeRef::new("kim@example.com").unwrap())
    );
}
