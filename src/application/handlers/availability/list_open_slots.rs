//! ListOpenSlotsHandler - what can still be booked with a professional.

use std::sync::Arc;

use crate::domain::availability::{AvailabilitySlot, SlotError};
use crate::domain::foundation::ProfessionalRef;
use crate::ports::SlotRepository;

/// Query for a professional's open slots.
#[derive(Debug, Clone)]
pub struct ListOpenSlotsQuery {
    pub professional: String,
}

/// Handler for open-slot listings, ordered by (date, start_time).
pub struct ListOpenSlotsHandler {
    repository: Arc<dyn SlotRepository>,
}

impl ListOpenSlotsHandler {
    pub fn new(repository: Arc<dyn SlotRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListOpenSlotsQuery,
    ) -> Result<Vec<AvailabilitySlot>, SlotError> {
        let professional = ProfessionalRef::new(query.professional)
            .map_err(|e| SlotError::validation("professional", e.to_string()))?;

        Ok(self
            .repository
            .find_open_by_professional(&professional)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::MockSlotRepository;
    use crate::domain::foundation::{AttendeeRef, SlotId, Timestamp};
    use chrono::{NaiveDate, NaiveTime};

    fn professional() -> ProfessionalRef {
        ProfessionalRef::new("dr.lee@clinic.org").unwrap()
    }

    fn slot(day: u32, start_h: u32) -> AvailabilitySlot {
        AvailabilitySlot::new(
            SlotId::new(),
            professional(),
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            NaiveTime::from_hms_opt(start_h, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(start_h + 1, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_only_open_slots_in_order() {
        let mut booked = slot(2, 9);
        booked
            .mark_booked(
                AttendeeRef::new("sam@example.com").unwrap(),
                Timestamp::now(),
            )
            .unwrap();
        let late = slot(3, 9);
        let early = slot(2, 10);

        let repo = Arc::new(MockSlotRepository::with_slots(vec![
            booked,
            late.clone(),
            early.clone(),
        ]));
        let handler = ListOpenSlotsHandler::new(repo);

        let open = handler
            .handle(ListOpenSlotsQuery {
                professional: "dr.lee@clinic.org".to_string(),
            })
            .await
            .unwrap();

        let ids: Vec<_> = open.iter().map(|s| *s.id()).collect();
        assert_eq!(ids, vec![*early.id(), *late.id()]);
    }

    #[tokio::test]
    async fn rejects_malformed_professional_ref() {
        let handler = ListOpenSlotsHandler::new(Arc::new(MockSlotRepository::new()));
        let result = handler
            .handle(ListOpenSlotsQuery {
                professional: "".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SlotError::ValidationFailed { .. })));
    }
}
