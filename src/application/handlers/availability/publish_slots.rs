//! PublishSlotsHandler - a professional posts bookable time windows.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::availability::{AvailabilitySlot, SlotError};
use crate::domain::foundation::{CommandMetadata, ProfessionalRef, SlotId};
use crate::ports::SlotRepository;

/// One proposed time window.
#[derive(Debug, Clone)]
pub struct SlotDraft {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Command to publish a batch of slots.
#[derive(Debug, Clone)]
pub struct PublishSlotsCommand {
    pub professional: String,
    pub slots: Vec<SlotDraft>,
}

/// Handler for bulk slot publishing.
///
/// Publishing is best-effort: drafts colliding with an already-published
/// (date, start_time) are dropped silently and the caller learns only the
/// created count. Malformed drafts are different - an inverted window
/// fails the whole batch before anything is written.
pub struct PublishSlotsHandler {
    repository: Arc<dyn SlotRepository>,
}

impl PublishSlotsHandler {
    pub fn new(repository: Arc<dyn SlotRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: PublishSlotsCommand,
        metadata: CommandMetadata,
    ) -> Result<u32, SlotError> {
        let professional = ProfessionalRef::new(cmd.professional)
            .map_err(|e| SlotError::validation("professional", e.to_string()))?;

        let mut slots = Vec::with_capacity(cmd.slots.len());
        for draft in cmd.slots {
            let slot = AvailabilitySlot::new(
                SlotId::new(),
                professional.clone(),
                draft.date,
                draft.start,
                draft.end,
            )?;
            slots.push(slot);
        }

        let created = self.repository.insert_many(&slots).await?;

        tracing::info!(
            professional = %professional,
            submitted = slots.len(),
            created,
            correlation_id = %metadata.correlation_id(),
            "slots published"
        );

        Ok(created)
    }
}
