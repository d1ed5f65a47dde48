//! ListSessionsHandler - dashboard listings for either party.

use std::sync::Arc;

use crate::domain::foundation::{AttendeeRef, ProfessionalRef, Timestamp};
use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

use super::views::SessionView;

/// Which party's sessions to list.
#[derive(Debug, Clone)]
pub enum PartyFilter {
    Attendee(AttendeeRef),
    Professional(ProfessionalRef),
}

/// Query for a party's sessions, newest `session_date` first.
#[derive(Debug, Clone)]
pub struct ListSessionsQuery {
    pub party: PartyFilter,
}

/// Handler for session list views.
pub struct ListSessionsHandler {
    repository: Arc<dyn SessionRepository>,
}

impl ListSessionsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListSessionsQuery,
    ) -> Result<Vec<SessionView>, SessionError> {
        let sessions = match &query.party {
            PartyFilter::Attendee(attendee) => {
                self.repository.find_by_attendee(attendee).await?
            }
            PartyFilter::Professional(professional) => {
                self.repository.find_by_professional(professional).await?
            }
        };

        let now = Timestamp::now();
        Ok(sessions
            .into_iter()
            .map(|s| SessionView::project(s, &now))
            .collect())
    }
}
