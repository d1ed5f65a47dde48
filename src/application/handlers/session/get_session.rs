//! GetSessionHandler - fetch one session with its derived access flag.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

use super::views::SessionView;

/// Query for a single session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for single-session reads.
pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, SessionError> {
        let session = self
            .repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or(SessionError::NotFound(query.session_id))?;

        Ok(SessionView::project(session, &Timestamp::now()))
    }
}
