//! AttachRecommendationHandler - a professional leaves a note on a session.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Command to attach (or replace) a recommendation note.
#[derive(Debug, Clone)]
pub struct AttachRecommendationCommand {
    pub session_id: SessionId,
    pub text: String,
}

/// Handler for recommendation notes.
///
/// The note is a scalar: attaching a second note replaces the first.
pub struct AttachRecommendationHandler {
    repository: Arc<dyn SessionRepository>,
}

impl AttachRecommendationHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: AttachRecommendationCommand,
        metadata: CommandMetadata,
    ) -> Result<Session, SessionError> {
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        let prior_status = session.status();
        let replaced = session.attach_recommendation(cmd.text)?;

        self.repository
            .update_guarded(&session, prior_status)
            .await?;

        tracing::info!(
            session_id = %session.id(),
            replaced = replaced.is_some(),
            correlation_id = %metadata.correlation_id(),
            "recommendation attached"
        );

        Ok(session)
    }
}
