//! RequestSessionHandler - an attendee asks a professional for a session.

use std::sync::Arc;

use crate::domain::foundation::{
    AttendeeRef, CommandMetadata, ProfessionalRef, SessionId, SessionType, Timestamp,
};
use crate::domain::session::{Session, SessionError};
use crate::ports::{SessionNotifier, SessionRepository};

/// Command to request a new session.
#[derive(Debug, Clone)]
pub struct RequestSessionCommand {
    pub attendee: String,
    pub professional: String,
    pub session_type: SessionType,
    /// Client-reported submission time; a placeholder for `session_date`
    /// until approval. Defaults to server time.
    pub requested_at: Option<Timestamp>,
}

/// Handler for session requests.
pub struct RequestSessionHandler {
    repository: Arc<dyn SessionRepository>,
    notifier: Arc<dyn SessionNotifier>,
}

impl RequestSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        notifier: Arc<dyn SessionNotifier>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: RequestSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<Session, SessionError> {
        let attendee = AttendeeRef::new(cmd.attendee)
            .map_err(|e| SessionError::validation("attendee", e.to_string()))?;
        let professional = ProfessionalRef::new(cmd.professional)
            .map_err(|e| SessionError::validation("professional", e.to_string()))?;

        let session = Session::request(
            SessionId::new(),
            attendee,
            professional,
            cmd.session_type,
            cmd.requested_at.unwrap_or_else(Timestamp::now),
        );

        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            session_type = %session.session_type(),
            correlation_id = %metadata.correlation_id(),
            "session requested"
        );

        // Announcements are best-effort; the request stands either way.
        if let Err(e) = self.notifier.session_requested(&session).await {
            tracing::warn!(session_id = %session.id(), error = %e, "notify failed");
        }

        Ok(session)
    }
}
