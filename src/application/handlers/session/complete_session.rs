//! CompleteSessionHandler - a professional marks an approved session held.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::{SessionNotifier, SessionRepository};

/// Command to complete a session.
#[derive(Debug, Clone)]
pub struct CompleteSessionCommand {
    pub session_id: SessionId,
}

/// Handler for completing sessions.
///
/// Completion has no payment precondition; an online session can end up
/// completed while its payment is still pending. That is long-standing
/// platform behavior and is preserved here.
pub struct CompleteSessionHandler {
    repository: Arc<dyn SessionRepository>,
    notifier: Arc<dyn SessionNotifier>,
}

impl CompleteSessionHandler {
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
        cmd: CompleteSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<Session, SessionError> {
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        let prior_status = session.status();
        session.complete()?;

        self.repository
            .update_guarded(&session, prior_status)
            .await?;

        tracing::info!(
            session_id = %session.id(),
            correlation_id = %metadata.correlation_id(),
            "session completed"
        );

        if let Err(e) = self.notifier.session_completed(&session).await {
            tracing::warn!(session_id = %session.id(), error = %e, "notify failed");
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{MockNotifier, MockSessionRepository};
    use crate::domain::foundation::{
        AttendeeRef, PaymentStatus, ProfessionalRef, SessionStatus, SessionType, Timestamp,
    };

    fn approved_session() -> Session {
        let mut session = Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Online,
            Timestamp::now(),
        );
        session.approve(Timestamp::now()).unwrap();
        session
    }

    #[tokio::test]
    async fn completes_an_approved_session() {
        let session = approved_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let notifier = Arc::new(MockNotifier::new());

        let handler = CompleteSessionHandler::new(repo.clone(), notifier.clone());
        handler
            .handle(
                CompleteSessionCommand { session_id: id },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(repo.get(&id).unwrap().status(), SessionStatus::Completed);
        assert_eq!(notifier.recorded(), vec![format!("completed:{}", id)]);
    }

    #[tokio::test]
    async fn completes_even_when_payment_is_pending() {
        let session = approved_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));

        let handler = CompleteSessionHandler::new(repo.clone(), Arc::new(MockNotifier::new()));
        let completed = handler
            .handle(
                CompleteSessionCommand { session_id: id },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(completed.payment_status(), PaymentStatus::Pending);
        assert_eq!(completed.status(), SessionStatus::Completed);
    }

    #[tokio::test]
    async fn pending_session_cannot_be_completed() {
        let session = Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Offline,
            Timestamp::now(),
        );
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));

        let handler = CompleteSessionHandler::new(repo.clone(), Arc::new(MockNotifier::new()));
        let result = handler
            .handle(
                CompleteSessionCommand { session_id: id },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
        assert_eq!(repo.get(&id).unwrap().status(), SessionStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CompleteSessionHandler::new(repo, Arc::new(MockNotifier::new()));
        let id = SessionId::new();

        let result = handler
            .handle(
                CompleteSessionCommand { session_id: id },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), SessionError::NotFound(id));
    }
}
