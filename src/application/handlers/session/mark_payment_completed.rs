//! MarkPaymentCompletedHandler - the gateway confirmed a payment.
//!
//! Invoked from the success callback. The write is one-way and idempotent:
//! the gateway may deliver the same confirmation any number of times and
//! every call after the first is a no-op, not an error. Session status is
//! untouched - payment is orthogonal to the lifecycle.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

/// Command recording a confirmed payment.
#[derive(Debug, Clone)]
pub struct MarkPaymentCompletedCommand {
    pub session_id: SessionId,
}

/// Handler for payment confirmations.
pub struct MarkPaymentCompletedHandler {
    repository: Arc<dyn SessionRepository>,
}

impl MarkPaymentCompletedHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: MarkPaymentCompletedCommand,
        metadata: CommandMetadata,
    ) -> Result<(), SessionError> {
        self.repository
            .set_payment_completed(&cmd.session_id)
            .await
            .map_err(|e| match e.code {
                crate::domain::foundation::ErrorCode::SessionNotFound => {
                    SessionError::NotFound(cmd.session_id)
                }
                _ => e.into(),
            })?;

        tracing::info!(
            session_id = %cmd.session_id,
            correlation_id = %metadata.correlation_id(),
            "payment completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::MockSessionRepository;
    use crate::domain::foundation::{
        AttendeeRef, PaymentStatus, ProfessionalRef, SessionStatus, SessionType, Timestamp,
    };
    use crate::domain::session::Session;

    fn pending_session() -> Session {
        Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Online,
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn marks_payment_completed_without_touching_status() {
        let session = pending_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let handler = MarkPaymentCompletedHandler::new(repo.clone());

        handler
            .handle(
                MarkPaymentCompletedCommand { session_id: id },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        let stored = repo.get(&id).unwrap();
        assert_eq!(stored.payment_status(), PaymentStatus::Completed);
        assert_eq!(stored.status(), SessionStatus::Pending);
    }

    #[tokio::test]
    async fn repeat_confirmation_is_a_no_op_not_an_error() {
        let session = pending_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let handler = MarkPaymentCompletedHandler::new(repo.clone());
        let cmd = MarkPaymentCompletedCommand { session_id: id };

        handler
            .handle(cmd.clone(), CommandMetadata::test_fixture())
            .await
            .unwrap();
        handler
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(
            repo.get(&id).unwrap().payment_status(),
            PaymentStatus::Completed
        );
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = MarkPaymentCompletedHandler::new(repo);
        let id = SessionId::new();

        let result = handler
            .handle(
                MarkPaymentCompletedCommand { session_id: id },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), SessionError::NotFound(id));
    }
}
