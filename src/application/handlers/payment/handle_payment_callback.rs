//! HandlePaymentCallbackHandler - the gateway reports a checkout outcome.
//!
//! The gateway calls back with the session id in the URL path. Success is
//! the only outcome that mutates anything (transition 4, idempotent);
//! fail and cancel leave the payment pending so the payer can try again.
//! The HTTP layer redirects the payer to their dashboard in every case.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::SessionError;

use crate::application::handlers::session::{
    MarkPaymentCompletedCommand, MarkPaymentCompletedHandler,
};

/// Outcome reported by the gateway in the callback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    Success,
    Fail,
    Cancel,
}

impl FromStr for CallbackOutcome {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(CallbackOutcome::Success),
            "fail" => Ok(CallbackOutcome::Fail),
            "cancel" => Ok(CallbackOutcome::Cancel),
            other => Err(SessionError::validation(
                "outcome",
                format!("Unknown callback outcome '{}'", other),
            )),
        }
    }
}

/// Command carrying one gateway callback.
#[derive(Debug, Clone)]
pub struct PaymentCallbackCommand {
    pub session_id: SessionId,
    pub outcome: CallbackOutcome,
}

/// Handler for gateway callbacks.
pub struct HandlePaymentCallbackHandler {
    mark_completed: Arc<MarkPaymentCompletedHandler>,
}

impl HandlePaymentCallbackHandler {
    pub fn new(mark_completed: Arc<MarkPaymentCompletedHandler>) -> Self {
        Self { mark_completed }
    }

    pub async fn handle(
        &self,
        cmd: PaymentCallbackCommand,
        metadata: CommandMetadata,
    ) -> Result<(), SessionError> {
        match cmd.outcome {
            CallbackOutcome::Success => {
                self.mark_completed
                    .handle(
                        MarkPaymentCompletedCommand {
                            session_id: cmd.session_id,
                        },
                        metadata,
                    )
                    .await
            }
            CallbackOutcome::Fail | CallbackOutcome::Cancel => {
                // Payment stays pending; the payer can re-initiate.
                tracing::info!(
                    session_id = %cmd.session_id,
                    outcome = ?cmd.outcome,
                    "checkout did not complete"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::MockSessionRepository;
    use crate::domain::foundation::{
        AttendeeRef, PaymentStatus, ProfessionalRef, SessionType, Timestamp,
    };
    use crate::domain::session::Session;

    fn handler_with(repo: Arc<MockSessionRepository>) -> HandlePaymentCallbackHandler {
        HandlePaymentCallbackHandler::new(Arc::new(MarkPaymentCompletedHandler::new(repo)))
    }

    fn online_session() -> Session {
        Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Online,
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn success_completes_the_payment() {
        let session = online_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));

        handler_with(repo.clone())
            .handle(
                PaymentCallbackCommand {
                    session_id: id,
                    outcome: CallbackOutcome::Success,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(
            repo.get(&id).unwrap().payment_status(),
            PaymentStatus::Completed
        );
    }

    #[tokio::test]
    async fn duplicate_success_callbacks_do_not_error() {
        let session = online_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let handler = handler_with(repo.clone());
        let cmd = PaymentCallbackCommand {
            session_id: id,
            outcome: CallbackOutcome::Success,
        };

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
    async fn fail_and_cancel_leave_payment_pending() {
        let session = online_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let handler = handler_with(repo.clone());

        for outcome in [CallbackOutcome::Fail, CallbackOutcome::Cancel] {
            handler
                .handle(
                    PaymentCallbackCommand {
                        session_id: id,
                        outcome,
                    },
                    CommandMetadata::test_fixture(),
                )
                .await
                .unwrap();
        }

        assert_eq!(
            repo.get(&id).unwrap().payment_status(),
            PaymentStatus::Pending
        );
    }

    #[tokio::test]
    async fn success_for_unknown_session_is_not_found() {
        let repo = Arc::new(MockSessionRepository::new());
        let id = SessionId::new();

        let result = handler_with(repo)
            .handle(
                PaymentCallbackCommand {
                    session_id: id,
                    outcome: CallbackOutcome::Success,
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), SessionError::NotFound(id));
    }

    #[test]
    fn outcome_parses_known_values_only() {
        assert_eq!(
            "success".parse::<CallbackOutcome>().unwrap(),
            CallbackOutcome::Success
        );
        assert_eq!(
            "fail".parse::<CallbackOutcome>().unwrap(),
            CallbackOutcome::Fail
        );
        assert_eq!(
            "cancel".parse::<CallbackOutcome>().unwrap(),
            CallbackOutcome::Cancel
        );
        assert!("refund".parse::<CallbackOutcome>().is_err());
    }
}
