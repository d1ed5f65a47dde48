//! DecideSessionHandler - a professional approves or declines a request.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::{Session, SessionError};
use crate::ports::{SessionNotifier, SessionRepository};

/// The professional's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Declined,
}

impl FromStr for Decision {
    type Err = SessionError;

    /// Parses the wire value. Anything but the two known verdicts is a
    /// validation failure - checked before any state is touched.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Decision::Approved),
            "declined" => Ok(Decision::Declined),
            other => Err(SessionError::validation(
                "status",
                format!("Unknown decision '{}', expected approved or declined", other),
            )),
        }
    }
}

/// Command carrying the professional's decision.
#[derive(Debug, Clone)]
pub struct DecideSessionCommand {
    pub session_id: SessionId,
    pub decision: Decision,
    /// The real schedule; required when approving.
    pub scheduled_date: Option<Timestamp>,
}

/// Handler for approve/decline decisions.
pub struct DecideSessionHandler {
    repository: Arc<dyn SessionRepository>,
    notifier: Arc<dyn SessionNotifier>,
}

impl DecideSessionHandler {
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
        cmd: DecideSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<Session, SessionError> {
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        let prior_status = session.status();

        match cmd.decision {
            Decision::Approved => {
                // Approval must carry an explicit schedule; the request-time
                // placeholder is never silently promoted.
                let scheduled = cmd.scheduled_date.ok_or_else(|| {
                    SessionError::validation(
                        "scheduled_date",
                        "A scheduled date is required when approving",
                    )
                })?;
                session.approve(scheduled)?;
            }
            Decision::Declined => session.decline()?,
        }

        self.repository
            .update_guarded(&session, prior_status)
            .await?;

        tracing::info!(
            session_id = %session.id(),
            status = %session.status(),
            correlation_id = %metadata.correlation_id(),
            "session decided"
        );

        let notified = match cmd.decision {
            Decision::Approved => self.notifier.session_approved(&session).await,
            Decision::Declined => self.notifier.session_declined(&session).await,
        };
        if let Err(e) = notified {
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
        AttendeeRef, ProfessionalRef, SessionStatus, SessionType,
    };

    fn pending_session() -> Session {
        Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Online,
            Timestamp::now(),
        )
    }

    fn handler(
        repo: Arc<MockSessionRepository>,
        notifier: Arc<MockNotifier>,
    ) -> DecideSessionHandler {
        DecideSessionHandler::new(repo, notifier)
    }

    #[tokio::test]
    async fn approve_sets_status_and_schedule() {
        let session = pending_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let notifier = Arc::new(MockNotifier::new());
        let scheduled = Timestamp::now().plus_days(2);

        let updated = handler(repo.clone(), notifier)
            .handle(
                DecideSessionCommand {
                    session_id: id,
                    decision: Decision::Approved,
                    scheduled_date: Some(scheduled),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(updated.status(), SessionStatus::Approved);
        assert_eq!(updated.session_date(), &scheduled);
        assert_eq!(repo.get(&id).unwrap().status(), SessionStatus::Approved);
    }

    #[tokio::test]
    async fn approve_without_schedule_fails_and_changes_nothing() {
        let session = pending_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let notifier = Arc::new(MockNotifier::new());

        let result = handler(repo.clone(), notifier.clone())
            .handle(
                DecideSessionCommand {
                    session_id: id,
                    decision: Decision::Approved,
                    scheduled_date: None,
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(
            result,
            Err(SessionError::ValidationFailed { .. })
        ));
        assert_eq!(repo.get(&id).unwrap().status(), SessionStatus::Pending);
        assert!(notifier.recorded().is_empty());
    }

    #[tokio::test]
    async fn decline_is_persisted_and_notified() {
        let session = pending_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let notifier = Arc::new(MockNotifier::new());

        handler(repo.clone(), notifier.clone())
            .handle(
                DecideSessionCommand {
                    session_id: id,
                    decision: Decision::Declined,
                    scheduled_date: None,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(repo.get(&id).unwrap().status(), SessionStatus::Declined);
        assert_eq!(notifier.recorded(), vec![format!("declined:{}", id)]);
    }

    #[tokio::test]
    async fn approving_a_declined_session_is_invalid_state() {
        let mut session = pending_session();
        session.decline().unwrap();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let notifier = Arc::new(MockNotifier::new());

        let result = handler(repo, notifier)
            .handle(
                DecideSessionCommand {
                    session_id: id,
                    decision: Decision::Approved,
                    scheduled_date: Some(Timestamp::now()),
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let repo = Arc::new(MockSessionRepository::new());
        let notifier = Arc::new(MockNotifier::new());
        let id = SessionId::new();

        let result = handler(repo, notifier)
            .handle(
                DecideSessionCommand {
                    session_id: id,
                    decision: Decision::Declined,
                    scheduled_date: None,
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), SessionError::NotFound(id));
    }

    #[test]
    fn decision_parses_known_values_only() {
        assert_eq!("approved".parse::<Decision>().unwrap(), Decision::Approved);
        assert_eq!("declined".parse::<Decision>().unwrap(), Decision::Declined);
        assert!(matches!(
            "maybe".parse::<Decision>(),
            Err(SessionError::ValidationFailed { .. })
        ));
    }
}
