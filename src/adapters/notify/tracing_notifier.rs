//! Structured-log notifier.
//!
//! Email delivery is handled by an external service; this adapter records
//! each lifecycle announcement as a structured log line so the downstream
//! mailer (or an operator) can pick it up.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::session::Session;
use crate::ports::SessionNotifier;

/// Notifier that emits tracing events instead of sending mail itself.
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionNotifier for TracingNotifier {
    async fn session_requested(&self, session: &Session) -> Result<(), DomainError> {
        tracing::info!(
            session_id = %session.id(),
            professional = %session.professional(),
            attendee = %session.attendee(),
            "notify: session requested"
        );
        Ok(())
    }

    async fn session_approved(&self, session: &Session) -> Result<(), DomainError> {
        tracing::info!(
            session_id = %session.id(),
            attendee = %session.attendee(),
            session_date = %session.session_date(),
            "notify: session approved"
        );
        Ok(())
    }

    async fn session_declined(&self, session: &Session) -> Result<(), DomainError> {
        tracing::info!(
            session_id = %session.id(),
            attendee = %session.attendee(),
            "notify: session declined"
        );
        Ok(())
    }

    async fn session_completed(&self, session: &Session) -> Result<(), DomainError> {
        tracing::info!(
            session_id = %session.id(),
            attendee = %session.attendee(),
            "notify: session completed"
        );
        Ok(())
    }
}
