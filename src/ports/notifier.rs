//! Notification port for session lifecycle events.
//!
//! Email delivery itself is an external collaborator; the lifecycle only
//! announces what happened. Handlers treat notification as best-effort:
//! a failed notification never fails the transition that triggered it.

use crate::domain::foundation::DomainError;
use crate::domain::session::Session;
use async_trait::async_trait;

/// Port for announcing session lifecycle events to the parties.
#[async_trait]
pub trait SessionNotifier: Send + Sync {
    /// A new session was requested from a professional.
    async fn session_requested(&self, session: &Session) -> Result<(), DomainError>;

    /// A pending session was approved and scheduled.
    async fn session_approved(&self, session: &Session) -> Result<(), DomainError>;

    /// A pending session was declined.
    async fn session_declined(&self, session: &Session) -> Result<(), DomainError>;

    /// An approved session was marked as held.
    async fn session_completed(&self, session: &Session) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_notifier_is_object_safe() {
        fn _accepts_dyn(_notifier: &dyn SessionNotifier) {}
    }
}
