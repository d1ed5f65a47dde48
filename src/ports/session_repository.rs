//! Session repository port.
//!
//! Defines the contract for persisting and retrieving Session aggregates.
//! No business rules live here; lifecycle guards belong to the aggregate
//! and the handlers.
//!
//! # Design
//!
//! - **Guarded updates**: status transitions persist through
//!   [`SessionRepository::update_guarded`], which only succeeds when the
//!   stored status still matches the status the caller read. A professional
//!   double-submitting from two tabs loses cleanly instead of silently
//!   overwriting.
//! - **Idempotent payment flag**: [`SessionRepository::set_payment_completed`]
//!   is a targeted one-way write; repeating it is a no-op.

use crate::domain::foundation::{
    AttendeeRef, DomainError, ProfessionalRef, SessionId, SessionStatus,
};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Persist an updated session, but only if the stored status still
    /// equals `expected_status` (the status the caller loaded).
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `InvalidStateTransition` if the stored status has moved on
    /// - `DatabaseError` on persistence failure
    async fn update_guarded(
        &self,
        session: &Session,
        expected_status: SessionStatus,
    ) -> Result<(), DomainError>;

    /// Mark the session's payment as completed.
    ///
    /// One-way and idempotent: calling it for an already-completed payment
    /// changes nothing and is not an error.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn set_payment_completed(&self, id: &SessionId) -> Result<(), DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Find all sessions requested by an attendee, newest `session_date`
    /// first.
    async fn find_by_attendee(
        &self,
        attendee: &AttendeeRef,
    ) -> Result<Vec<Session>, DomainError>;

    /// Find all sessions requested from a professional, newest
    /// `session_date` first.
    async fn find_by_professional(
        &self,
        professional: &ProfessionalRef,
    ) -> Result<Vec<Session>, DomainError>;
}
