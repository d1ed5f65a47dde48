//! Session aggregate entity.
//!
//! A session is a consultation between an attendee and a professional.
//! It moves through a fixed lifecycle: the attendee requests it (pending),
//! the professional approves with a schedule or declines, and an approved
//! session is eventually completed.
//!
//! # Invariants
//!
//! - `session_type` is immutable after creation
//! - status only moves along pending -> {approved, declined},
//!   approved -> completed
//! - `session_date` after approval is the professional-set schedule, never
//!   the request submission time
//! - `payment_status` never downgrades from Completed to Pending

use crate::domain::foundation::{
    AttendeeRef, DomainError, ErrorCode, PaymentStatus, ProfessionalRef, SessionId, SessionStatus,
    SessionType, Timestamp,
};
use serde::{Deserialize, Serialize};

use super::access;

/// Session aggregate - a requested or scheduled consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Attendee who requested the session.
    attendee: AttendeeRef,

    /// Professional the session was requested from.
    professional: ProfessionalRef,

    /// Delivery mode, fixed at request time.
    session_type: SessionType,

    /// Current lifecycle status.
    status: SessionStatus,

    /// Request submission time until approval, then the scheduled time.
    session_date: Timestamp,

    /// Payment state; only meaningful for online sessions.
    payment_status: PaymentStatus,

    /// Professional's note, attached after completion. Scalar: a new note
    /// replaces the old one.
    recommendation: Option<String>,

    /// When the session was requested.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl Session {
    /// Create a newly requested session in `Pending`.
    ///
    /// `requested_at` is a placeholder for `session_date` until the
    /// professional approves with a real schedule.
    pub fn request(
        id: SessionId,
        attendee: AttendeeRef,
        professional: ProfessionalRef,
        session_type: SessionType,
        requested_at: Timestamp,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            attendee,
            professional,
            session_type,
            status: SessionStatus::Pending,
            session_date: requested_at,
            payment_status: PaymentStatus::Pending,
            recommendation: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        attendee: AttendeeRef,
        professional: ProfessionalRef,
        session_type: SessionType,
        status: SessionStatus,
        session_date: Timestamp,
        payment_status: PaymentStatus,
        recommendation: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            attendee,
            professional,
            session_type,
            status,
            session_date,
            payment_status,
            recommendation,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn attendee(&self) -> &AttendeeRef {
        &self.attendee
    }

    pub fn professional(&self) -> &ProfessionalRef {
        &self.professional
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn session_date(&self) -> &Timestamp {
        &self.session_date
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Approve the request and fix the schedule.
    ///
    /// `scheduled_date` replaces the request-time placeholder; approval
    /// without an explicit schedule is rejected upstream as a validation
    /// failure before this method is reached.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless status is `Pending`
    pub fn approve(&mut self, scheduled_date: Timestamp) -> Result<(), DomainError> {
        self.ensure_transition(SessionStatus::Approved)?;

        self.status = SessionStatus::Approved;
        self.session_date = scheduled_date;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Decline the request. Terminal; `session_date` is left untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless status is `Pending`
    pub fn decline(&mut self) -> Result<(), DomainError> {
        self.ensure_transition(SessionStatus::Declined)?;

        self.status = SessionStatus::Declined;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark the session as held.
    ///
    /// There is deliberately no payment precondition here: the platform has
    /// always allowed a professional to complete an online session whose
    /// payment is still pending, and that behavior is preserved.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless status is `Approved`
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.ensure_transition(SessionStatus::Completed)?;

        self.status = SessionStatus::Completed;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Record a successful payment callback from the gateway.
    ///
    /// Idempotent: returns `true` if the payment was newly completed and
    /// `false` for a repeat callback. Never errors and never touches
    /// `status` - payment is orthogonal to the lifecycle.
    pub fn record_payment_success(&mut self) -> bool {
        if self.payment_status.is_completed() {
            return false;
        }
        self.payment_status = PaymentStatus::Completed;
        self.updated_at = Timestamp::now();
        true
    }

    /// Attach (or replace) the professional's recommendation note.
    ///
    /// Allowed at any status; meaningful once the session is completed.
    /// Returns the previous note, if any.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is blank
    pub fn attach_recommendation(
        &mut self,
        text: String,
    ) -> Result<Option<String>, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "text",
                "Recommendation cannot be empty",
            ));
        }

        let old = std::mem::replace(&mut self.recommendation, Some(text));
        self.updated_at = Timestamp::now();
        Ok(old)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived state
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether either party may join the session room right now.
    ///
    /// Recomputed on every view; never persisted.
    pub fn join_access(&self, now: &Timestamp) -> bool {
        access::join_access(
            self.status,
            self.session_type,
            self.payment_status,
            &self.session_date,
            now,
        )
    }

    /// Validates that initiating a gateway payment makes sense for this
    /// session: approved, online, and not already paid.
    ///
    /// Re-initiation while payment is still pending is allowed - the
    /// gateway callback path is idempotent and absorbs duplicates.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` with a reason otherwise
    pub fn ensure_payment_initiable(&self) -> Result<(), DomainError> {
        if !self.session_type.is_online() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Offline sessions are settled outside the platform",
            ));
        }
        if self.status != SessionStatus::Approved {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot pay for a {} session", self.status),
            ));
        }
        if self.payment_status.is_completed() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Payment has already been completed",
            ));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_transition(&self, target: SessionStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(&target) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot move a {} session to {}", self.status, target),
            ))
        }
    }
}
