//! Shared in-memory port implementations for handler unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::availability::AvailabilitySlot;
use crate::domain::foundation::{
    AttendeeRef, DomainError, ErrorCode, ProfessionalRef, SessionId, SessionStatus, SlotId,
    Timestamp,
};
use crate::domain::session::Session;
use crate::ports::{
    CheckoutRedirect, CheckoutRequest, PaymentError, PaymentGateway, SessionNotifier,
    SessionRepository, SlotRepository,
};

/// In-memory SessionRepository with the same guarded-update semantics as
/// the Postgres adapter.
pub struct MockSessionRepository {
    sessions: Mutex<HashMap<SessionId, Session>>,
    fail_writes: bool,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn with_session(session: Session) -> Self {
        let repo = Self::new();
        repo.sessions
            .lock()
            .unwrap()
            .insert(*session.id(), session);
        repo
    }

    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    fn ensure_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes {
            Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated write failure",
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        self.ensure_writable()?;
        self.sessions
            .lock()
            .unwrap()
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update_guarded(
        &self,
        session: &Session,
        expected_status: SessionStatus,
    ) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions.get_mut(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            )
        })?;
        if stored.status() != expected_status {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Session was modified concurrently",
            ));
        }
        *stored = session.clone();
        Ok(())
    }

    async fn set_payment_completed(&self, id: &SessionId) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            )
        })?;
        stored.record_payment_success();
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn find_by_attendee(
        &self,
        attendee: &AttendeeRef,
    ) -> Result<Vec<Session>, DomainError> {
        let mut found: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.attendee() == attendee)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.session_date().cmp(a.session_date()));
        Ok(found)
    }

    async fn find_by_professional(
        &self,
        professional: &ProfessionalRef,
    ) -> Result<Vec<Session>, DomainError> {
        let mut found: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.professional() == professional)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.session_date().cmp(a.session_date()));
        Ok(found)
    }
}

/// In-memory SlotRepository enforcing the natural key and the
/// booked-at-most-once rule under a single lock.
pub struct MockSlotRepository {
    slots: Mutex<HashMap<SlotId, AvailabilitySlot>>,
}

impl MockSlotRepository {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_slots(slots: Vec<AvailabilitySlot>) -> Self {
        let repo = Self::new();
        {
            let mut stored = repo.slots.lock().unwrap();
            for slot in slots {
                stored.insert(*slot.id(), slot);
            }
        }
        repo
    }

    pub fn get(&self, id: &SlotId) -> Option<AvailabilitySlot> {
        self.slots.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SlotRepository for MockSlotRepository {
    async fn insert_many(&self, slots: &[AvailabilitySlot]) -> Result<u32, DomainError> {
        let mut stored = self.slots.lock().unwrap();
        let mut created = 0;
        for slot in slots {
            let duplicate = stored.values().any(|existing| {
                existing.professional() == slot.professional()
                    && existing.slot_date() == slot.slot_date()
                    && existing.start_time() == slot.start_time()
            });
            if !duplicate {
                stored.insert(*slot.id(), slot.clone());
                created += 1;
            }
        }
        Ok(created)
    }

    async fn find_by_id(&self, id: &SlotId) -> Result<Option<AvailabilitySlot>, DomainError> {
        Ok(self.slots.lock().unwrap().get(id).cloned())
    }

    async fn find_open_by_professional(
        &self,
        professional: &ProfessionalRef,
    ) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let mut open: Vec<AvailabilitySlot> = self
            .slots
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.professional() == professional && !s.is_booked())
            .cloned()
            .collect();
        open.sort_by_key(|s| (s.slot_date(), s.start_time()));
        Ok(open)
    }

    async fn book(
        &self,
        id: &SlotId,
        attendee: &AttendeeRef,
        at: Timestamp,
    ) -> Result<AvailabilitySlot, DomainError> {
        let mut stored = self.slots.lock().unwrap();
        let slot = stored.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SlotNotFound, format!("Slot not found: {}", id))
        })?;
        slot.mark_booked(attendee.clone(), at)?;
        Ok(slot.clone())
    }
}

/// Notifier that records which announcements went out.
pub struct MockNotifier {
    pub events: Mutex<Vec<String>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn recorded(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: &str, session: &Session) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated notify failure",
            ));
        }
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:{}", event, session.id()));
        Ok(())
    }
}

#[async_trait]
impl SessionNotifier for MockNotifier {
    async fn session_requested(&self, session: &Session) -> Result<(), DomainError> {
        self.record("requested", session)
    }

    async fn session_approved(&self, session: &Session) -> Result<(), DomainError> {
        self.record("approved", session)
    }

    async fn session_declined(&self, session: &Session) -> Result<(), DomainError> {
        self.record("declined", session)
    }

    async fn session_completed(&self, session: &Session) -> Result<(), DomainError> {
        self.record("completed", session)
    }
}

/// Gateway that either hands out a fixed redirect or fails like a dead
/// network, recording every request it saw.
pub struct MockGateway {
    pub requests: Mutex<Vec<CheckoutRequest>>,
    fail_network: bool,
}

impl MockGateway {
    pub fn succeeding() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_network: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_network: true,
        }
    }

    pub fn seen(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutRedirect, PaymentError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_network {
            return Err(PaymentError::network("connection refused"));
        }
        Ok(CheckoutRedirect {
            redirect_url: format!("https://gateway.test/checkout/{}", request.session_id),
            gateway_ref: Some("txn-test-1".to_string()),
        })
    }
}
