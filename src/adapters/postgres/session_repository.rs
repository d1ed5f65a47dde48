//! PostgreSQL implementation of SessionRepository.
//!
//! Status transitions persist through a conditional UPDATE keyed on the
//! status the caller read, so concurrent double-submits lose cleanly.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    AttendeeRef, DomainError, ErrorCode, PaymentStatus, ProfessionalRef, SessionId,
    SessionStatus, SessionType, Timestamp,
};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check session existence: {}", e),
                )
            })?;

        Ok(result.0 > 0)
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, attendee_ref, professional_ref, session_type, session_status,
                session_date, payment_status, recommendation, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.attendee().as_str())
        .bind(session.professional().as_str())
        .bind(session_type_to_str(session.session_type()))
        .bind(session_status_to_str(session.status()))
        .bind(*session.session_date().as_datetime())
        .bind(payment_status_to_str(session.payment_status()))
        .bind(session.recommendation())
        .bind(*session.created_at().as_datetime())
        .bind(*session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update_guarded(
        &self,
        session: &Session,
        expected_status: SessionStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                session_status = $3,
                session_date = $4,
                payment_status = $5,
                recommendation = $6,
                updated_at = $7
            WHERE id = $1 AND session_status = $2
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session_status_to_str(expected_status))
        .bind(session_status_to_str(session.status()))
        .bind(*session.session_date().as_datetime())
        .bind(payment_status_to_str(session.payment_status()))
        .bind(session.recommendation())
        .bind(*session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            if self.exists(session.id()).await? {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "Session was modified concurrently",
                ));
            }
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn set_payment_completed(&self, id: &SessionId) -> Result<(), DomainError> {
        // One-way write: repeating it for an already-completed payment
        // still matches the row and changes nothing but updated_at.
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                payment_status = 'completed',
                updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(*Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to complete payment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, attendee_ref, professional_ref, session_type, session_status,
                   session_date, payment_status, recommendation, created_at, updated_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_session(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_attendee(
        &self,
        attendee: &AttendeeRef,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, attendee_ref, professional_ref, session_type, session_status,
                   session_date, payment_status, recommendation, created_at, updated_at
            FROM sessions
            WHERE attendee_ref = $1
            ORDER BY session_date DESC
            "#,
        )
        .bind(attendee.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sessions by attendee: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn find_by_professional(
        &self,
        professional: &ProfessionalRef,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, attendee_ref, professional_ref, session_type, session_status,
                   session_date, payment_status, recommendation, created_at, updated_at
            FROM sessions
            WHERE professional_ref = $1
            ORDER BY session_date DESC
            "#,
        )
        .bind(professional.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sessions by professional: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn session_status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Pending => "pending",
        SessionStatus::Approved => "approved",
        SessionStatus::Declined => "declined",
        SessionStatus::Completed => "completed",
    }
}

fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "pending" => Ok(SessionStatus::Pending),
        "approved" => Ok(SessionStatus::Approved),
        "declined" => Ok(SessionStatus::Declined),
        "completed" => Ok(SessionStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )),
    }
}

fn session_type_to_str(session_type: SessionType) -> &'static str {
    match session_type {
        SessionType::Online => "online",
        SessionType::Offline => "offline",
    }
}

fn str_to_session_type(s: &str) -> Result<SessionType, DomainError> {
    match s {
        "online" => Ok(SessionType::Online),
        "offline" => Ok(SessionType::Offline),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session type: {}", s),
        )),
    }
}

fn payment_status_to_str(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Completed => "completed",
    }
}

fn str_to_payment_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "completed" => Ok(PaymentStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment status: {}", s),
        )),
    }
}

fn db_err(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("id", e))?;
    let attendee: String = row
        .try_get("attendee_ref")
        .map_err(|e| db_err("attendee_ref", e))?;
    let professional: String = row
        .try_get("professional_ref")
        .map_err(|e| db_err("professional_ref", e))?;
    let session_type: String = row
        .try_get("session_type")
        .map_err(|e| db_err("session_type", e))?;
    let status: String = row
        .try_get("session_status")
        .map_err(|e| db_err("session_status", e))?;
    let session_date: chrono::DateTime<chrono::Utc> = row
        .try_get("session_date")
        .map_err(|e| db_err("session_date", e))?;
    let payment_status: String = row
        .try_get("payment_status")
        .map_err(|e| db_err("payment_status", e))?;
    let recommendation: Option<String> = row
        .try_get("recommendation")
        .map_err(|e| db_err("recommendation", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_err("updated_at", e))?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        AttendeeRef::new(attendee).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid attendee_ref: {}", e))
        })?,
        ProfessionalRef::new(professional).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid professional_ref: {}", e),
            )
        })?,
        str_to_session_type(&session_type)?,
        str_to_session_status(&status)?,
        Timestamp::from_datetime(session_date),
        str_to_payment_status(&payment_status)?,
        recommendation,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
