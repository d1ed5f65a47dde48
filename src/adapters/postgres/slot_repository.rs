//! PostgreSQL implementation of SlotRepository.
//!
//! Booking is a single conditional UPDATE on the booked flag: of two
//! racing attendees the database lets exactly one row-match succeed, and
//! the loser is told the slot is taken.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::availability::AvailabilitySlot;
use crate::domain::foundation::{
    AttendeeRef, DomainError, ErrorCode, ProfessionalRef, SlotId, Timestamp,
};
use crate::ports::SlotRepository;

/// PostgreSQL implementation of SlotRepository.
#[derive(Clone)]
pub struct PostgresSlotRepository {
    pool: PgPool,
}

impl PostgresSlotRepository {
    /// Creates a new PostgresSlotRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &SlotId) -> Result<bool, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM availability_slots WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to check slot existence: {}", e),
                    )
                })?;

        Ok(result.0 > 0)
    }
}

#[async_trait]
impl SlotRepository for PostgresSlotRepository {
    async fn insert_many(&self, slots: &[AvailabilitySlot]) -> Result<u32, DomainError> {
        // Best-effort bulk publish: natural-key duplicates are skipped by
        // ON CONFLICT and only the created count is reported.
        let mut created = 0u32;
        for slot in slots {
            let result = sqlx::query(
                r#"
                INSERT INTO availability_slots (
                    id, professional_ref, slot_date, start_time, end_time,
                    is_booked, booked_by, booked_at, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (professional_ref, slot_date, start_time) DO NOTHING
                "#,
            )
            .bind(slot.id().as_uuid())
            .bind(slot.professional().as_str())
            .bind(slot.slot_date())
            .bind(slot.start_time())
            .bind(slot.end_time())
            .bind(slot.is_booked())
            .bind(slot.booked_by().map(|a| a.as_str().to_string()))
            .bind(slot.booked_at().map(|t| *t.as_datetime()))
            .bind(*slot.created_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert slot: {}", e),
                )
            })?;

            created += result.rows_affected() as u32;
        }

        Ok(created)
    }

    async fn find_by_id(&self, id: &SlotId) -> Result<Option<AvailabilitySlot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, professional_ref, slot_date, start_time, end_time,
                   is_booked, booked_by, booked_at, created_at
            FROM availability_slots
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch slot: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_slot(row)?)),
            None => Ok(None),
        }
    }

    async fn find_open_by_professional(
        &self,
        professional: &ProfessionalRef,
    ) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, professional_ref, slot_date, start_time, end_time,
                   is_booked, booked_by, booked_at, created_at
            FROM availability_slots
            WHERE professional_ref = $1 AND is_booked = FALSE
            ORDER BY slot_date ASC, start_time ASC
            "#,
        )
        .bind(professional.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch open slots: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_slot).collect()
    }

    async fn book(
        &self,
        id: &SlotId,
        attendee: &AttendeeRef,
        at: Timestamp,
    ) -> Result<AvailabilitySlot, DomainError> {
        // Atomic check-and-set: only an un-booked row matches, so a racing
        // second caller affects zero rows and loses.
        let row = sqlx::query(
            r#"
            UPDATE availability_slots SET
                is_booked = TRUE,
                booked_by = $2,
                booked_at = $3
            WHERE id = $1 AND is_booked = FALSE
            RETURNING id, professional_ref, slot_date, start_time, end_time,
                      is_booked, booked_by, booked_at, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(attendee.as_str())
        .bind(*at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to book slot: {}", e),
            )
        })?;

        match row {
            Some(row) => row_to_slot(row),
            None => {
                if self.exists(id).await? {
                    Err(DomainError::new(
                        ErrorCode::SlotAlreadyBooked,
                        format!("Slot already booked: {}", id),
                    ))
                } else {
                    Err(DomainError::new(
                        ErrorCode::SlotNotFound,
                        format!("Slot not found: {}", id),
                    ))
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_err(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_slot(row: sqlx::postgres::PgRow) -> Result<AvailabilitySlot, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("id", e))?;
    let professional: String = row
        .try_get("professional_ref")
        .map_err(|e| db_err("professional_ref", e))?;
    let slot_date: chrono::NaiveDate = row
        .try_get("slot_date")
        .map_err(|e| db_err("slot_date", e))?;
    let start_time: chrono::NaiveTime = row
        .try_get("start_time")
        .map_err(|e| db_err("start_time", e))?;
    let end_time: chrono::NaiveTime = row
        .try_get("end_time")
        .map_err(|e| db_err("end_time", e))?;
    let is_booked: bool = row.try_get("is_booked").map_err(|e| db_err("is_booked", e))?;
    let booked_by: Option<String> = row
        .try_get("booked_by")
        .map_err(|e| db_err("booked_by", e))?;
    let booked_at: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("booked_at")
        .map_err(|e| db_err("booked_at", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("created_at", e))?;

    let booked_by = booked_by
        .map(|a| {
            AttendeeRef::new(a).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid booked_by: {}", e))
            })
        })
        .transpose()?;

    Ok(AvailabilitySlot::reconstitute(
        SlotId::from_uuid(id),
        ProfessionalRef::new(professional).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid professional_ref: {}", e),
            )
        })?,
        slot_date,
        start_time,
        end_time,
        is_booked,
        booked_by,
        booked_at.map(Timestamp::from_datetime),
        Timestamp::from_datetime(created_at),
    ))
}
