//! Availability-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SlotId};

/// Errors surfaced by the availability handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// Slot was not found.
    NotFound(SlotId),
    /// The slot was already booked when the write landed.
    AlreadyBooked(SlotId),
    /// Malformed input (inverted window, bad ref, bad date).
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SlotError {
    pub fn not_found(id: SlotId) -> Self {
        SlotError::NotFound(id)
    }

    pub fn already_booked(id: SlotId) -> Self {
        SlotError::AlreadyBooked(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SlotError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SlotError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SlotError::NotFound(_) => ErrorCode::SlotNotFound,
            SlotError::AlreadyBooked(_) => ErrorCode::SlotAlreadyBooked,
            SlotError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SlotError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SlotError::NotFound(id) => format!("Slot not found: {}", id),
            SlotError::AlreadyBooked(id) => format!("Slot already booked: {}", id),
            SlotError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SlotError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SlotError {}

impl From<DomainError> for SlotError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SlotError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SlotError::Infrastructure(err.message),
        }
    }
}
