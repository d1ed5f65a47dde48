//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the MindHarbor scheduling domain.

mod command;
mod errors;
mod ids;
mod payment_status;
mod session_status;
mod session_type;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AttendeeRef, ProfessionalRef, SessionId, SlotId};
pub use payment_status::PaymentStatus;
pub use session_status::SessionStatus;
pub use session_type::SessionType;
pub use timestamp::Timestamp;
