//! SessionStatus enum for tracking the therapy session lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a therapy session.
///
/// Valid transitions:
/// - Pending -> Approved
/// - Pending -> Declined
/// - Approved -> Completed
///
/// Declined and Completed are terminal. No transition skips a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Pending,
    Approved,
    Declined,
    Completed,
}

impl SessionStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Declined | SessionStatus::Completed)
    }

    /// Validates a transition from this status to another.
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Pending, Approved) | (Pending, Declined) | (Approved, Completed)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Approved => "approved",
            SessionStatus::Declined => "declined",
            SessionStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}
