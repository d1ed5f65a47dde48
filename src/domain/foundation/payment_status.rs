//! PaymentStatus enum for session payment gating.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment state of a session fee.
///
/// Meaningful only for online sessions; offline sessions are always treated
/// as payment-satisfied. Never downgrades from Completed to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

impl PaymentStatus {
    /// Returns true once the gateway has confirmed the payment.
    pub fn is_completed(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}
