//! SessionType enum - online vs. in-person sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a therapy session is delivered. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Conducted remotely; requires payment before joining.
    Online,
    /// Conducted in person; payment is settled outside the platform.
    Offline,
}

impl SessionType {
    /// Returns true for remotely delivered sessions.
    pub fn is_online(&self) -> bool {
        matches!(self, SessionType::Online)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionType::Online => "online",
            SessionType::Offline => "offline",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_online_works() {
        assert!(SessionType::Online.is_online());
        assert!(!SessionType::Offline.is_online());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionType::Online).unwrap(),
            "\"online\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let t: SessionType = serde_json::from_str("\"offline\"").unwrap();
        assert_eq!(t, SessionType::Offline);
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!(serde_json::from_str::<SessionType>("\"hybrid\"").is_err());
    }
}
