//! Read-side session views.
//!
//! Join access is a projection, recomputed against the clock on every
//! read - it is never persisted, so it can never drift from the fields
//! it derives from.

use crate::domain::foundation::Timestamp;
use crate::domain::session::Session;

/// A session together with its derived join-access flag.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session: Session,
    pub join_access: bool,
}

impl SessionView {
    /// Project a session as of `now`.
    pub fn project(session: Session, now: &Timestamp) -> Self {
        let join_access = session.join_access(now);
        Self {
            session,
            join_access,
        }
    }
}
