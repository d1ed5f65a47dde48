//! Session lifecycle handlers.
//!
//! One handler per lifecycle operation: request, approve/decline,
//! complete, payment confirmation, recommendation, and the read side.

mod attach_recommendation;
mod complete_session;
mod decide_session;
mod get_session;
mod list_sessions;
mod mark_payment_completed;
mod request_session;
mod views;

pub use attach_recommendation::{AttachRecommendationCommand, AttachRecommendationHandler};
pub use complete_session::{CompleteSessionCommand, CompleteSessionHandler};
pub use decide_session::{DecideSessionCommand, DecideSessionHandler, Decision};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery, PartyFilter};
pub use mark_payment_completed::{MarkPaymentCompletedCommand, MarkPaymentCompletedHandler};
pub use request_session::{RequestSessionCommand, RequestSessionHandler};
pub use views::SessionView;
