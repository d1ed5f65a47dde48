//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `SessionRepository` - Session aggregate persistence with guarded updates
//! - `SlotRepository` - Availability slots with atomic booking
//!
//! ## Integration Ports
//!
//! - `PaymentGateway` - External checkout creation (redirect contract)
//! - `SessionNotifier` - Lifecycle announcements (delivery is external)
//! - `ResetTokenStore` - TTL'd single-use password-reset tokens

mod notifier;
mod payment_gateway;
mod reset_token_store;
mod session_repository;
mod slot_repository;

pub use notifier::SessionNotifier;
pub use payment_gateway::{
    CheckoutRedirect, CheckoutRequest, PaymentError, PaymentErrorCode, PaymentGateway,
};
pub use reset_token_store::ResetTokenStore;
pub use session_repository::SessionRepository;
pub use slot_repository::SlotRepository;
