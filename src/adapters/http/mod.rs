//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter; `api_router` composes them
//! into the application's full surface.

pub mod availability;
pub mod error;
pub mod payments;
pub mod sessions;

pub use availability::{availability_routes, AvailabilityHandlers};
pub use payments::{payment_routes, PaymentHandlers};
pub use sessions::{session_routes, SessionHandlers};

use axum::{routing::get, Router};

/// Composes the full API router.
pub fn api_router(
    sessions: SessionHandlers,
    availability: AvailabilityHandlers,
    payments: PaymentHandlers,
) -> Router {
    Router::new()
        .nest("/api/sessions", session_routes(sessions))
        .nest("/api/availability", availability_routes(availability))
        .nest("/api/payments", payment_routes(payments))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}
