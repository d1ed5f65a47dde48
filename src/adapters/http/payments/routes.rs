//! HTTP routes for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{initiate_payment, payment_callback, PaymentHandlers};

/// Creates the payment router with all endpoints.
pub fn payment_routes(handlers: PaymentHandlers) -> Router {
    Router::new()
        .route("/initiate", post(initiate_payment))
        .route("/:session_id/:outcome", get(payment_callback))
        .with_state(handlers)
}
