//! HTTP handlers for payment endpoints.
//!
//! The three GET callbacks are hit by the gateway redirecting the payer's
//! browser, so their terminal response is a redirect to the client
//! dashboard rather than a JSON body - except for an unresolvable session
//! id, which is a hard 404 and never a silent no-op.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::sessions::handle_session_error;
use crate::application::handlers::payment::{
    CallbackOutcome, HandlePaymentCallbackHandler, InitiatePaymentCommand,
    InitiatePaymentHandler, PaymentCallbackCommand,
};
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::SessionError;

use super::dto::{InitiatePaymentRequest, InitiatePaymentResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PaymentHandlers {
    initiate_handler: Arc<InitiatePaymentHandler>,
    callback_handler: Arc<HandlePaymentCallbackHandler>,
    /// Client dashboard the payer lands on after every callback.
    dashboard_url: String,
}

impl PaymentHandlers {
    pub fn new(
        initiate_handler: Arc<InitiatePaymentHandler>,
        callback_handler: Arc<HandlePaymentCallbackHandler>,
        dashboard_url: impl Into<String>,
    ) -> Self {
        Self {
            initiate_handler,
            callback_handler,
            dashboard_url: dashboard_url.into(),
        }
    }

    fn dashboard_redirect(&self, outcome: &str) -> Response {
        let url = format!("{}?payment={}", self.dashboard_url, outcome);
        Redirect::to(&url).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/initiate - Start a checkout, returning a redirect URL
pub async fn initiate_payment(
    State(handlers): State<PaymentHandlers>,
    Json(req): Json<InitiatePaymentRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let metadata = CommandMetadata::new(req.customer_email.clone());
    let cmd = InitiatePaymentCommand {
        session_id,
        amount: req.amount,
        currency: req.currency,
        customer_name: req.customer_name,
        customer_email: req.customer_email,
        customer_phone: req.customer_phone,
    };

    match handlers.initiate_handler.handle(cmd, metadata).await {
        Ok(redirect) => {
            let response: InitiatePaymentResponse = redirect.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/payments/:session_id/:outcome - Gateway callback
///
/// `outcome` is one of success, fail, cancel. Success records the payment
/// (idempotently); fail and cancel change nothing. All three send the
/// payer back to their dashboard.
pub async fn payment_callback(
    State(handlers): State<PaymentHandlers>,
    Path((session_id, outcome)): Path<(String, String)>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let outcome: CallbackOutcome = match outcome.parse() {
        Ok(o) => o,
        Err(e) => return handle_session_error(e),
    };

    let outcome_label = match outcome {
        CallbackOutcome::Success => "success",
        CallbackOutcome::Fail => "fail",
        CallbackOutcome::Cancel => "cancel",
    };

    match handlers
        .callback_handler
        .handle(
            PaymentCallbackCommand {
                session_id,
                outcome,
            },
            CommandMetadata::new("gateway"),
        )
        .await
    {
        Ok(()) => handlers.dashboard_redirect(outcome_label),
        Err(SessionError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        Err(e) => handle_session_error(e),
    }
}
