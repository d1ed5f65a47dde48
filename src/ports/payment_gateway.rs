//! Payment gateway port for external checkout processing.
//!
//! The gateway is an opaque external service: the platform sends it a
//! checkout-creation request, receives a redirect URL, and later hears back
//! through unauthenticated success/fail/cancel callbacks that carry the
//! session id in the URL path.
//!
//! # Design
//!
//! - **Gateway agnostic**: the interface carries no provider-specific shape
//! - **Fire-and-forget**: initiation either yields a redirect URL or fails
//!   whole; no partial state is ever written on failure
//! - **Callback idempotency lives upstream**: the lifecycle absorbs repeat
//!   success callbacks, so the gateway may retry freely

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the external checkout gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout at the gateway and return where to send the payer.
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutRedirect, PaymentError>;
}

/// Request to open a gateway checkout for a session fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Session being paid for; echoed back in the callback path.
    pub session_id: SessionId,

    /// Fee amount in the platform currency.
    pub amount: f64,

    /// ISO currency code.
    pub currency: String,

    /// Payer name for the gateway's checkout page.
    pub customer_name: String,

    /// Payer email.
    pub customer_email: String,

    /// Payer phone, if collected.
    pub customer_phone: Option<String>,

    /// Where the gateway sends the payer after success.
    pub success_url: String,

    /// Where the gateway sends the payer after a failed attempt.
    pub fail_url: String,

    /// Where the gateway sends the payer after cancelling.
    pub cancel_url: String,
}

/// A checkout the payer can be redirected to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRedirect {
    /// Gateway-hosted checkout page.
    pub redirect_url: String,

    /// Gateway's own reference for the checkout, if it returns one.
    pub gateway_ref: Option<String>,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }

    /// Create a provider-rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderRejected, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(ErrorCode::UpstreamPaymentError, err.message)
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue reaching the gateway.
    NetworkError,

    /// Gateway rejected the store credentials.
    AuthenticationError,

    /// Gateway answered with something unparseable.
    InvalidResponse,

    /// Gateway refused to open the checkout.
    ProviderRejected,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::NetworkError)
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidResponse => "invalid_response",
            PaymentErrorCode::ProviderRejected => "provider_rejected",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
