//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::CheckoutRedirect;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a gateway checkout for a session fee.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiatePaymentRequest {
    pub session_id: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
}

fn default_currency() -> String {
    "BDT".to_string()
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Where to send the payer.
#[derive(Debug, Clone, Serialize)]
pub struct InitiatePaymentResponse {
    pub redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_ref: Option<String>,
}

impl From<CheckoutRedirect> for InitiatePaymentResponse {
    fn from(redirect: CheckoutRedirect) -> Self {
        Self {
            redirect_url: redirect.redirect_url,
            gateway_ref: redirect.gateway_ref,
        }
    }
}
