//! Hosted-checkout gateway adapter.
//!
//! Implements the `PaymentGateway` port against the platform's external
//! checkout provider: one form POST opens a checkout and yields a hosted
//! payment page URL; the payer is redirected there and the gateway later
//! reports the outcome through the success/fail/cancel callback URLs
//! embedded in the request.
//!
//! The gateway is treated as unreliable. Every failure mode - network,
//! bad credentials, malformed body, provider refusal - surfaces as a
//! `PaymentError` without any state having been written.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{CheckoutRedirect, CheckoutRequest, PaymentError, PaymentGateway};

/// Checkout gateway configuration.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway API.
    api_base_url: String,

    /// Merchant store identifier.
    store_id: String,

    /// Merchant store password.
    store_password: SecretString,
}

impl GatewayConfig {
    /// Create a new gateway configuration.
    pub fn new(
        api_base_url: impl Into<String>,
        store_id: impl Into<String>,
        store_password: impl Into<String>,
    ) -> Self {
        let mut base = api_base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            api_base_url: base,
            store_id: store_id.into(),
            store_password: SecretString::new(store_password.into()),
        }
    }

    fn checkout_endpoint(&self) -> String {
        format!("{}/v4/checkout/session", self.api_base_url)
    }
}

/// Checkout gateway adapter.
pub struct CheckoutGatewayAdapter {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

/// Wire shape of the gateway's checkout-creation response.
#[derive(Debug, Deserialize)]
struct GatewaySessionResponse {
    status: String,
    #[serde(rename = "GatewayPageURL")]
    gateway_page_url: Option<String>,
    #[serde(rename = "sessionkey")]
    session_key: Option<String>,
    #[serde(rename = "failedreason")]
    failed_reason: Option<String>,
}

impl CheckoutGatewayAdapter {
    /// Create a new adapter with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn map_transport_error(e: reqwest::Error) -> PaymentError {
        if e.is_timeout() || e.is_connect() {
            PaymentError::network(format!("Gateway unreachable: {}", e))
        } else {
            PaymentError::network(format!("Gateway request failed: {}", e))
        }
    }
}

#[async_trait]
impl PaymentGateway for CheckoutGatewayAdapter {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutRedirect, PaymentError> {
        let form = [
            ("store_id", self.config.store_id.clone()),
            (
                "store_passwd",
                self.config.store_password.expose_secret().clone(),
            ),
            ("tran_id", request.session_id.to_string()),
            ("total_amount", format!("{:.2}", request.amount)),
            ("currency", request.currency.clone()),
            ("cus_name", request.customer_name.clone()),
            ("cus_email", request.customer_email.clone()),
            (
                "cus_phone",
                request.customer_phone.clone().unwrap_or_default(),
            ),
            ("success_url", request.success_url.clone()),
            ("fail_url", request.fail_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
        ];

        let response = self
            .http_client
            .post(self.config.checkout_endpoint())
            .form(&form)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let http_status = response.status();
        if http_status == reqwest::StatusCode::UNAUTHORIZED
            || http_status == reqwest::StatusCode::FORBIDDEN
        {
            tracing::error!(status = %http_status, "gateway rejected store credentials");
            return Err(PaymentError::authentication(
                "Gateway rejected store credentials",
            ));
        }

        let body: GatewaySessionResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "unparseable gateway response");
            PaymentError::invalid_response(format!("Unparseable gateway response: {}", e))
        })?;

        if !body.status.eq_ignore_ascii_case("success") {
            let reason = body
                .failed_reason
                .unwrap_or_else(|| "no reason given".to_string());
            tracing::warn!(session_id = %request.session_id, reason = %reason, "checkout refused");
            return Err(PaymentError::rejected(reason));
        }

        let redirect_url = body.gateway_page_url.ok_or_else(|| {
            PaymentError::invalid_response("Gateway reported success without a page URL")
        })?;

        Ok(CheckoutRedirect {
            redirect_url,
            gateway_ref: body.session_key,
        })
    }
}
