//! Scripted payment gateway for tests and local development.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{CheckoutRedirect, CheckoutRequest, PaymentError, PaymentGateway};

/// What the scripted gateway should do with the next request.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Hand out a checkout page under the given base URL.
    Succeed { page_base_url: String },
    /// Fail as if the network were down.
    NetworkDown,
    /// Refuse the checkout with a reason.
    Reject { reason: String },
}

/// Mock payment gateway recording every request it sees.
pub struct MockPaymentGateway {
    behavior: MockBehavior,
    requests: Mutex<Vec<CheckoutRequest>>,
}

impl MockPaymentGateway {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A gateway that always succeeds, for local development.
    pub fn always_succeeding() -> Self {
        Self::new(MockBehavior::Succeed {
            page_base_url: "https://sandbox.gateway.test/pay".to_string(),
        })
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutRedirect, PaymentError> {
        self.requests.lock().unwrap().push(request.clone());

        match &self.behavior {
            MockBehavior::Succeed { page_base_url } => Ok(CheckoutRedirect {
                redirect_url: format!("{}/{}", page_base_url, request.session_id),
                gateway_ref: Some(format!("mock-{}", request.session_id)),
            }),
            MockBehavior::NetworkDown => Err(PaymentError::network("connection refused")),
            MockBehavior::Reject { reason } => Err(PaymentError::rejected(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            session_id: SessionId::new(),
            amount: 1500.0,
            currency: "BDT".to_string(),
            customer_name: "Sam".to_string(),
            customer_email: "sam@example.com".to_string(),
            customer_phone: None,
            success_url: "https://api.test/s".to_string(),
            fail_url: "https://api.test/f".to_string(),
            cancel_url: "https://api.test/c".to_string(),
        }
    }

    #[tokio::test]
    async fn succeeding_gateway_embeds_the_session_id() {
        let gateway = MockPaymentGateway::always_succeeding();
        let req = request();
        let session_id = req.session_id;

        let redirect = gateway.create_checkout(req).await.unwrap();

        assert!(redirect.redirect_url.contains(&session_id.to_string()));
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn network_down_gateway_fails_retryably() {
        let gateway = MockPaymentGateway::new(MockBehavior::NetworkDown);
        let err = gateway.create_checkout(request()).await.unwrap_err();
        assert!(err.retryable);
    }

    #[tokio::test]
    async fn rejecting_gateway_reports_the_reason() {
        let gateway = MockPaymentGateway::new(MockBehavior::Reject {
            reason: "store deactivated".to_string(),
        });
        let err = gateway.create_checkout(request()).await.unwrap_err();
        assert!(!err.retryable);
        assert!(err.message.contains("store deactivated"));
    }
}
