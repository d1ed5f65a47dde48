//! InitiatePaymentHandler - start a gateway checkout for a session fee.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::SessionError;
use crate::ports::{CheckoutRedirect, CheckoutRequest, PaymentGateway, SessionRepository};

/// Billing details collected from the payer.
#[derive(Debug, Clone)]
pub struct InitiatePaymentCommand {
    pub session_id: SessionId,
    pub amount: f64,
    pub currency: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
}

/// Callback URLs the gateway will hit, derived from the public base URL.
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    public_base_url: String,
}

impl CallbackUrls {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        let mut base = public_base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            public_base_url: base,
        }
    }

    pub fn success(&self, id: &SessionId) -> String {
        format!("{}/api/payments/{}/success", self.public_base_url, id)
    }

    pub fn fail(&self, id: &SessionId) -> String {
        format!("{}/api/payments/{}/fail", self.public_base_url, id)
    }

    pub fn cancel(&self, id: &SessionId) -> String {
        format!("{}/api/payments/{}/cancel", self.public_base_url, id)
    }
}

/// Handler for payment initiation.
///
/// Paying only makes sense for an approved online session whose payment is
/// still pending; those guards live on the aggregate. Re-initiating while
/// pending is allowed - the payer may abandon a checkout and start over,
/// and the callback path absorbs duplicate confirmations.
///
/// The gateway is treated as unreliable: any failure here surfaces as a
/// gateway error with no state written anywhere.
pub struct InitiatePaymentHandler {
    repository: Arc<dyn SessionRepository>,
    gateway: Arc<dyn PaymentGateway>,
    urls: CallbackUrls,
}

impl InitiatePaymentHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        gateway: Arc<dyn PaymentGateway>,
        urls: CallbackUrls,
    ) -> Self {
        Self {
            repository,
            gateway,
            urls,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiatePaymentCommand,
        metadata: CommandMetadata,
    ) -> Result<CheckoutRedirect, SessionError> {
        if !(cmd.amount > 0.0) {
            return Err(SessionError::validation(
                "amount",
                "Amount must be positive",
            ));
        }

        let session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        session.ensure_payment_initiable()?;

        let request = CheckoutRequest {
            session_id: cmd.session_id,
            amount: cmd.amount,
            currency: cmd.currency,
            customer_name: cmd.customer_name,
            customer_email: cmd.customer_email,
            customer_phone: cmd.customer_phone,
            success_url: self.urls.success(&cmd.session_id),
            fail_url: self.urls.fail(&cmd.session_id),
            cancel_url: self.urls.cancel(&cmd.session_id),
        };

        let redirect = self.gateway.create_checkout(request).await.map_err(|e| {
            tracing::error!(
                session_id = %cmd.session_id,
                error = %e,
                correlation_id = %metadata.correlation_id(),
                "gateway checkout failed"
            );
            SessionError::payment_gateway(e.message)
        })?;

        tracing::info!(
            session_id = %cmd.session_id,
            correlation_id = %metadata.correlation_id(),
            "checkout created"
        );

        Ok(redirect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{MockGateway, MockSessionRepository};
    use crate::domain::foundation::{
        AttendeeRef, PaymentStatus, ProfessionalRef, SessionType, Timestamp,
    };
    use crate::domain::session::Session;

    fn approved_online_session() -> Session {
        let mut session = Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Online,
            Timestamp::now(),
        );
        session.approve(Timestamp::now().plus_days(1)).unwrap();
        session
    }

    fn cmd(session_id: SessionId) -> InitiatePaymentCommand {
        InitiatePaymentCommand {
            session_id,
            amount: 1500.0,
            currency: "BDT".to_string(),
            customer_name: "Sam".to_string(),
            customer_email: "sam@example.com".to_string(),
            customer_phone: None,
        }
    }

    fn urls() -> CallbackUrls {
        CallbackUrls::new("https://api.mindharbor.example/")
    }

    #[tokio::test]
    async fn returns_the_gateway_redirect() {
        let session = approved_online_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let gateway = Arc::new(MockGateway::succeeding());

        let handler = InitiatePaymentHandler::new(repo, gateway.clone(), urls());
        let redirect = handler
            .handle(cmd(id), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert!(redirect.redirect_url.contains(&id.to_string()));
        let seen = gateway.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].success_url,
            format!("https://api.mindharbor.example/api/payments/{}/success", id)
        );
        assert_eq!(
            seen[0].cancel_url,
            format!("https://api.mindharbor.example/api/payments/{}/cancel", id)
        );
    }

    #[tokio::test]
    async fn gateway_failure_surfaces_without_state_change() {
        let session = approved_online_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let gateway = Arc::new(MockGateway::failing());

        let handler = InitiatePaymentHandler::new(repo.clone(), gateway, urls());
        let result = handler.handle(cmd(id), CommandMetadata::test_fixture()).await;

        assert!(matches!(result, Err(SessionError::PaymentGateway(_))));
        assert_eq!(
            repo.get(&id).unwrap().payment_status(),
            PaymentStatus::Pending
        );
    }

    #[tokio::test]
    async fn pending_session_cannot_start_payment() {
        let session = Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Online,
            Timestamp::now(),
        );
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let gateway = Arc::new(MockGateway::succeeding());

        let handler = InitiatePaymentHandler::new(repo, gateway.clone(), urls());
        let result = handler.handle(cmd(id), CommandMetadata::test_fixture()).await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
        assert!(gateway.seen().is_empty());
    }

    #[tokio::test]
    async fn offline_session_cannot_start_payment() {
        let mut session = Session::request(
            SessionId::new(),
            AttendeeRef::new("sam@example.com").unwrap(),
            ProfessionalRef::new("dr.lee@clinic.org").unwrap(),
            SessionType::Offline,
            Timestamp::now(),
        );
        session.approve(Timestamp::now()).unwrap();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));

        let handler =
            InitiatePaymentHandler::new(repo, Arc::new(MockGateway::succeeding()), urls());
        let result = handler.handle(cmd(id), CommandMetadata::test_fixture()).await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }

    #[tokio::test]
    async fn reinitiation_while_pending_is_allowed() {
        let session = approved_online_session();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let gateway = Arc::new(MockGateway::succeeding());

        let handler = InitiatePaymentHandler::new(repo, gateway.clone(), urls());
        handler
            .handle(cmd(id), CommandMetadata::test_fixture())
            .await
            .unwrap();
        handler
            .handle(cmd(id), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(gateway.seen().len(), 2);
    }

    #[tokio::test]
    async fn completed_payment_cannot_be_charged_again() {
        let mut session = approved_online_session();
        session.record_payment_success();
        let id = *session.id();
        let repo = Arc::new(MockSessionRepository::with_session(session));

        let handler =
            InitiatePaymentHandler::new(repo, Arc::new(MockGateway::succeeding()), urls());
        let result = handler.handle(cmd(id), CommandMetadata::test_fixture()).await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let handler = InitiatePaymentHandler::new(
            Arc::new(MockSessionRepository::new()),
            Arc::new(MockGateway::succeeding()),
            urls(),
        );

        let result = handler
            .handle(
                InitiatePaymentCommand {
                    amount: 0.0,
                    ..cmd(SessionId::new())
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(
            result,
            Err(SessionError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn callback_urls_trim_trailing_slashes() {
        let urls = CallbackUrls::new("https://api.test///");
        let id = SessionId::new();
        assert_eq!(
            urls.fail(&id),
            format!("https://api.test/api/payments/{}/fail", id)
        );
    }
}
