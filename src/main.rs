//! MindHarbor API server entry point.
//!
//! Wires configuration, tracing, the PostgreSQL pool, and the adapters
//! into the axum router and serves it.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mindharbor::adapters::gateway::{CheckoutGatewayAdapter, GatewayConfig, MockPaymentGateway};
use mindharbor::adapters::http::{
    api_router, AvailabilityHandlers, PaymentHandlers, SessionHandlers,
};
use mindharbor::adapters::notify::TracingNotifier;
use mindharbor::adapters::postgres::{PostgresSessionRepository, PostgresSlotRepository};
use mindharbor::application::handlers::availability::{
    BookSlotHandler, ListOpenSlotsHandler, PublishSlotsHandler,
};
use mindharbor::application::handlers::payment::{
    CallbackUrls, HandlePaymentCallbackHandler, InitiatePaymentHandler,
};
use mindharbor::application::handlers::session::{
    AttachRecommendationHandler, CompleteSessionHandler, DecideSessionHandler,
    GetSessionHandler, ListSessionsHandler, MarkPaymentCompletedHandler,
    RequestSessionHandler,
};
use mindharbor::config::AppConfig;
use mindharbor::ports::{PaymentGateway, SessionNotifier, SessionRepository, SlotRepository};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.server.log_level.clone()))
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to PostgreSQL");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
    }

    let session_repo: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::new(pool.clone()));
    let slot_repo: Arc<dyn SlotRepository> = Arc::new(PostgresSlotRepository::new(pool));
    let notifier: Arc<dyn SessionNotifier> = Arc::new(TracingNotifier::new());

    let payment_gateway: Arc<dyn PaymentGateway> = if config.payment.use_mock_gateway {
        tracing::warn!("using the mock payment gateway");
        Arc::new(MockPaymentGateway::always_succeeding())
    } else {
        Arc::new(CheckoutGatewayAdapter::new(GatewayConfig::new(
            config.payment.gateway_base_url.clone(),
            config.payment.store_id.clone(),
            config.payment.store_password.clone(),
        )))
    };

    let session_handlers = SessionHandlers::new(
        Arc::new(RequestSessionHandler::new(
            session_repo.clone(),
            notifier.clone(),
        )),
        Arc::new(DecideSessionHandler::new(
            session_repo.clone(),
            notifier.clone(),
        )),
        Arc::new(CompleteSessionHandler::new(
            session_repo.clone(),
            notifier.clone(),
        )),
        Arc::new(AttachRecommendationHandler::new(session_repo.clone())),
        Arc::new(GetSessionHandler::new(session_repo.clone())),
        Arc::new(ListSessionsHandler::new(session_repo.clone())),
    );

    let availability_handlers = AvailabilityHandlers::new(
        Arc::new(PublishSlotsHandler::new(slot_repo.clone())),
        Arc::new(ListOpenSlotsHandler::new(slot_repo.clone())),
        Arc::new(BookSlotHandler::new(slot_repo)),
    );

    let payment_handlers = PaymentHandlers::new(
        Arc::new(InitiatePaymentHandler::new(
            session_repo.clone(),
            payment_gateway,
            CallbackUrls::new(config.payment.public_base_url.clone()),
        )),
        Arc::new(HandlePaymentCallbackHandler::new(Arc::new(
            MarkPaymentCompletedHandler::new(session_repo),
        ))),
        config.payment.dashboard_url.clone(),
    );

    let cors = build_cors_layer(&config.server.cors_origins_list());

    let app = api_router(session_handlers, availability_handlers, payment_handlers)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "mindharbor listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
