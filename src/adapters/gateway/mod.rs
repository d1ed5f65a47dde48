//! Payment gateway adapters.

mod checkout_adapter;
mod mock_gateway;

pub use checkout_adapter::{CheckoutGatewayAdapter, GatewayConfig};
pub use mock_gateway::{MockBehavior, MockPaymentGateway};
