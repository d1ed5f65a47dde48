//! Payment handlers: checkout initiation and gateway callbacks.

mod handle_payment_callback;
mod initiate_payment;

pub use handle_payment_callback::{
    CallbackOutcome, HandlePaymentCallbackHandler, PaymentCallbackCommand,
};
pub use initiate_payment::{CallbackUrls, InitiatePaymentCommand, InitiatePaymentHandler};
