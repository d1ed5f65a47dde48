//! Adapters - Implementations of the ports against real infrastructure.

pub mod gateway;
pub mod http;
pub mod notify;
pub mod postgres;
pub mod reset_tokens;
