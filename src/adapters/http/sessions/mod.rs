//! Session HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::SessionHandlers;
pub use routes::session_routes;

pub(crate) use handlers::handle_session_error;
