//! Session lifecycle: sign-in, sign-up, sign-out and startup restore

pub mod ports;
pub mod service;

pub use ports::AuthGateway;
pub use service::{SessionService, SessionState};
