//! # Sigma Core
//!
//! Session logic and port interfaces - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for credential storage and the
//!   authentication backend
//! - The session service that owns the persisted credential pair
//!
//! ## Architecture Principles
//! - Only depends on `sigma-domain`
//! - No HTTP, keychain, or platform code
//! - All external dependencies via traits

pub mod session;

// Infrastructure ports
pub mod credential_ports;

pub use credential_ports::CredentialStore;
pub use session::ports::AuthGateway;
pub use session::{SessionService, SessionState};
