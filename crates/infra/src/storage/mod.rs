//! Credential store implementations
//!
//! - [`KeychainCredentialStore`]: OS keychain (macOS Keychain, Windows
//!   Credential Manager, Linux Secret Service)
//! - [`MemoryCredentialStore`]: process-local map for ephemeral sessions and
//!   tests

pub mod keychain;
pub mod memory;

pub use keychain::KeychainCredentialStore;
pub use memory::MemoryCredentialStore;
