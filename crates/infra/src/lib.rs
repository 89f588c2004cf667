//! # Sigma Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The authenticated API client, error sink and resource commands
//! - The HTTP transport
//! - Credential stores (OS keychain, in-memory)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `sigma-core`
//! - Depends on `sigma-domain` and `sigma-core`
//! - Contains all "impure" code (network, keychain, filesystem)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiCommands, ApiError, Download, ErrorSink, RequestOptions};
pub use errors::InfraError;
pub use http::HttpClient;
pub use storage::{KeychainCredentialStore, MemoryCredentialStore};
