//! # Sigma Domain
//!
//! Domain types shared by the Sigma Finance client crates.
//!
//! This crate contains:
//! - The domain error type and `Result` alias
//! - Client configuration structures
//! - Credential storage keys and backend endpoint paths
//! - Request DTOs for authentication, transfers, transactions and statements
//!
//! ## Architecture
//! - No dependencies on other Sigma crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
