//! Credential store port.
//!
//! A small string key-value store for the session secrets (access token,
//! refresh token, user id and serialized user). Implementations live in
//! `sigma-infra::storage`: the OS keychain for persistent sessions and an
//! in-memory map for ephemeral sessions and tests.
//!
//! # Example
//!
//! ```no_run
//! use sigma_core::CredentialStore;
//! use sigma_domain::constants::ACCESS_TOKEN_KEY;
//!
//! async fn is_signed_in(store: &dyn CredentialStore) -> bool {
//!     matches!(store.get(ACCESS_TOKEN_KEY).await, Ok(Some(_)))
//! }
//! ```

use async_trait::async_trait;
use sigma_domain::Result;

/// Port for reading and writing session secrets.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove several values, stopping at the first failure.
    async fn remove_all(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
