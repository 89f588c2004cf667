//! Keychain-backed credential store
//!
//! One keychain entry per key under a shared service name. Keychain calls
//! block, so each one runs on the blocking thread pool.
//!
//! ```no_run
//! use sigma_core::CredentialStore;
//! use sigma_infra::storage::KeychainCredentialStore;
//!
//! # async fn example() -> sigma_domain::Result<()> {
//! let store = KeychainCredentialStore::new("Sigma.Finance");
//! store.set("jwt_token", "eyJhbGciOi...").await?;
//! assert!(store.get("jwt_token").await?.is_some());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use keyring::Entry;
use sigma_core::CredentialStore;
use sigma_domain::{Result, SigmaError};
use tracing::debug;

use crate::errors::InfraError;

/// Credential store persisting secrets in the platform keychain
#[derive(Debug, Clone)]
pub struct KeychainCredentialStore {
    service_name: String,
}

impl KeychainCredentialStore {
    /// Create a store for a keychain service (e.g. "Sigma.Finance")
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    async fn with_entry<T, F>(&self, key: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> std::result::Result<T, keyring::Error> + Send + 'static,
    {
        let service = self.service_name.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &key).map_err(InfraError::from)?;
            op(entry).map_err(InfraError::from)
        })
        .await
        .map_err(|e| SigmaError::Internal(format!("keychain task failed: {e}")))?
        .map_err(SigmaError::from)
    }
}

#[async_trait]
impl CredentialStore for KeychainCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        debug!(service = %self.service_name, key, "Reading credential from keychain");
        match self.with_entry(key, |entry| entry.get_password()).await {
            Ok(value) => Ok(Some(value)),
            Err(SigmaError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(service = %self.service_name, key, "Storing credential in keychain");
        let value = value.to_string();
        self.with_entry(key, move |entry| entry.set_password(&value)).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        debug!(service = %self.service_name, key, "Deleting credential from keychain");
        match self.with_entry(key, |entry| entry.delete_credential()).await {
            Ok(()) | Err(SigmaError::NotFound(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_keeps_service_name() {
        let store = KeychainCredentialStore::new("Sigma.Test");
        assert_eq!(store.service_name(), "Sigma.Test");
    }
}
