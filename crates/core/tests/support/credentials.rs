//! In-memory `CredentialStore` mock

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sigma_core::CredentialStore;
use sigma_domain::{Result as DomainResult, SigmaError};

/// Map-backed store that can be switched into a failing mode.
#[derive(Default, Clone)]
pub struct MockCredentialStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockCredentialStore {
    /// Seed the store with the given entries.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut values = store.values.lock();
            for (key, value) in entries {
                values.insert((*key).to_string(), (*value).to_string());
            }
        }
        store
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.lock() = true;
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        if *self.fail_reads.lock() {
            return Err(SigmaError::Storage("keychain locked".into()));
        }
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}
