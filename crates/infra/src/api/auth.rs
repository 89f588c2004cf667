//! Access token provisioning and refresh
//!
//! The API client asks an [`AccessTokenProvider`] for the bearer token before
//! each call and, when the backend rejects it with 401, for a single refresh.
//! [`StoredCredentials`] is the production provider: tokens live in the
//! injected credential store and are renewed through `POST /auth/refresh`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use sigma_core::CredentialStore;
use sigma_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_PATH, REFRESH_TOKEN_KEY};
use sigma_domain::{ClientConfig, RefreshRequest, RefreshResponse, SigmaError};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::http::HttpClient;

/// Why a refresh attempt did not produce a new access token
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("no refresh token stored")]
    MissingRefreshToken,

    #[error("refresh rejected with status {0}")]
    Rejected(u16),

    #[error("refresh response carried no access token")]
    MissingAccessToken,

    #[error("refresh request failed: {0}")]
    Transport(SigmaError),

    #[error("could not persist refreshed tokens: {0}")]
    Storage(SigmaError),
}

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current access token, `None` when signed out or unreadable.
    async fn access_token(&self) -> Option<String>;

    /// Obtain a replacement for `rejected`, which the backend answered with
    /// 401.
    async fn refresh(&self, rejected: &str) -> Result<String, RefreshError>;
}

/// Token provider backed by a [`CredentialStore`]
pub struct StoredCredentials {
    credentials: Arc<dyn CredentialStore>,
    http: HttpClient,
    refresh_url: String,
    coalesce: bool,
    gate: Mutex<()>,
}

impl StoredCredentials {
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>, http: HttpClient) -> Self {
        Self {
            credentials,
            http,
            refresh_url: config.endpoint_url(REFRESH_PATH),
            coalesce: config.coalesce_refresh,
            gate: Mutex::new(()),
        }
    }

    async fn stored(&self, key: &str) -> Option<String> {
        match self.credentials.get(key).await {
            Ok(value) => value.filter(|value| !value.is_empty()),
            Err(err) => {
                warn!(key, error = %err, "Failed to read credential; treating as absent");
                None
            }
        }
    }

    async fn exchange(&self) -> Result<String, RefreshError> {
        let refresh_token =
            self.stored(REFRESH_TOKEN_KEY).await.ok_or(RefreshError::MissingRefreshToken)?;

        let request = self
            .http
            .request(Method::POST, &self.refresh_url)
            .json(&RefreshRequest { refresh_token });
        let response = self.http.send(request).await.map_err(RefreshError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::Rejected(status.as_u16()));
        }

        let text = response.text().await.unwrap_or_default();
        let tokens: RefreshResponse = serde_json::from_str(&text).unwrap_or_default();
        let access_token = tokens
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(RefreshError::MissingAccessToken)?;

        self.credentials
            .set(ACCESS_TOKEN_KEY, &access_token)
            .await
            .map_err(RefreshError::Storage)?;

        if let Some(rotated) = tokens.refresh_token.filter(|token| !token.is_empty()) {
            self.credentials
                .set(REFRESH_TOKEN_KEY, &rotated)
                .await
                .map_err(RefreshError::Storage)?;
            debug!("Stored rotated refresh token");
        }

        Ok(access_token)
    }
}

#[async_trait]
impl AccessTokenProvider for StoredCredentials {
    async fn access_token(&self) -> Option<String> {
        self.stored(ACCESS_TOKEN_KEY).await
    }

    #[instrument(skip_all, fields(coalesce = self.coalesce))]
    async fn refresh(&self, rejected: &str) -> Result<String, RefreshError> {
        let _guard = if self.coalesce { Some(self.gate.lock().await) } else { None };

        if self.coalesce {
            if let Some(current) = self.stored(ACCESS_TOKEN_KEY).await {
                if current != rejected {
                    debug!("Access token already refreshed by a concurrent request");
                    return Ok(current);
                }
            }
        }

        let token = self.exchange().await?;
        info!("Access token refreshed");
        Ok(token)
    }
}
