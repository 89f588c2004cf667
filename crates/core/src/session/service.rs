//! Session service - owns the persisted credential pair and user

use std::sync::Arc;

use serde_json::Value;
use sigma_domain::constants::{
    ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, USER_DATA_KEY, USER_ID_KEY,
};
use sigma_domain::{AuthResponse, LoginRequest, RegisterRequest, Result};
use tracing::{debug, info, warn};

use super::ports::AuthGateway;
use crate::credential_ports::CredentialStore;

/// Outcome of validating a stored session at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    SignedOut,
}

/// Session service
pub struct SessionService {
    gateway: Arc<dyn AuthGateway>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionService {
    /// Create a new session service
    pub fn new(gateway: Arc<dyn AuthGateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { gateway, credentials }
    }

    /// Log in and persist the returned credentials
    pub async fn sign_in(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let auth = self.gateway.login(request).await?;
        self.persist(&auth).await?;
        info!(username = %request.username, "Signed in");
        Ok(auth)
    }

    /// Register and persist the returned credentials
    pub async fn sign_up(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let auth = self.gateway.register(request).await?;
        self.persist(&auth).await?;
        info!(username = %request.username, "Registered and signed in");
        Ok(auth)
    }

    /// Revoke the refresh token (best effort) and clear every session key.
    pub async fn sign_out(&self) -> Result<()> {
        match self.credentials.get(REFRESH_TOKEN_KEY).await {
            Ok(Some(refresh_token)) => {
                if let Err(err) = self.gateway.revoke(&refresh_token).await {
                    warn!(error = %err, "Remote logout failed; clearing local session anyway");
                }
            }
            Ok(None) => debug!("No refresh token stored; skipping remote logout"),
            Err(err) => warn!(error = %err, "Could not read refresh token for remote logout"),
        }

        self.credentials.remove_all(&SESSION_KEYS).await?;
        info!("Signed out");
        Ok(())
    }

    /// Decide whether a stored session is still usable.
    ///
    /// A stored access token is probed against the backend; a rejected probe
    /// clears the session.
    pub async fn restore(&self) -> Result<SessionState> {
        if self.credentials.get(ACCESS_TOKEN_KEY).await?.is_none() {
            debug!("No stored access token");
            return Ok(SessionState::SignedOut);
        }

        match self.gateway.probe().await {
            Ok(()) => Ok(SessionState::Authenticated),
            Err(err) => {
                warn!(error = %err, "Stored session rejected; clearing credentials");
                self.credentials.remove_all(&SESSION_KEYS).await?;
                Ok(SessionState::SignedOut)
            }
        }
    }

    /// The user object saved at sign-in, if any
    pub async fn current_user(&self) -> Result<Option<Value>> {
        let Some(raw) = self.credentials.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!(error = %err, "Stored user data is not valid JSON");
                Ok(None)
            }
        }
    }

    async fn persist(&self, auth: &AuthResponse) -> Result<()> {
        self.credentials.set(ACCESS_TOKEN_KEY, &auth.access_token).await?;

        // A pair without a refresh token must not keep a previous user's one
        match auth.refresh_token.as_deref() {
            Some(refresh_token) => self.credentials.set(REFRESH_TOKEN_KEY, refresh_token).await?,
            None => self.credentials.remove(REFRESH_TOKEN_KEY).await?,
        }

        if let (Some(user_id), Some(user)) = (auth.user_id(), auth.user.as_ref()) {
            self.credentials.set(USER_ID_KEY, &user_id).await?;
            self.credentials.set(USER_DATA_KEY, &user.to_string()).await?;
        }

        Ok(())
    }
}
