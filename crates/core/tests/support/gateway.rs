//! Scripted `AuthGateway` mock

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sigma_core::AuthGateway;
use sigma_domain::{AuthResponse, LoginRequest, RegisterRequest, Result as DomainResult, SigmaError};

/// Gateway returning a fixed auth response and recording revocations.
#[derive(Clone)]
pub struct MockAuthGateway {
    auth: Option<AuthResponse>,
    probe_ok: bool,
    revoke_ok: bool,
    revoked: Arc<Mutex<Vec<String>>>,
}

impl MockAuthGateway {
    /// Gateway whose login/register succeed with `auth`.
    pub fn accepting(auth: AuthResponse) -> Self {
        Self { auth: Some(auth), probe_ok: true, revoke_ok: true, revoked: Arc::default() }
    }

    /// Gateway whose every call fails with an auth error.
    pub fn rejecting() -> Self {
        Self { auth: None, probe_ok: false, revoke_ok: false, revoked: Arc::default() }
    }

    pub fn with_probe(mut self, ok: bool) -> Self {
        self.probe_ok = ok;
        self
    }

    pub fn revoked(&self) -> Vec<String> {
        self.revoked.lock().clone()
    }

    fn auth(&self) -> DomainResult<AuthResponse> {
        self.auth.clone().ok_or_else(|| SigmaError::Auth("Invalid credentials".into()))
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn login(&self, _request: &LoginRequest) -> DomainResult<AuthResponse> {
        self.auth()
    }

    async fn register(&self, _request: &RegisterRequest) -> DomainResult<AuthResponse> {
        self.auth()
    }

    async fn revoke(&self, refresh_token: &str) -> DomainResult<()> {
        self.revoked.lock().push(refresh_token.to_string());
        if self.revoke_ok {
            Ok(())
        } else {
            Err(SigmaError::Network("connection reset".into()))
        }
    }

    async fn probe(&self) -> DomainResult<()> {
        if self.probe_ok {
            Ok(())
        } else {
            Err(SigmaError::Auth("Authorization required".into()))
        }
    }
}
