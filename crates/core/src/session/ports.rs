//! Port interfaces for the authentication backend
//!
//! The session service talks to the backend only through this trait so it
//! can be tested without HTTP.

use async_trait::async_trait;
use sigma_domain::{AuthResponse, LoginRequest, RegisterRequest, Result};

/// Authentication endpoints the session service depends on
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange username and password for a credential pair
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    /// Create an account and receive its first credential pair
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;

    /// Revoke a refresh token server-side
    async fn revoke(&self, refresh_token: &str) -> Result<()>;

    /// Cheap authenticated call used to validate a stored session
    async fn probe(&self) -> Result<()>;
}
