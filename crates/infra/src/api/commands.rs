//! API commands for banking operations
//!
//! Typed wrappers over [`ApiClient::request`] for every backend endpoint.
//! Responses other than authentication are returned as raw JSON.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sigma_core::AuthGateway;
use sigma_domain::constants::{
    ACCOUNTS_PATH, AVATAR_PATH, CHECK_PHONE_PATH, LOGIN_PATH, LOGOUT_PATH, PHONE_TRANSFER_PATH,
    PROFILE_PATH, REGISTER_PATH, SELF_TRANSFER_PATH, STATEMENT_DOWNLOAD_PATH,
    TRANSACTIONS_PATH, TRANSACTION_HISTORY_PATH,
};
use sigma_domain::{
    AuthResponse, AvatarUpdate, InternalTransferRequest, LoginRequest, PhoneLookupRequest,
    PhoneTransferRequest, ProfileUpdate, RefreshRequest, RegisterRequest, SigmaError,
    StatementRequest, TransactionFilters,
};
use tracing::{debug, instrument};
use url::form_urlencoded;
use url::Url;
use urlencoding::encode;

use super::client::{ApiClient, RequestOptions};
use super::download::Download;
use super::errors::ApiError;

/// API commands for banking operations
pub struct ApiCommands {
    client: Arc<ApiClient>,
}

impl ApiCommands {
    /// Create a new commands instance
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // === Authentication ===

    /// Create an account; the response carries the first credential pair.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let body = self.client.request(REGISTER_PATH, RequestOptions::post().json(request)?).await?;
        self.auth_response(body)
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let body = self.client.request(LOGIN_PATH, RequestOptions::post().json(request)?).await?;
        self.auth_response(body)
    }

    /// Revoke `refresh_token` server-side.
    ///
    /// Sent without a bearer token and never refreshed. Failures are
    /// returned but never reach the error sink; logout proceeds locally
    /// regardless.
    #[instrument(skip_all)]
    pub async fn logout_remote(&self, refresh_token: &str) -> Result<(), ApiError> {
        let options = RequestOptions::post()
            .json(&RefreshRequest { refresh_token: refresh_token.to_string() })?;
        self.client.request_anonymous(LOGOUT_PATH, options).await?;
        Ok(())
    }

    // === Accounts & profile ===

    #[instrument(skip(self))]
    pub async fn accounts(&self) -> Result<Value, ApiError> {
        self.client.request(ACCOUNTS_PATH, RequestOptions::get()).await
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<Value, ApiError> {
        self.client.request(PROFILE_PATH, RequestOptions::get()).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value, ApiError> {
        self.client.request(PROFILE_PATH, RequestOptions::patch().json(update)?).await
    }

    /// Point the avatar at an already uploaded image.
    #[instrument(skip(self))]
    pub async fn update_avatar(&self, url: &str) -> Result<Value, ApiError> {
        let body = AvatarUpdate { url: url.to_string() };
        self.client.request(AVATAR_PATH, RequestOptions::post().json(&body)?).await
    }

    // === Transfers ===

    /// Look up the accounts registered to a phone number.
    #[instrument(skip(self, phone))]
    pub async fn check_phone(&self, phone: &str) -> Result<Value, ApiError> {
        let body = PhoneLookupRequest { phone: phone.to_string() };
        self.client.request(CHECK_PHONE_PATH, RequestOptions::post().json(&body)?).await
    }

    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn transfer_by_phone(&self, request: &PhoneTransferRequest) -> Result<Value, ApiError> {
        self.client.request(PHONE_TRANSFER_PATH, RequestOptions::post().json(request)?).await
    }

    /// Move money between two of the user's own accounts.
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn internal_transfer(
        &self,
        request: &InternalTransferRequest,
    ) -> Result<Value, ApiError> {
        self.client.request(SELF_TRANSFER_PATH, RequestOptions::post().json(request)?).await
    }

    // === Transactions ===

    #[instrument(skip(self, filters))]
    pub async fn transactions(&self, filters: &TransactionFilters) -> Result<Value, ApiError> {
        let endpoint = with_query(TRANSACTION_HISTORY_PATH, &filters.query_pairs());
        debug!(%endpoint, "Fetching transaction history");
        self.client.request(&endpoint, RequestOptions::get()).await
    }

    #[instrument(skip(self))]
    pub async fn transaction(&self, id: &str) -> Result<Value, ApiError> {
        let endpoint = format!("{}/{}", TRANSACTIONS_PATH, encode(id));
        self.client.request(&endpoint, RequestOptions::get()).await
    }

    // === Statements ===

    /// Absolute statement URL, for handing to an external viewer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the configured base URL is not
    /// a valid URL
    pub fn statement_url(&self, request: &StatementRequest) -> Result<String, ApiError> {
        let mut url = Url::parse(&self.client.config().endpoint_url(STATEMENT_DOWNLOAD_PATH))
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid statement URL: {e}")))?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url.into())
    }

    #[instrument(skip(self, request), fields(format = %request.format))]
    pub async fn download_statement(&self, request: &StatementRequest) -> Result<Download, ApiError> {
        let endpoint = with_query(STATEMENT_DOWNLOAD_PATH, &request.query_pairs());
        let options = RequestOptions::get().header("Accept", request.format.accept());
        self.client.download(&endpoint, options, &request.fallback_filename()).await
    }

    fn auth_response(&self, body: Value) -> Result<AuthResponse, ApiError> {
        AuthResponse::from_value(body).ok_or_else(|| {
            self.client
                .sink()
                .dispatch(ApiError::InvalidRequest("No access token received from server".into()))
        })
    }
}

fn with_query(path: &str, pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish();
    format!("{path}?{query}")
}

#[async_trait]
impl AuthGateway for ApiCommands {
    async fn login(&self, request: &LoginRequest) -> sigma_domain::Result<AuthResponse> {
        Ok(Self::login(self, request).await?)
    }

    async fn register(&self, request: &RegisterRequest) -> sigma_domain::Result<AuthResponse> {
        Ok(Self::register(self, request).await?)
    }

    async fn revoke(&self, refresh_token: &str) -> sigma_domain::Result<()> {
        self.logout_remote(refresh_token).await.map_err(SigmaError::from)
    }

    async fn probe(&self) -> sigma_domain::Result<()> {
        self.accounts().await.map(|_| ()).map_err(SigmaError::from)
    }
}
