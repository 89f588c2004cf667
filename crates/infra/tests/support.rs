use std::sync::Arc;

use parking_lot::Mutex;
use sigma_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use sigma_domain::ClientConfig;
use sigma_infra::api::{ApiClient, ApiCommands, ErrorSink};
use sigma_infra::storage::MemoryCredentialStore;
use wiremock::MockServer;

/// Mock backend plus a client wired to it through an in-memory store and a
/// recording error sink.
pub struct TestBackend {
    pub server: MockServer,
    pub store: MemoryCredentialStore,
    pub sink: ErrorSink,
    pub sink_messages: Arc<Mutex<Vec<String>>>,
}

impl TestBackend {
    /// Start a backend with no stored credentials.
    pub async fn start() -> Self {
        Self::with_entries(&[]).await
    }

    /// Start a backend with an access/refresh token pair already stored.
    pub async fn signed_in(access: &str, refresh: &str) -> Self {
        Self::with_entries(&[(ACCESS_TOKEN_KEY, access), (REFRESH_TOKEN_KEY, refresh)]).await
    }

    pub async fn with_entries(entries: &[(&str, &str)]) -> Self {
        let server = MockServer::start().await;
        let store = MemoryCredentialStore::with_entries(entries.iter().copied());
        let sink = ErrorSink::new();
        let sink_messages = Arc::new(Mutex::new(Vec::new()));
        let recorder = sink_messages.clone();
        sink.set_handler(move |message| recorder.lock().push(message.to_string()));

        Self { server, store, sink, sink_messages }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(format!("{}/api", self.server.uri()))
    }

    pub fn client(&self) -> ApiClient {
        self.client_with(self.config())
    }

    pub fn client_with(&self, config: ClientConfig) -> ApiClient {
        ApiClient::builder()
            .config(config)
            .credentials(Arc::new(self.store.clone()))
            .sink(self.sink.clone())
            .build()
            .expect("api client should build")
    }

    pub fn commands(&self) -> ApiCommands {
        ApiCommands::new(Arc::new(self.client()))
    }

    pub fn sink_messages(&self) -> Vec<String> {
        self.sink_messages.lock().clone()
    }

    /// Number of received requests whose path ends with `suffix`.
    pub async fn hits(&self, suffix: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path().ends_with(suffix))
            .count()
    }
}
