//! Example: Signing in and downloading an account statement
//!
//! Loads the client configuration (environment, `.env`, or a config file),
//! signs in, and saves last month's statement to the current directory.
//!
//! # Setup
//!
//! 1. Point the client at a backend: ```bash export
//!    SIGMA_API_BASE_URL=http://localhost:8080/api ```
//!
//! 2. Provide credentials: ```bash export SIGMA_USERNAME=anna
//!    SIGMA_PASSWORD=secret ```
//!
//! 3. Run this example: ```bash cargo run -p sigma-infra --example
//!    statement_download -- pdf ```

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use sigma_core::{CredentialStore, SessionService};
use sigma_domain::{LoginRequest, StatementFormat, StatementRequest};
use sigma_infra::api::{ApiClient, ApiCommands, ErrorSink};
use sigma_infra::config;
use sigma_infra::storage::{KeychainCredentialStore, MemoryCredentialStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = config::load().context("loading client configuration")?;
    let format: StatementFormat = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pdf".to_string())
        .parse()
        .map_err(anyhow::Error::msg)?;

    // SIGMA_EPHEMERAL=1 keeps tokens out of the OS keychain
    let credentials: Arc<dyn CredentialStore> = if std::env::var("SIGMA_EPHEMERAL").is_ok() {
        Arc::new(MemoryCredentialStore::new())
    } else {
        Arc::new(KeychainCredentialStore::new(config.keychain_service.clone()))
    };

    let sink = ErrorSink::new();
    sink.set_handler(|message| error!(%message, "Request failed"));

    let client = Arc::new(ApiClient::new(config, credentials.clone(), sink)?);
    let commands = Arc::new(ApiCommands::new(client));
    let session = SessionService::new(commands.clone(), credentials);

    let username = std::env::var("SIGMA_USERNAME").context("SIGMA_USERNAME not set")?;
    let password = std::env::var("SIGMA_PASSWORD").context("SIGMA_PASSWORD not set")?;
    session.sign_in(&LoginRequest::new(username, password)).await?;

    let end = Utc::now();
    let request = StatementRequest::for_range(format, end - Duration::days(30), end);
    info!(url = %commands.statement_url(&request)?, "Requesting statement");

    let download = commands.download_statement(&request).await?;
    tokio::fs::write(&download.filename, &download.bytes)
        .await
        .with_context(|| format!("writing {}", download.filename))?;
    info!(
        filename = %download.filename,
        content_type = %download.content_type,
        size = download.len(),
        "Statement saved"
    );

    session.sign_out().await?;
    Ok(())
}
