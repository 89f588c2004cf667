//! Banking backend API client
//!
//! # Architecture
//!
//! - `ApiClient` sends every call through the single-attempt `HttpClient`
//! - Bearer tokens come from an `AccessTokenProvider`; a 401 triggers one
//!   refresh through `POST /auth/refresh` and one retry
//! - Failures are normalized into `ApiError` and reported to the injected
//!   `ErrorSink` exactly once
//! - `ApiCommands` wraps each backend endpoint and implements the
//!   `AuthGateway` port for the session service

pub mod auth;
pub mod client;
pub mod commands;
pub mod download;
pub mod errors;
pub mod sink;

pub use auth::{AccessTokenProvider, RefreshError, StoredCredentials};
pub use client::{ApiClient, ApiClientBuilder, RequestOptions};
pub use commands::ApiCommands;
pub use download::{filename_from_disposition, Download};
pub use errors::ApiError;
pub use sink::{user_message, ErrorSink};
