//! API-facing error type
//!
//! Every failure that leaves the API client is one of these. The message is
//! always non-empty and suitable for display.

use serde_json::Value;
use sigma_domain::SigmaError;
use thiserror::Error;

/// API operation errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was received (connection failure, timeout, TLS)
    #[error("{message}")]
    Network { message: String },

    /// The final response had a non-2xx status
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        /// Response body parsed as JSON, `{}` when empty or malformed
        body: Value,
    },

    /// The request could not be built or its body serialized
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Build an HTTP error, taking the message from the body's `message`
    /// field when it is a non-empty string.
    pub fn http(status: u16, body: Value) -> Self {
        let message = body_message(&body)
            .map_or_else(|| format!("Request failed ({status})"), str::to_string);
        Self::Http { status, message, body }
    }

    /// Human-readable description, never empty.
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message } | Self::Http { message, .. } => message,
            Self::InvalidRequest(message) | Self::Config(message) => message,
        }
    }

    /// HTTP status of the final response, if one was received.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed error body for HTTP failures.
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Non-empty string `message` field of an error body.
pub(crate) fn body_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str).filter(|message| !message.is_empty())
}

impl From<SigmaError> for ApiError {
    fn from(err: SigmaError) -> Self {
        match err {
            SigmaError::Network(message) => Self::Network { message },
            SigmaError::Config(message) => Self::Config(message),
            SigmaError::InvalidInput(message) => Self::InvalidRequest(message),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}

impl From<ApiError> for SigmaError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network { message } => Self::Network(message),
            ApiError::Http { status: 401 | 403, message, .. } => Self::Auth(message),
            ApiError::Http { status: 404, message, .. } => Self::NotFound(message),
            ApiError::Http { status: 400..=499, message, .. } => Self::InvalidInput(message),
            ApiError::Http { message, .. } => Self::Network(message),
            ApiError::InvalidRequest(message) => Self::InvalidInput(message),
            ApiError::Config(message) => Self::Config(message),
        }
    }
}
