//! Error sink
//!
//! A single registered handler receives a short user-facing message for every
//! failed API call. The sink is injected into the client and cheap to clone;
//! all clones share the same handler slot.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::errors::ApiError;

type Handler = Arc<dyn Fn(&str) + Send + Sync>;

/// Shared slot holding at most one error handler
#[derive(Clone, Default)]
pub struct ErrorSink {
    handler: Arc<RwLock<Option<Handler>>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler, replacing any previous one.
    pub fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.handler.write() = Some(Arc::new(handler));
    }

    pub fn clear_handler(&self) {
        *self.handler.write() = None;
    }

    pub fn has_handler(&self) -> bool {
        self.handler.read().is_some()
    }

    /// Deliver the user-facing message of `err` to the current handler (if
    /// any) and hand the error back for propagation.
    pub fn dispatch(&self, err: ApiError) -> ApiError {
        // Clone out so the handler may re-register without deadlocking
        let handler = self.handler.read().clone();
        match handler {
            Some(handler) => handler(&user_message(&err)),
            None => debug!(error = %err, "No error handler registered"),
        }
        err
    }
}

impl fmt::Debug for ErrorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorSink").field("has_handler", &self.has_handler()).finish()
    }
}

/// Short message suitable for showing to the user.
pub fn user_message(err: &ApiError) -> String {
    let direct = err.message();
    if !direct.is_empty() {
        return direct.to_string();
    }

    if let Some(message) = err.body().and_then(super::errors::body_message) {
        return message.to_string();
    }

    let by_status = match err.status() {
        Some(400) => Some("Bad request"),
        Some(401) => Some("Authorization required"),
        Some(403) => Some("Access denied"),
        Some(404) => Some("Resource not found"),
        Some(500) => Some("Internal server error"),
        _ => None,
    };
    if let Some(message) = by_status {
        return message.to_string();
    }

    if err.is_network() {
        return "Network error. Check your internet connection".to_string();
    }

    "Something went wrong".to_string()
}
