//! Session credential
//!
//! The bearer token is handed to the resource client at construction time
//! instead of being read from shared storage on every call. When the server
//! rejects the credential the client forwards that signal, unmodified, to the
//! session's [`AuthFailureHandler`].

use std::fmt;
use std::sync::Arc;

/// Receives the "credential rejected" signal (HTTP 401).
pub trait AuthFailureHandler: Send + Sync {
    fn on_auth_failure(&self);
}

/// Handler that ignores auth failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpAuthFailureHandler;

impl AuthFailureHandler for NoOpAuthFailureHandler {
    fn on_auth_failure(&self) {}
}

#[derive(Clone)]
pub struct Session {
    token: String,
    on_failure: Arc<dyn AuthFailureHandler>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            on_failure: Arc::new(NoOpAuthFailureHandler),
        }
    }

    pub fn with_failure_handler(mut self, handler: Arc<dyn AuthFailureHandler>) -> Self {
        self.on_failure = handler;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn notify_auth_failure(&self) {
        tracing::warn!("Session credential rejected by server");
        self.on_failure.on_auth_failure();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
