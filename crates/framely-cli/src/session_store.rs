//! On-disk session token.
//!
//! `framely login` writes the bearer token to a file; every other command
//! reads it back. The store doubles as the session's auth-failure handler, so
//! a 401 from any call removes the stale token.

use anyhow::Context;
use framely_core::{AuthFailureHandler, Session};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token, or `None` when nobody is logged in.
    pub fn load(&self) -> anyhow::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Read token file {}", self.path.display())),
        }
    }

    pub fn save(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Create directory {}", parent.display()))?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("Write token file {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Restrict permissions of {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Remove the token. Returns whether one was stored.
    pub fn clear(&self) -> anyhow::Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Remove token file {}", self.path.display())),
        }
    }

    /// Session for the stored token, wired to clear the store on a 401.
    pub fn session(self: &Arc<Self>) -> anyhow::Result<Option<Session>> {
        let handler: Arc<dyn AuthFailureHandler> = self.clone();
        Ok(self
            .load()?
            .map(|token| Session::new(token).with_failure_handler(handler)))
    }
}

impl AuthFailureHandler for TokenStore {
    fn on_auth_failure(&self) {
        match self.clear() {
            Ok(_) => tracing::info!(path = %self.path.display(), "Cleared rejected session token"),
            Err(e) => tracing::warn!(error = %e, "Failed to clear rejected session token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("token"));

        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));

        assert!(store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_blank_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(TokenStore::new(path).load().unwrap(), None);
    }

    #[test]
    fn test_auth_failure_clears_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(TokenStore::new(dir.path().join("token")));
        store.save("stale").unwrap();

        let session = store.session().unwrap().unwrap();
        assert_eq!(session.token(), "stale");

        session.notify_auth_failure();
        assert_eq!(store.load().unwrap(), None);
        assert!(store.session().unwrap().is_none());
    }
}
