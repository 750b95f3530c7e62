//! Persisted session store.
//!
//! Single source of truth for "who is logged in". The session survives a full
//! restart by living in a JSON file; a corrupted file is treated as "no
//! session" and removed, never surfaced as a fatal error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ClientResult;
use crate::models::{Role, Session};

/// File-backed session store.
///
/// The store is an explicit value handed to whoever needs the current
/// session, not ambient global state, so tests can run against isolated
/// session files. Reads go back to the file on every call: a login or logout
/// elsewhere in the same profile is visible on the next navigation.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the current session and persist it, effective immediately
    /// for all subsequent gate checks.
    pub fn set(&self, identity: impl Into<String>, role: Role) -> ClientResult<Session> {
        let session = Session::new(identity, role);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::errors::ClientError::Internal(format!("Failed to create session dir: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, json).map_err(|e| {
            crate::errors::ClientError::Internal(format!("Failed to persist session: {}", e))
        })?;
        tracing::info!(identity = %session.identity, role = %session.role.as_str(), "Session persisted");
        Ok(session)
    }

    /// Remove the persisted session; subsequent checks treat the caller as
    /// anonymous.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::info!("Session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove session file: {}", e),
        }
    }

    /// Return the current session, or `None` for an anonymous caller.
    ///
    /// Never fails: a persisted representation that cannot be parsed is
    /// logged, deleted (self-healing), and reported as no session.
    pub fn get(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read session file: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Corrupted session file, clearing it: {}", e);
                self.clear();
                None
            }
        }
    }
}
