//! Cached console session
//!
//! The backend owns authentication; the console only keeps a local note of
//! who is using it and whether admin actions should be offered. Every
//! mutation is still subject to the server's own checks.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::Role;

/// Locally cached identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            logged_in_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Reads and writes `session.json` in the roster directory
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(roster_dir: &Path) -> Self {
        Self {
            path: roster_dir.join("session.json"),
        }
    }

    /// Load the cached session, if any
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&content).map_err(|e| {
            Error::session(format!(
                "Corrupt session file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove the session file. Succeeds when none exists.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The gate in front of promote, demote and delete
    pub fn require_admin(&self) -> Result<Session> {
        match self.load()? {
            Some(session) if session.is_admin() => Ok(session),
            Some(session) => Err(Error::session(format!(
                "An admin session is required (current role: {})",
                session.role
            ))),
            None => Err(Error::session("Not logged in")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
