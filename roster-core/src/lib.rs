//! Roster Core - client logic for the staff directory console
//!
//! This crate implements the console's core logic following hexagonal
//! architecture:
//!
//! - **domain**: core entities (StaffMember, Role, Scope, errors)
//! - **ports**: trait definitions for external dependencies (DirectoryProvider)
//! - **services**: view logic, session cache, activity log
//! - **adapters**: concrete implementations (directory REST client)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

// Re-export commonly used types at crate root
pub use adapters::rest::DirectoryClient;
pub use config::{Config, DEFAULT_SERVER_URL};
pub use domain::result::Error;
pub use domain::{Role, Scope, StaffMember};
pub use services::{
    ActivityLog, DirectoryService, DirectoryStatus, DirectoryView, LogEntry, LogEvent, PageView,
    Session, SessionStore,
};

/// Main context for console operations
///
/// This is the primary entry point: it holds the configuration, the
/// directory service talking to the configured server, and the session
/// store. The CLI builds one per invocation.
pub struct RosterContext {
    pub config: Config,
    pub directory: DirectoryService,
    pub sessions: SessionStore,
}

impl RosterContext {
    /// Create a new roster context
    ///
    /// `server_override` (the --server flag or its environment fallback)
    /// wins over the configured server URL.
    pub fn new(roster_dir: &Path, server_override: Option<&str>) -> anyhow::Result<Self> {
        let mut config = Config::load(roster_dir)?;
        if let Some(server) = server_override {
            config.server_url = server.to_string();
        }

        let client = Arc::new(DirectoryClient::new(&config.server_url)?);
        let directory = DirectoryService::new(client);
        let sessions = SessionStore::new(roster_dir);

        Ok(Self {
            config,
            directory,
            sessions,
        })
    }
}
