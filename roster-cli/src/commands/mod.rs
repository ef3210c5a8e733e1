//! CLI command implementations

pub mod config;
pub mod delete;
pub mod list;
pub mod logs;
pub mod role;
pub mod session;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use roster_core::{ActivityLog, LogEvent, RosterContext};

/// Get the activity log for CLI operations
///
/// Returns None if the log fails to initialize (logging never blocks a command)
pub fn get_logger() -> Option<ActivityLog> {
    let roster_dir = get_roster_dir();
    std::fs::create_dir_all(&roster_dir).ok()?;
    ActivityLog::new(&roster_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors
pub fn log_event(logger: &Option<ActivityLog>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the roster directory from environment or default
pub fn get_roster_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ROSTER_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".roster")
    }
}

/// Get or create the roster context
///
/// `server` overrides the configured directory server URL for this invocation.
pub fn get_context(server: Option<&str>) -> Result<RosterContext> {
    let roster_dir = get_roster_dir();

    std::fs::create_dir_all(&roster_dir)
        .with_context(|| format!("Failed to create roster directory: {:?}", roster_dir))?;

    RosterContext::new(&roster_dir, server).context("Failed to initialize roster context")
}
