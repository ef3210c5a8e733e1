//! Session commands - login, logout and whoami
//!
//! Sessions are a locally stored username and role, nothing more. They gate
//! which actions the CLI offers, the directory server itself does not
//! authenticate requests.

use anyhow::{bail, Result};
use colored::Colorize;
use roster_core::{LogEvent, Role, Session, SessionStore};

use super::{get_logger, get_roster_dir, log_event};
use crate::output;

fn store() -> SessionStore {
    SessionStore::new(&get_roster_dir())
}

pub fn login(username: &str, role: Role) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        bail!("Username cannot be empty");
    }

    let session = Session::new(username, role);
    store().save(&session)?;

    let logger = get_logger();
    log_event(&logger, LogEvent::new("logged_in"));

    output::success(&format!("Logged in as {} ({})", username, role));
    if !session.is_admin() {
        println!(
            "{}",
            "Employee sessions hide the admin actions. Use --role admin to manage users.".dimmed()
        );
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    store().clear()?;

    let logger = get_logger();
    log_event(&logger, LogEvent::new("logged_out"));

    output::success("Logged out");
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    match store().load()? {
        Some(session) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                println!("{} ({})", session.username, session.role);
                println!(
                    "{}",
                    format!("since {}", session.logged_in_at.format("%Y-%m-%d %H:%M")).dimmed()
                );
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                output::info("Not logged in");
            }
        }
    }
    Ok(())
}
