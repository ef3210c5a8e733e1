//! Delete command - remove a user and all their data

use anyhow::{bail, Result};
use colored::Colorize;
use roster_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

pub fn run(email: &str, force: bool, json: bool, server: Option<&str>) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_run").with_command("delete"));

    let ctx = get_context(server)?;
    ctx.sessions.require_admin()?;

    match output::confirm_policy(force, json) {
        output::ConfirmPolicy::Skip => {}
        output::ConfirmPolicy::Refuse => {
            bail!("Deleting needs confirmation and --json cannot prompt; pass --force");
        }
        output::ConfirmPolicy::Prompt => {
            println!(
                "\n{}",
                format!("This will delete '{}' from the directory.", email).yellow()
            );
            println!("{}\n", "All data for that user is removed.".dimmed());

            if !output::confirm("Are you sure?")? {
                println!("{}\n", "Cancelled".dimmed());
                return Ok(());
            }
        }
    }

    let pb = output::spinner(&format!("Deleting {}...", email));
    let result = ctx.directory.delete_user(email);
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            log_event(&logger, LogEvent::new("user_deleted"));
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "email": email,
                        "deleted": true
                    })
                );
            } else {
                output::success(&format!("Deleted {}", email));
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("user_delete_failed").with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}
