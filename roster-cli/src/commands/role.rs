//! Promote and demote commands - flip a user's role

use anyhow::Result;
use roster_core::{LogEvent, Scope};

use super::{get_context, get_logger, log_event};
use crate::output;

/// Promote runs against the employee scope, demote against the admin scope.
/// The scope carries the endpoint and all user-facing wording.
pub fn run(scope: Scope, email: &str, json: bool, server: Option<&str>) -> Result<()> {
    let logger = get_logger();
    log_event(
        &logger,
        LogEvent::new("command_run").with_command(scope.toggle_verb()),
    );

    let ctx = get_context(server)?;
    ctx.sessions.require_admin()?;

    let pb = output::spinner(&format!("Updating role for {}...", email));
    let result = ctx.directory.toggle_role(scope, email);
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            log_event(&logger, LogEvent::new("role_toggled").with_view(scope.as_str()));
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "email": email,
                        "action": scope.toggle_verb(),
                        "ok": true
                    })
                );
            } else {
                output::success(&format!("User {} {}", email, scope.toggle_done_message()));
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("role_toggle_failed")
                    .with_view(scope.as_str())
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}
