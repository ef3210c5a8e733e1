//! Status command - check the directory server and show page counts

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use roster_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

pub fn run(json: bool, server: Option<&str>) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_run").with_command("status"));

    let ctx = get_context(server)?;
    let session = ctx.sessions.load().unwrap_or(None);

    let pb = output::spinner("Checking directory server...");
    let status = ctx.directory.status();
    pb.finish_and_clear();

    let server_url = ctx.config.server_url.as_str();

    if json {
        let payload = match &status {
            Ok(s) => serde_json::json!({
                "server": server_url,
                "reachable": true,
                "employeePages": s.employee_pages,
                "adminPages": s.admin_pages,
                "session": &session,
            }),
            Err(e) => serde_json::json!({
                "server": server_url,
                "reachable": false,
                "error": e.to_string(),
                "session": &session,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", "Roster Status".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec!["Server", server_url]);
    match &status {
        Ok(s) => {
            table.add_row(vec![Cell::new("Reachable"), Cell::new("yes").fg(Color::Green)]);
            table.add_row(vec!["Employee pages", &s.employee_pages.to_string()]);
            table.add_row(vec!["Admin pages", &s.admin_pages.to_string()]);
        }
        Err(_) => {
            table.add_row(vec![Cell::new("Reachable"), Cell::new("no").fg(Color::Red)]);
        }
    }

    let session_line = match &session {
        Some(s) => format!("{} ({})", s.username, s.role),
        None => "not logged in".to_string(),
    };
    table.add_row(vec!["Session", &session_line]);

    println!("{}", table);

    if let Err(e) = &status {
        println!();
        println!("{}", e.to_string().dimmed());
    }

    Ok(())
}
