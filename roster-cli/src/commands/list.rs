//! List command - browse the employee and admin directories

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use roster_core::{DirectoryView, LogEvent, PageView, Scope};

use super::{get_context, get_logger, log_event};
use crate::output;

pub fn run(
    scope: Scope,
    page: Option<u64>,
    search: Option<&str>,
    json: bool,
    server: Option<&str>,
) -> Result<()> {
    let logger = get_logger();
    log_event(
        &logger,
        LogEvent::new("view_opened").with_view(scope.as_str()),
    );

    let interactive = page.is_none()
        && search.is_none()
        && !json
        && atty::is(atty::Stream::Stdin)
        && atty::is(atty::Stream::Stdout);

    if interactive {
        browse(scope, server, &logger)
    } else {
        one_shot(scope, page, search, json, server)
    }
}

/// Print a single page or search result and exit
fn one_shot(
    scope: Scope,
    page: Option<u64>,
    search: Option<&str>,
    json: bool,
    server: Option<&str>,
) -> Result<()> {
    let ctx = get_context(server)?;

    let pb = output::spinner("Fetching directory...");
    let result = match search {
        Some(query) => ctx.directory.search_view(scope, query),
        None => ctx.directory.page_view(scope, page.unwrap_or(1)),
    };
    pb.finish_and_clear();
    let view = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    render(&view);
    Ok(())
}

/// Render a page of the directory as a table
fn render(view: &PageView) {
    if let Some(query) = &view.query {
        println!("{}", format!("Results for \"{}\"", query).dimmed());
    }

    if view.is_empty() {
        println!("{}", view.scope.empty_message());
        return;
    }

    let mut table = output::create_table();
    table.set_header(vec!["Username", "Email", "Role"]);
    for member in &view.rows {
        table.add_row(vec![
            member.username.as_str(),
            member.email.as_str(),
            member.role.as_str(),
        ]);
    }
    println!("{}", table);

    // Search results are a flat list, the page footer only applies when paging
    if !view.is_search() {
        let mut hints = Vec::new();
        if view.has_prev() {
            hints.push(format!("--page {}", view.page - 1));
        }
        if view.has_next() {
            hints.push(format!("--page {}", view.page + 1));
        }

        let mut footer = format!("Page {} of {}", view.page, view.total_pages);
        if !hints.is_empty() {
            footer = format!("{} ({})", footer, hints.join(", "));
        }
        println!("{}", footer.dimmed());
    }
}

/// Interactive browse loop for a terminal session
fn browse(
    scope: Scope,
    server: Option<&str>,
    logger: &Option<roster_core::ActivityLog>,
) -> Result<()> {
    let ctx = get_context(server)?;

    // The toggle and delete commands only appear for a locally stored admin
    // session. The server enforces nothing here, this mirrors the hidden
    // buttons in the web console.
    let admin = matches!(ctx.sessions.load(), Ok(Some(ref s)) if s.is_admin());

    let mut view = ctx.directory.browse(scope)?;

    println!("{}", format!("Roster - {}", scope.as_str()).bold());

    loop {
        println!();
        render(&view.snapshot());
        println!(
            "{}",
            "[n]ext  [p]rev  [g]o <page>  [s]earch <text>  [c]lear  [r]efresh  [q]uit".dimmed()
        );
        if admin {
            println!(
                "{}",
                format!(
                    "[a] <email>  {}   [d] <email>  delete",
                    scope.toggle_label().to_lowercase()
                )
                .dimmed()
            );
        }

        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;

        let result = match parse_action(&line) {
            BrowseAction::Next => view.next_page(),
            BrowseAction::Prev => view.prev_page(),
            BrowseAction::Goto(page) => view.goto(page),
            BrowseAction::Search(query) => view.set_search(&query),
            BrowseAction::Clear => view.clear_search(),
            BrowseAction::Refresh => view.refresh(),
            BrowseAction::Toggle(email) => {
                if !admin {
                    output::warning("An admin session is required for role changes.");
                    continue;
                }
                toggle(&mut view, &email, logger);
                continue;
            }
            BrowseAction::Delete(email) => {
                if !admin {
                    output::warning("An admin session is required to delete users.");
                    continue;
                }
                delete(&mut view, &email, logger)?;
                continue;
            }
            BrowseAction::Quit => break,
            BrowseAction::Empty => continue,
            BrowseAction::Unknown => {
                output::warning("Unknown command. Try n, p, g 2, s alice, c, r or q.");
                continue;
            }
        };

        // A failed action keeps the session alive
        if let Err(e) = result {
            output::error(&e.to_string());
        }
    }

    Ok(())
}

fn toggle(view: &mut DirectoryView, email: &str, logger: &Option<roster_core::ActivityLog>) {
    let scope = view.scope();
    match view.toggle_role(email) {
        Ok(()) => {
            log_event(logger, LogEvent::new("role_toggled").with_view(scope.as_str()));
            output::success(&format!("User {} {}", email, scope.toggle_done_message()));
        }
        Err(e) => {
            log_event(
                logger,
                LogEvent::new("role_toggle_failed")
                    .with_view(scope.as_str())
                    .with_error(e.to_string()),
            );
            output::error(&e.to_string());
        }
    }
}

/// Run the two-step delete: mark, confirm at the prompt, then send
fn delete(
    view: &mut DirectoryView,
    email: &str,
    logger: &Option<roster_core::ActivityLog>,
) -> Result<()> {
    let scope = view.scope();
    if let Err(e) = view.mark_for_delete(email) {
        output::error(&e.to_string());
        return Ok(());
    }

    let prompt = format!(
        "Are you sure you want to delete the {}: {}?",
        scope.entity_name(),
        email
    );
    if !output::confirm(&prompt)? {
        view.cancel_delete();
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    match view.confirm_delete() {
        Ok(Some(deleted)) => {
            log_event(logger, LogEvent::new("user_deleted").with_view(scope.as_str()));
            output::success(&format!("Deleted {}", deleted));
        }
        Ok(None) => {}
        Err(e) => {
            log_event(
                logger,
                LogEvent::new("user_delete_failed")
                    .with_view(scope.as_str())
                    .with_error(e.to_string()),
            );
            output::error(&e.to_string());
        }
    }
    Ok(())
}

enum BrowseAction {
    Next,
    Prev,
    Goto(u64),
    Search(String),
    Clear,
    Toggle(String),
    Delete(String),
    Refresh,
    Quit,
    Empty,
    Unknown,
}

fn parse_action(input: &str) -> BrowseAction {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return BrowseAction::Empty;
    }

    let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (trimmed, ""),
    };

    match (cmd.to_lowercase().as_str(), rest) {
        ("n" | "next", _) => BrowseAction::Next,
        ("p" | "prev", _) => BrowseAction::Prev,
        ("g" | "go", page) => match page.parse() {
            Ok(page) => BrowseAction::Goto(page),
            Err(_) => BrowseAction::Unknown,
        },
        ("s" | "search", query) if !query.is_empty() => BrowseAction::Search(query.to_string()),
        ("c" | "clear", _) => BrowseAction::Clear,
        ("a" | "admin", email) if !email.is_empty() => BrowseAction::Toggle(email.to_string()),
        ("d" | "delete", email) if !email.is_empty() => BrowseAction::Delete(email.to_string()),
        ("r" | "refresh", _) => BrowseAction::Refresh,
        ("q" | "quit" | "exit", _) => BrowseAction::Quit,
        _ => BrowseAction::Unknown,
    }
}
