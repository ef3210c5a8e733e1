//! Roster CLI - manage the staff directory from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use roster_core::{Role, Scope};

mod commands;
mod output;

use commands::{config, delete, list, logs, role, session, status};

/// Roster - manage the staff directory from your terminal
#[derive(Parser)]
#[command(name = "ro", version, about, long_about = None)]
struct Cli {
    /// Directory server URL (overrides the configured server)
    #[arg(long, global = true, env = "ROSTER_SERVER_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the employee directory
    Employees {
        /// Page to show (starts at 1)
        #[arg(short, long, conflicts_with = "search")]
        page: Option<u64>,
        /// Filter by username or email instead of paging
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the admin directory
    Admins {
        /// Page to show (starts at 1)
        #[arg(short, long, conflicts_with = "search")]
        page: Option<u64>,
        /// Filter by username or email instead of paging
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Promote an employee to admin
    Promote {
        /// Email of the employee to promote
        email: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Demote an admin back to employee
    Demote {
        /// Email of the admin to demote
        email: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a user and all their data
    Delete {
        /// Email of the user to delete
        email: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store a local session
    Login {
        /// Username to store
        username: String,
        /// Role for the session (admin or employee)
        #[arg(long)]
        role: Role,
    },

    /// Clear the local session
    Logout,

    /// Show the current session
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the directory server and show page counts
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the activity log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli { server, command } = cli;
    let server = server.as_deref();

    match command {
        Commands::Employees { page, search, json } => {
            list::run(Scope::Employees, page, search.as_deref(), json, server)
        }
        Commands::Admins { page, search, json } => {
            list::run(Scope::Admins, page, search.as_deref(), json, server)
        }
        Commands::Promote { email, json } => role::run(Scope::Employees, &email, json, server),
        Commands::Demote { email, json } => role::run(Scope::Admins, &email, json, server),
        Commands::Delete { email, force, json } => delete::run(&email, force, json, server),
        Commands::Login { username, role } => session::login(&username, role),
        Commands::Logout => session::logout(),
        Commands::Whoami { json } => session::whoami(json),
        Commands::Status { json } => status::run(json, server),
        Commands::Config { command } => config::run(command, server),
        Commands::Logs { command } => logs::run(command),
    }
}
