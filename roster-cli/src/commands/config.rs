//! Config command - show and change settings

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{ContentArrangement, Table};
use roster_core::{Config, DirectoryClient};

use super::get_roster_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the directory server URL
    SetServer {
        /// Server URL, e.g. http://localhost:8080
        url: String,
    },
}

pub fn run(command: ConfigCommands, server: Option<&str>) -> Result<()> {
    let roster_dir = get_roster_dir();

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&roster_dir)?;
            // --server and ROSTER_SERVER_URL win over the settings file
            let effective = server.unwrap_or(&config.server_url);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "server": effective,
                        "configured": config.server_url,
                        "rosterDir": roster_dir.to_string_lossy(),
                    }))?
                );
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.add_row(vec!["Server", effective]);
            table.add_row(vec!["Configured server", config.server_url.as_str()]);
            table.add_row(vec!["Roster directory", &roster_dir.to_string_lossy()]);
            println!("{}", table);
        }
        ConfigCommands::SetServer { url } => {
            // Reject URLs the client could never talk to
            DirectoryClient::new(&url)?;

            std::fs::create_dir_all(&roster_dir)?;
            let mut config = Config::load(&roster_dir)?;
            config.server_url = url;
            config.save(&roster_dir)?;

            output::success(&format!("Server set to {}", config.server_url));
        }
    }

    Ok(())
}
