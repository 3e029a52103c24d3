// CLI module for administrative operations requiring server access

pub mod roles;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// CivicConnect CLI for running the server and administrative operations
#[derive(Parser)]
#[command(name = "civicconnect")]
#[command(about = "CivicConnect issue reporting backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Run pending database migrations and exit
    Migrate,

    /// Grant the ADMIN role to a user
    GrantAdmin {
        /// Username of the user to promote
        username: String,
    },

    /// Revoke the ADMIN role from a user
    RevokeAdmin {
        /// Username of the user to demote
        username: String,
    },
}

/// Execute a non-server CLI command
///
/// # Arguments
/// * `command` - Parsed CLI subcommand
/// * `app_data` - Application data containing all stores and services
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => unreachable!("serve is handled by the server runner"),
        Commands::Migrate => {
            // Migrations already ran during startup; this just reports it.
            println!("Database migrations completed");
            Ok(())
        }
        Commands::GrantAdmin { username } => {
            roles::grant_admin(&app_data.user_store, &username).await
        }
        Commands::RevokeAdmin { username } => {
            roles::revoke_admin(&app_data.user_store, &username).await
        }
    }
}
