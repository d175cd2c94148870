//! Database migration management commands.

use clap::{Args, Subcommand};
use sqlx::Row;

use artshub_core::error::{AppError, ErrorKind};

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show applied migrations
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            artshub_database::migration::run_migrations(&pool).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            let rows = sqlx::query(
                "SELECT version, description, success FROM _sqlx_migrations ORDER BY version",
            )
            .fetch_all(&pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to read migration status", e)
            })?;

            if rows.is_empty() {
                println!("No migrations applied yet.");
                return Ok(());
            }

            println!("Applied migrations:");
            for row in &rows {
                let version: i64 = row.get("version");
                let description: String = row.get("description");
                let success: bool = row.get("success");
                let marker = if success { "ok" } else { "FAILED" };
                println!("  {} - {} ({})", version, description, marker);
            }
        }
    }

    Ok(())
}
