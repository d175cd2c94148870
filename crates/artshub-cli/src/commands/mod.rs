//! CLI command definitions and dispatch.

pub mod booking;
pub mod migrate;
pub mod resource;

use clap::{Parser, Subcommand};

use artshub_core::error::AppError;

use crate::output::OutputFormat;

/// ArtsHub resource booking platform
#[derive(Debug, Parser)]
#[command(name = "artshub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (reads config/default.toml + config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Resource catalog management
    Resource(resource::ResourceArgs),
    /// Booking inspection and intervention
    Booking(booking::BookingArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Resource(args) => resource::execute(args, &self.env, self.format).await,
            Commands::Booking(args) => booking::execute(args, &self.env, self.format).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<artshub_core::config::AppConfig, AppError> {
    artshub_core::config::AppConfig::load(env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &artshub_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    let pool = artshub_database::connection::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
