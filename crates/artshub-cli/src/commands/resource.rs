//! Resource catalog CLI commands.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveTime;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use artshub_core::error::AppError;
use artshub_core::types::pagination::PageRequest;
use artshub_database::repositories::resource::ResourceRepository;
use artshub_entity::resource::{CreateResource, ResourceKind, UpdateResource};

use crate::output::{self, OutputFormat};

/// Arguments for resource commands
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Resource subcommand
    #[command(subcommand)]
    pub command: ResourceCommand,
}

/// Resource subcommands
#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// List a tenant's resources
    List {
        /// Tenant ID
        #[arg(short, long)]
        tenant: Uuid,
    },
    /// Show one resource in full
    Show {
        /// Tenant ID
        #[arg(short, long)]
        tenant: Uuid,
        /// Resource ID
        id: Uuid,
    },
    /// Add a resource to the catalog
    Add {
        /// Tenant ID
        #[arg(short, long)]
        tenant: Uuid,
        /// Resource name (will prompt if not provided)
        #[arg(short, long)]
        name: Option<String>,
        /// Resource kind: workshop, equipment, space, or event
        #[arg(short, long, default_value = "space")]
        kind: String,
        /// Maximum concurrent participants
        #[arg(long, default_value_t = 1)]
        capacity: i32,
        /// Slot granularity in minutes
        #[arg(long, default_value_t = 60)]
        slot_minutes: i32,
        /// Daily opening time (HH:MM, UTC)
        #[arg(long, default_value = "09:00")]
        open: String,
        /// Daily closing time (HH:MM, UTC)
        #[arg(long, default_value = "22:00")]
        close: String,
        /// Open weekdays as ISO numbers, comma-separated (1 = Monday)
        #[arg(long, default_value = "1,2,3,4,5,6,7")]
        days: String,
        /// ISO 4217 currency code
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Per-participant rate in minor units
        #[arg(long, default_value_t = 0)]
        rate_cents: i64,
    },
    /// Deactivate a resource (stops new bookings)
    Deactivate {
        /// Tenant ID
        #[arg(short, long)]
        tenant: Uuid,
        /// Resource ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Resource display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ResourceRow {
    /// Resource ID
    id: String,
    /// Name
    name: String,
    /// Kind
    kind: String,
    /// Capacity
    capacity: i32,
    /// Slot length in minutes
    slot_minutes: i32,
    /// Daily window
    window: String,
    /// Default rate
    rate: String,
    /// Active flag
    active: bool,
}

/// Execute resource commands
pub async fn execute(
    args: &ResourceArgs,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let resource_repo = ResourceRepository::new(pool.clone());

    match &args.command {
        ResourceCommand::List { tenant } => {
            let page = PageRequest::new(1, 100);
            let resources = resource_repo.list(*tenant, &page).await?;

            let rows: Vec<ResourceRow> = resources
                .iter()
                .map(|r| ResourceRow {
                    id: r.id.to_string(),
                    name: r.name.clone(),
                    kind: r.kind.to_string(),
                    capacity: r.capacity,
                    slot_minutes: r.slot_minutes,
                    window: format!(
                        "{}-{}",
                        r.open_time.format("%H:%M"),
                        r.close_time.format("%H:%M")
                    ),
                    rate: format_money(r.default_rate_cents, &r.currency),
                    active: r.active,
                })
                .collect();

            output::print_list(&rows, format);
        }
        ResourceCommand::Show { tenant, id } => {
            let resource = resource_repo
                .find_by_id(*tenant, *id)
                .await?
                .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

            println!("Resource {}", resource.id);
            output::print_kv("name", &resource.name);
            output::print_kv("kind", resource.kind.as_str());
            output::print_kv("capacity", &resource.capacity.to_string());
            output::print_kv("slot_minutes", &resource.slot_minutes.to_string());
            output::print_kv(
                "window",
                &format!(
                    "{}-{}",
                    resource.open_time.format("%H:%M"),
                    resource.close_time.format("%H:%M")
                ),
            );
            output::print_kv(
                "open_days",
                &resource
                    .open_days
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            );
            output::print_kv(
                "rate",
                &format_money(resource.default_rate_cents, &resource.currency),
            );
            output::print_kv("free_for_roles", &resource.free_for_roles.join(","));
            output::print_kv("active", &resource.active.to_string());
        }
        ResourceCommand::Add {
            tenant,
            name,
            kind,
            capacity,
            slot_minutes,
            open,
            close,
            days,
            currency,
            rate_cents,
        } => {
            let name = match name {
                Some(n) => n.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Resource name")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            let kind = ResourceKind::from_str(kind)?;
            let open_time = parse_time(open)?;
            let close_time = parse_time(close)?;
            let open_days = parse_days(days)?;

            let data = CreateResource {
                name: name.clone(),
                kind,
                description: None,
                capacity: *capacity,
                slot_minutes: *slot_minutes,
                open_time,
                close_time,
                open_days,
                blackout_dates: Vec::new(),
                currency: currency.to_uppercase(),
                default_rate_cents: *rate_cents,
                pricing_rules: HashMap::new(),
                free_for_roles: Vec::new(),
            };

            let resource = resource_repo.create(*tenant, &data).await?;
            output::print_success(&format!(
                "Resource '{}' created (id: {})",
                name, resource.id
            ));
        }
        ResourceCommand::Deactivate { tenant, id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("Deactivate this resource? New bookings will be rejected.")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let update = UpdateResource {
                active: Some(false),
                ..Default::default()
            };
            let resource = resource_repo
                .update(*tenant, *id, &update)
                .await?
                .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

            output::print_success(&format!("Resource '{}' deactivated", resource.name));
        }
    }

    Ok(())
}

fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time '{}', expected HH:MM", value)))
}

fn parse_days(value: &str) -> Result<Vec<i16>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i16>()
                .map_err(|_| AppError::validation(format!("Invalid weekday number '{}'", s)))
        })
        .collect()
}

fn format_money(cents: i64, currency: &str) -> String {
    format!("{}.{:02} {}", cents / 100, (cents % 100).abs(), currency)
}
