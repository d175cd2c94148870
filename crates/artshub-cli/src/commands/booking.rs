//! Booking inspection and override CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use artshub_core::error::AppError;
use artshub_database::repositories::booking::BookingRepository;

use crate::output::{self, OutputFormat};

/// Arguments for booking commands
#[derive(Debug, Args)]
pub struct BookingArgs {
    /// Booking subcommand
    #[command(subcommand)]
    pub command: BookingCommand,
}

/// Booking subcommands
#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// List a tenant's most recent bookings
    List {
        /// Tenant ID
        #[arg(short, long)]
        tenant: Uuid,
        /// Maximum number of bookings to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
    /// Show one booking in full
    Show {
        /// Tenant ID
        #[arg(short, long)]
        tenant: Uuid,
        /// Booking ID
        id: Uuid,
    },
    /// Cancel a booking as an operator override
    Cancel {
        /// Tenant ID
        #[arg(short, long)]
        tenant: Uuid,
        /// Booking ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Booking display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BookingRow {
    /// Booking ID
    id: String,
    /// Booked resource ID
    resource: String,
    /// Requester ID
    requester: String,
    /// Start of the booked interval
    starts_at: String,
    /// End of the booked interval
    ends_at: String,
    /// Participants
    participants: i32,
    /// Quoted price
    price: String,
    /// Lifecycle status
    status: String,
}

/// Execute booking commands
pub async fn execute(args: &BookingArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let booking_repo = BookingRepository::new(pool.clone());

    match &args.command {
        BookingCommand::List { tenant, limit } => {
            let bookings = booking_repo.list_recent(*tenant, *limit).await?;

            let rows: Vec<BookingRow> = bookings
                .iter()
                .map(|b| BookingRow {
                    id: b.id.to_string(),
                    resource: b.resource_id.to_string(),
                    requester: b.requester_id.to_string(),
                    starts_at: b.starts_at.format("%Y-%m-%d %H:%M").to_string(),
                    ends_at: b.ends_at.format("%Y-%m-%d %H:%M").to_string(),
                    participants: b.participant_count,
                    price: format_money(b.price_cents, &b.currency),
                    status: b.status.to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        BookingCommand::Show { tenant, id } => {
            let booking = booking_repo
                .find_by_id(*tenant, *id)
                .await?
                .ok_or_else(|| AppError::booking_not_found("Booking not found"))?;

            println!("Booking {}", booking.id);
            output::print_kv("resource_id", &booking.resource_id.to_string());
            output::print_kv("requester_id", &booking.requester_id.to_string());
            output::print_kv("requester_role", &booking.requester_role);
            output::print_kv(
                "starts_at",
                &booking.starts_at.format("%Y-%m-%d %H:%M").to_string(),
            );
            output::print_kv(
                "ends_at",
                &booking.ends_at.format("%Y-%m-%d %H:%M").to_string(),
            );
            output::print_kv("participants", &booking.participant_count.to_string());
            output::print_kv("price", &format_money(booking.price_cents, &booking.currency));
            output::print_kv("status", &booking.status.to_string());
            output::print_kv(
                "payment_reference",
                booking.payment_reference.as_deref().unwrap_or("-"),
            );
            if let Some(confirmed_at) = booking.confirmed_at {
                output::print_kv(
                    "confirmed_at",
                    &confirmed_at.format("%Y-%m-%d %H:%M").to_string(),
                );
            }
            if let Some(cancelled_at) = booking.cancelled_at {
                output::print_kv(
                    "cancelled_at",
                    &cancelled_at.format("%Y-%m-%d %H:%M").to_string(),
                );
            }
        }
        BookingCommand::Cancel { tenant, id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("Cancel this booking? Its slot is released immediately.")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            match booking_repo.cancel(*tenant, *id, None, true).await? {
                Some(booking) => {
                    output::print_success(&format!("Booking {} cancelled", booking.id));
                }
                None => {
                    output::print_warning("Booking not found or already closed");
                }
            }
        }
    }

    Ok(())
}

fn format_money(cents: i64, currency: &str) -> String {
    format!("{}.{:02} {}", cents / 100, (cents % 100).abs(), currency)
}
