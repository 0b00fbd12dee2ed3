//! `booking-client` entry-point: runs one booking API operation through the
//! request lifecycle and prints the result as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use booking_client::config::ClientSettings;
use booking_client::domain::{BookingClient, BookingReference, TenantId};
use booking_client::outbound::http::HttpBookingService;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `booking-client` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "booking-client",
    about = "Query the booking API through the client request lifecycle",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List the bookable services.
    Services,
    /// List the slots a tenant offers on one day.
    Slots {
        /// Day to query, as `YYYY-MM-DD`.
        #[arg(long, value_name = "date")]
        date: NaiveDate,
        /// Tenant identifier.
        #[arg(long, value_name = "id", value_parser = parse_tenant)]
        tenant: TenantId,
    },
    /// Look up a booking by reference.
    Booking {
        /// Customer-facing booking reference.
        #[arg(long, value_name = "reference", value_parser = parse_reference)]
        reference: BookingReference,
    },
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ClientSettings::load_from_iter([OsString::from("booking-client")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let base_url = settings.api_base_url().map_err(io::Error::other)?;
    let service = HttpBookingService::new(base_url, settings.request_timeout())
        .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;
    info!(base_url = %service.base_url(), "booking client ready");
    let client = BookingClient::new(Arc::new(service));

    match args.command {
        Command::Services => {
            let services = client.fetch_services().await.map_err(io::Error::other)?;
            info!(count = services.len(), "fetched services");
            print_json(&services)
        }
        Command::Slots { date, tenant } => {
            let slots = client
                .fetch_available_slots(date, &tenant)
                .await
                .map_err(io::Error::other)?;
            info!(
                %date,
                tenant = %tenant,
                open = slots.open_slots().count(),
                "fetched available slots"
            );
            print_json(&slots)
        }
        Command::Booking { reference } => {
            let booking = client
                .fetch_booking_by_reference(&reference)
                .await
                .map_err(io::Error::other)?;
            info!(reference = %booking.reference, status = %booking.status, "fetched booking");
            print_json(&booking)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{rendered}");
    Ok(())
}

fn parse_tenant(raw: &str) -> Result<TenantId, String> {
    TenantId::new(raw).map_err(|error| error.to_string())
}

fn parse_reference(raw: &str) -> Result<BookingReference, String> {
    BookingReference::new(raw).map_err(|error| error.to_string())
}
