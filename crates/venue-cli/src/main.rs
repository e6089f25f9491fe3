//! `venue` CLI — look up bookable slots and quote bookings from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Offered start times for a date, given the venue calendar's busy intervals
//! venue slots --date 2026-03-20 --calendar busy.json
//!
//! # Offered end times once a start has been chosen
//! venue slots --date 2026-03-20 --calendar busy.json --start "4:00 PM"
//!
//! # Quote a booking request (JSON file, or stdin if omitted)
//! venue quote --pricing hosts.json --request booking.json
//!
//! # Quote from slot labels instead of a request file
//! venue quote --pricing hosts.json --date 2026-03-20 --start "4:00 PM" --end "1:00 AM" \
//!   --guests 25 --add-on allInclusive
//! ```
//!
//! The venue timezone comes from `--timezone` or `VENUE_TIMEZONE`
//! (default `America/Chicago`). Set `RUST_LOG=debug` to trace fetches.

mod sources;

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use venue_engine::{BookingRequest, BookingSession, StaticCalendar, StaticPricing};

use crate::sources::{JsonFileCalendar, JsonFilePricing};

#[derive(Parser)]
#[command(name = "venue", version, about = "Venue availability and pricing CLI")]
struct Cli {
    /// IANA timezone of the venue
    #[arg(long, global = true, env = "VENUE_TIMEZONE", default_value = "America/Chicago")]
    timezone: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List offered start slots, or end slots for a chosen start
    Slots {
        /// Venue-local date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// JSON file of busy intervals
        #[arg(long)]
        calendar: String,
        /// Chosen start label (e.g. "4:00 PM"); lists end slots when given
        #[arg(long)]
        start: Option<String>,
    },
    /// Compute an itemized price for a booking
    Quote {
        /// JSON file of host pricing records
        #[arg(long)]
        pricing: String,
        /// Booking request JSON file (reads stdin if no labels are given either)
        #[arg(short, long, conflicts_with_all = ["date", "start", "end"])]
        request: Option<String>,
        /// Venue-local date for label-based quoting
        #[arg(long, requires_all = ["start", "end"])]
        date: Option<NaiveDate>,
        /// Start label, e.g. "4:00 PM"
        #[arg(long, requires = "date")]
        start: Option<String>,
        /// End label, e.g. "1:00 AM"
        #[arg(long, requires = "date")]
        end: Option<String>,
        /// Number of guests
        #[arg(long, default_value_t = 1)]
        guests: i64,
        /// Host whose pricing applies
        #[arg(long, default_value = "0")]
        host: String,
        /// Enable an add-on by name (repeatable)
        #[arg(long = "add-on")]
        add_ons: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let timezone: Tz = cli
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", cli.timezone))?;
    debug!(%timezone, "venue timezone");

    match cli.command {
        Commands::Slots {
            date,
            calendar,
            start,
        } => {
            let mut session =
                BookingSession::new(timezone, JsonFileCalendar::new(calendar), StaticPricing::new());
            let slots = match start {
                Some(label) => session.offered_end_slots(date, &label).await,
                None => session.offered_start_slots(date).await,
            }
            .context("Failed to compute slots")?;
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        Commands::Quote {
            pricing,
            request,
            date,
            start,
            end,
            guests,
            host,
            add_ons,
        } => {
            let request = match (date, start, end) {
                (Some(date), Some(start), Some(end)) => {
                    BookingRequest::from_labels(date, &start, &end, timezone, guests, host)
                        .context("Invalid booking times")?
                }
                _ => {
                    let json = read_input(request.as_deref())?;
                    serde_json::from_str(&json).context("Failed to parse booking request")?
                }
            };
            let request = add_ons
                .into_iter()
                .fold(request, |request, name| request.with_add_on(name, true));

            let mut session =
                BookingSession::new(timezone, StaticCalendar::default(), JsonFilePricing::new(pricing));
            let breakdown = session
                .compute_price(&request)
                .await
                .context("Failed to price booking")?;
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
