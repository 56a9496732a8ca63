//! # Checkout Guard CLI
//!
//! Command-line access to the checkout validators and the address directory.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          checkout-cli                                   │
//! │                                                                         │
//! │  validate / decompose / recompose ───► checkout-core (pure, offline)   │
//! │  search / verify ─────────────────────► checkout-geo ───► directory    │
//! │                                                                         │
//! │  JSON on stdout, logs on stderr (RUST_LOG)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit status is 1 when a form or an address is rejected.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use checkout_core::{decompose, recompose, validate_checkout, CheckoutForm, YearMonth};
use checkout_geo::{AddressResolver, GeoConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "checkout-cli", version, about = "Checkout form and address checks")]
struct Cli {
    /// Directory configuration file (geo.toml)
    #[arg(long, global = true, env = "CHECKOUT_GEO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a checkout form read from a JSON file ("-" for stdin)
    Validate {
        input: String,
        /// Month to check card expiry against, as YYYY-MM (default: now)
        #[arg(long, value_parser = parse_year_month)]
        today: Option<YearMonth>,
    },
    /// Split an address line into number, street and postal code
    Decompose { address: String },
    /// Join address parts into one line
    Recompose {
        street_number: String,
        street_name: String,
        postal_code: String,
    },
    /// Ask the directory for address suggestions
    Search {
        query: String,
        /// Maximum number of suggestions (default: from config)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Check an address against the directory's best match
    Verify { address: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    debug!(command = ?cli.command, "Running command");

    match cli.command {
        Command::Validate { input, today } => {
            let form = read_form(&input)?;
            let today = today.unwrap_or_else(YearMonth::current);
            let report = validate_checkout(&form, today);

            print_json(&report)?;
            if let Some(rejected) = report.first_error() {
                info!(field = %rejected.field, "Checkout form rejected");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Decompose { address } => {
            print_json(&decompose(&address))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Recompose {
            street_number,
            street_name,
            postal_code,
        } => {
            println!("{}", recompose(&street_number, &street_name, &postal_code));
            Ok(ExitCode::SUCCESS)
        }
        Command::Search { query, limit } => {
            let config = load_config(cli.config)?;
            let limit = limit.unwrap_or(config.lookup.default_limit);
            let resolver = AddressResolver::from_config(&config)?;

            let candidates = resolver.search(&query, limit).await;
            info!(count = candidates.len(), "Directory suggestions");
            print_json(&candidates)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { address } => {
            let config = load_config(cli.config)?;
            let resolver = AddressResolver::from_config(&config)?;

            let verdict = resolver
                .validate_outcome(&address)
                .await
                .context("address directory unavailable")?;
            print_json(&verdict)?;
            Ok(if verdict.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show directory queries and verdicts
/// - `RUST_LOG=checkout_geo=trace` - Trace the geo crate only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// An explicit config path must load cleanly; the default location may be
/// missing or broken.
fn load_config(path: Option<PathBuf>) -> Result<GeoConfig> {
    match path {
        Some(path) => GeoConfig::load(Some(path.clone()))
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(GeoConfig::load_or_default(None)),
    }
}

fn read_form(input: &str) -> Result<CheckoutForm> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading form from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?
    };

    serde_json::from_str(&raw).context("checkout form is not valid JSON")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn parse_year_month(raw: &str) -> Result<YearMonth> {
    let Some((year, month)) = raw.split_once('-') else {
        bail!("expected YYYY-MM, got {raw:?}");
    };
    let year: i32 = year.parse().with_context(|| format!("bad year in {raw:?}"))?;
    let month: u32 = month.parse().with_context(|| format!("bad month in {raw:?}"))?;
    if !(1..=12).contains(&month) {
        bail!("month must be between 1 and 12, got {month}");
    }
    Ok(YearMonth::new(year, month))
}
