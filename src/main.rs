//! FlightWx CLI - current weather at both ends of a trip.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use flightwx_core::Config;
use flightwx_weather::{flight_report, Aggregator, LocationDescriptor, Side};

#[derive(Parser)]
#[command(name = "flightwx")]
#[command(about = "Report current weather at a trip's origin and destination", long_about = None)]
struct Args {
    /// Origin: "lat,lon", an airport code (e.g. MEX), or "name[,REGION]"
    #[arg(long, value_parser = parse_descriptor)]
    origin: LocationDescriptor,

    /// Destination, in the same forms as --origin
    #[arg(long, value_parser = parse_descriptor)]
    destination: LocationDescriptor,

    /// Flight number echoed in the report
    #[arg(long)]
    flight: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_descriptor(input: &str) -> Result<LocationDescriptor, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("location must not be empty".to_string());
    }

    if let Some((first, second)) = input.split_once(',') {
        if let (Ok(latitude), Ok(longitude)) =
            (first.trim().parse::<f64>(), second.trim().parse::<f64>())
        {
            return Ok(LocationDescriptor::coordinates(latitude, longitude));
        }
        let region = second.trim();
        let region = (!region.is_empty()).then_some(region);
        return Ok(LocationDescriptor::place(first.trim(), region));
    }

    let is_code = input.len() == 3 && input.chars().all(|c| c.is_ascii_alphabetic());
    if is_code {
        Ok(LocationDescriptor::airport(input.to_ascii_uppercase()))
    } else {
        Ok(LocationDescriptor::place(input, None))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    flightwx_core::init()?;

    let (config, _warnings) = Config::load_validated(args.config.as_deref())?;
    let aggregator = Aggregator::from_config(&config).map_err(|e| {
        eprintln!("{}", e.user_message());
        e
    })?;

    tracing::info!(
        "Looking up weather: {} -> {}",
        args.origin,
        args.destination
    );

    match flight_report(&aggregator, args.flight, args.origin, args.destination).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            for (side, outcome) in [
                (Side::Origin, &report.origin),
                (Side::Destination, &report.destination),
            ] {
                if let Some(kind) = outcome.error_kind() {
                    eprintln!("{}: {}", side, kind.user_message());
                }
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("{}", e);
            println!("{}", serde_json::to_string_pretty(&e.body())?);
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    }
}
