use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use cffdrs_core::{
    AdvisoryConfig, CffdrsEngine, CriticalHours, FireBehaviourAdvisory, FuelType,
    WeatherStationInput,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Fire behaviour advisories for a set of weather stations
#[derive(Parser, Debug)]
#[command(name = "demo-headless")]
#[command(about = "CFFDRS fire behaviour advisory calculator", long_about = None)]
struct Args {
    /// JSON array of station records
    #[arg(default_value = "demo-headless/data/horsefly.json")]
    stations: PathBuf,

    /// JSON advisory configuration (missing fields take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the fuel type of every station
    #[arg(short, long)]
    fuel_type: Option<FuelType>,

    /// Print advisories as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match run(&Args::parse()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of stations whose advisory failed
fn run(args: &Args) -> Result<usize, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => serde_json::from_str::<AdvisoryConfig>(&fs::read_to_string(path)?)?,
        None => AdvisoryConfig::default(),
    };
    let engine = CffdrsEngine::new(config)?;

    let mut stations: Vec<WeatherStationInput> =
        serde_json::from_str(&fs::read_to_string(&args.stations)?)?;
    if let Some(fuel_type) = args.fuel_type {
        for station in &mut stations {
            station.fuel_type = fuel_type;
        }
    }
    tracing::info!(count = stations.len(), path = %args.stations.display(), "loaded stations");

    let results = engine.calculate_fire_behaviour_advisories(&stations);
    let failures = results.iter().filter(|result| result.is_err()).count();

    if args.json {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|result| match result {
                Ok(advisory) => serde_json::to_value(advisory).unwrap_or_default(),
                Err(err) => serde_json::json!({ "error": err.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(failures);
    }

    let config = engine.config();
    println!("=== Fire Behaviour Advisory ===\n");
    println!(
        "Fuel | Date       |  ROS (m/min) |   HFI (kW/m) |   CFB | Type | Flame (m) | IG | 30 min (ha) | {:>13} | {:>13}",
        format!("HFI {:.0}", config.low_hfi_threshold),
        format!("HFI {:.0}", config.high_hfi_threshold),
    );
    println!("-----|------------|--------------|--------------|-------|------|-----------|----|-------------|---------------|--------------");
    for (station, result) in stations.iter().zip(&results) {
        match result {
            Ok(advisory) => print_row(station, advisory),
            Err(err) => println!(
                "{:<4} | {} | error: {}",
                station.fuel_type, station.time_of_interest, err
            ),
        }
    }

    println!("\n{} station(s), {} failed", stations.len(), failures);
    Ok(failures)
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn window(hours: Option<CriticalHours>) -> String {
    hours.map_or_else(|| "-".to_string(), |hours| hours.to_string())
}

fn print_row(station: &WeatherStationInput, advisory: &FireBehaviourAdvisory) {
    println!(
        "{:<4} | {} | {:>12.3} | {:>12} | {:>5} | {:>4} | {:>9} | {:>2} | {:>11.3} | {:>13} | {:>13}",
        station.fuel_type,
        station.time_of_interest,
        advisory.ros,
        optional(advisory.hfi, 1),
        optional(advisory.cfb, 3),
        advisory
            .fire_type
            .map_or_else(|| "-".to_string(), |fire_type| fire_type.to_string()),
        optional(advisory.flame_length, 2),
        advisory
            .intensity_group
            .map_or_else(|| "-".to_string(), |group| group.to_string()),
        advisory.thirty_minute_fire_size,
        window(advisory.critical_hours_hfi_4000),
        window(advisory.critical_hours_hfi_10000),
    );
}
