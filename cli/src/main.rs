use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;
use salon_simulator_core_rs::{ArrivalProcess, ScenarioConfig};
use serde_json::json;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "salon-sim",
    about = "Simulate a day at a barber salon",
    long_about = "Runs a minute-by-minute salon simulation and prints the event log.\n\
                  Without --config the standard eight-hour day is used."
)]
struct Cli {
    /// Scenario file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for generated arrivals
    #[arg(long, env = "SALON_SEED")]
    seed: Option<u64>,

    /// Waiting-room capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Number of customers to generate
    #[arg(long)]
    customers: Option<usize>,

    /// Last minute to simulate (inclusive)
    #[arg(long)]
    horizon: Option<usize>,

    /// Wall-clock hour of minute 0
    #[arg(long)]
    hour_offset: Option<usize>,

    /// Draw arrivals as a Poisson process with this mean gap (minutes)
    #[arg(long, value_name = "MEAN")]
    exponential: Option<f64>,

    /// Output format
    #[arg(value_enum, long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// `[HH:MM] [actor] message` lines
    Text,
    /// Report and event records as one JSON document
    Json,
}

// ── Entry point ────────────────────────────────────────────────────

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let scenario = load_scenario(&cli)?;
    info!(
        "scenario: {} barbers, capacity {}, horizon {}, seed {}",
        scenario.barbers.len(),
        scenario.capacity,
        scenario.horizon,
        scenario.seed
    );

    let mut salon = scenario.build()?;
    let report = salon.simulate(scenario.horizon)?;
    let records = salon.event_log().records();

    match cli.format {
        OutputFormat::Text => {
            let clock = scenario.clock();
            for record in &records {
                println!("{}", record.render(&clock));
            }
        }
        OutputFormat::Json => {
            let document = json!({
                "report": report,
                "events": records,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

/// Start from the scenario file (or the standard day) and apply flag overrides
fn load_scenario(cli: &Cli) -> Result<ScenarioConfig, Box<dyn Error>> {
    let mut scenario = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            ScenarioConfig::from_json(&text)?
        }
        None => ScenarioConfig::standard_day(),
    };

    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    if let Some(capacity) = cli.capacity {
        scenario.capacity = capacity;
    }
    if let Some(horizon) = cli.horizon {
        scenario.horizon = horizon;
    }
    if let Some(hour_offset) = cli.hour_offset {
        scenario.hour_offset = hour_offset;
    }

    if cli.customers.is_some() || cli.exponential.is_some() {
        let arrivals = scenario
            .arrivals
            .as_mut()
            .ok_or("--customers and --exponential need a scenario with generated arrivals")?;

        if let Some(count) = cli.customers {
            arrivals.count = count;
        }
        if let Some(mean_interarrival) = cli.exponential {
            arrivals.process = ArrivalProcess::Exponential { mean_interarrival };
        }
    }

    Ok(scenario)
}
