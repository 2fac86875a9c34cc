//! Print probe readings from MEATER Cloud, once or in a loop
//!
//! Run with: cargo run --example probe_info -- -u you@example.com -p secret --loop 30

use std::time::Duration;

use clap::Parser;
use meater_cloud::{ClientConfig, MeaterClient, Probe, Result, TemperatureUnit};
use tracing::{debug, warn};

const TABLE_HEADER: &str = "TIME\t\tPROBE\tTEMP\tAMBIENT\tUPDATED\t\t\tCOOK";

/// Read data from the MEATER Cloud API.
#[derive(Debug, Parser)]
struct Args {
    /// Account email.
    #[arg(short, long, env = "MEATER_USERNAME")]
    username: String,

    /// Account password.
    #[arg(short, long, env = "MEATER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Query a single probe by its device id.
    #[arg(long)]
    probe: Option<String>,

    /// Repeat the query every N seconds (15 when given without a value).
    #[arg(short, long, num_args = 0..=1, default_missing_value = "15")]
    r#loop: Option<u64>,

    /// Show temperatures in Fahrenheit.
    #[arg(short, long)]
    fahrenheit: bool,

    /// Print debugging statements.
    #[arg(short, long)]
    debug: bool,

    /// Be verbose.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(level).init();

    let started = std::time::Instant::now();
    let unit = if args.fahrenheit {
        TemperatureUnit::Fahrenheit
    } else {
        TemperatureUnit::Celsius
    };

    let client = MeaterClient::new(&ClientConfig::from_env()?)?;
    client.authenticate(&args.username, &args.password).await?;
    println!("Logged in.");

    match args.r#loop {
        Some(interval) => {
            println!("Looping with interval: {interval}");
            println!("{TABLE_HEADER}");
            let mut elapsed = 0;
            loop {
                match probe_info(&client, args.probe.as_deref(), elapsed, unit).await {
                    Ok(()) => {}
                    // Transient failure: try again next tick.
                    Err(err) if err.is_transient() => warn!("Skipping this tick: {err}"),
                    Err(err) => return Err(err),
                }

                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        debug!("User interrupt.");
                        break;
                    }
                    _ = tokio::time::sleep(Duration::from_secs(interval)) => {
                        elapsed += interval;
                    }
                }
            }
        }
        None => {
            println!("{TABLE_HEADER}");
            probe_info(&client, args.probe.as_deref(), 0, unit).await?;
        }
    }

    println!("Executed in {:.2} seconds.", started.elapsed().as_secs_f64());
    Ok(())
}

async fn probe_info(
    client: &MeaterClient,
    device_id: Option<&str>,
    elapsed: u64,
    unit: TemperatureUnit,
) -> Result<()> {
    let probes = match device_id {
        Some(id) => client.get_device(id).await?,
        None => client.list_devices().await?,
    };

    if probes.is_empty() {
        println!("All devices are offline.");
        return Ok(());
    }

    for probe in &probes {
        println!("{}", format_row(probe, elapsed, unit));
    }
    Ok(())
}

fn format_row(probe: &Probe, elapsed: u64, unit: TemperatureUnit) -> String {
    let cook = match probe.cook() {
        Some(cook) => format!(
            "{} ({}) target {} peak {} remaining {}s",
            cook.name().unwrap_or("-"),
            cook.state().unwrap_or("-"),
            unit.format(cook.target_temperature()),
            unit.format(cook.peak_temperature()),
            cook.time_remaining()
        ),
        None => "None".to_string(),
    };

    format!(
        "{elapsed}\t\t{}\t{}\t{}\t{}\t{cook}",
        probe.index(),
        unit.format(probe.internal_temperature()),
        unit.format(probe.ambient_temperature()),
        probe.time_updated().format("%Y-%m-%d %H:%M:%S"),
    )
}
