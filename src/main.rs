// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Thermowatch - Event-Driven Thermostat Simulator
//!
//! Runs the demo device: a heat sensor replays a temperature feed, the
//! thermostat switches cooling on and off, and an emergency shuts the device
//! down.

use anyhow::Result;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use thermowatch::config::SourceKind;
use thermowatch::sensors::feed_from_config;
use thermowatch::{
    Config, CoolingFan, EventDispatcher, MonitoredDevice, SensorDriver, Thermostat,
    ThresholdStateMachine, VERSION,
};

/// Thermowatch - Event-Driven Thermostat Simulator
#[derive(Parser, Debug)]
#[command(name = "thermowatch")]
#[command(author = "Thermowatch Project")]
#[command(version = VERSION)]
#[command(about = "Simulated thermostat with warning, emergency and recovery alerts")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Milliseconds between samples
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Use the random-walk simulator instead of the canned sequence
    #[arg(long)]
    simulate: bool,

    /// Skip the operator prompts
    #[arg(long)]
    no_prompt: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration, logged once the subscriber is up
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let existed = config_path.exists();
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if let Some(interval_ms) = args.interval_ms {
        config.sampling.interval_ms = interval_ms;
    }
    if args.simulate {
        config.sampling.source = SourceKind::Simulated;
    }
    if args.no_prompt {
        config.console.confirm_start = false;
        config.console.confirm_exit = false;
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&args, &config))
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Thermowatch v{}", VERSION);
    if existed {
        info!("Configuration loaded from {:?}", config_path);
    } else {
        info!("Created default configuration at {:?}", config_path);
    }

    let thresholds = config.validate()?;

    if config.console.confirm_start {
        prompt("Press Enter to start device...")?;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_device(&config, thresholds))?;

    if config.console.confirm_exit {
        prompt("Press Enter to exit...")?;
    }

    Ok(())
}

/// Command line flags win over the configured level
fn log_level(args: &Args, config: &Config) -> Level {
    if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    }
}

/// Wire the thermostat and run the heat sensor until the feed is exhausted
async fn run_device(config: &Config, thresholds: thermowatch::Thresholds) -> Result<()> {
    info!("Device is running...");

    let device = Arc::new(MonitoredDevice::new(thresholds));
    let cooling = Arc::new(CoolingFan::new());
    let thermostat = Thermostat::new(device.clone(), cooling.clone());

    let mut dispatcher = EventDispatcher::new();
    thermostat.wire(&mut dispatcher);

    let machine = ThresholdStateMachine::new(thresholds);
    let mut driver = SensorDriver::new(machine, dispatcher, config.sampling.interval());
    let mut feed = feed_from_config(&config.sampling)?;

    // Ctrl+C stops the loop between samples
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Shutdown signal received, stopping after current sample...");
            ctrl_c.cancel();
        }
    });

    let summary = driver.run(feed.as_mut(), &cancel).await?;

    info!(
        "Run finished ({:?}): {} samples, {} events, cooling {}, device {}",
        summary.termination,
        summary.samples,
        summary.events,
        if cooling.is_running() { "on" } else { "off" },
        if device.is_shut_down() { "shut down" } else { "running" },
    );

    Ok(())
}

/// Block until the operator presses Enter
fn prompt(message: &str) -> Result<()> {
    println!("{}", message);
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
