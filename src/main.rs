//! Command-line entry point
//!
//! Reads a rating period file, runs it through the Glicko-2 engine and prints
//! the resulting standings as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use glicko2_period::config::{validate_config, AppConfig};
use glicko2_period::input::PeriodInput;
use glicko2_period::Glicko2Engine;
use std::path::PathBuf;
use tracing::{error, info};

/// Glicko-2 rating period calculator
#[derive(Parser)]
#[command(
    name = "glicko2-period",
    version,
    about = "Compute Glicko-2 ratings for one rating period of pairwise results",
    long_about = "Reads players and match results from a JSON period file, applies one \
                 Glicko-2 rating period (players who did not compete have their deviation \
                 increased) and writes the updated ratings to stdout as JSON."
)]
struct Args {
    /// Rating period file
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "dry_run",
        help = "Path to the rating period file (JSON format)"
    )]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Tau override
    #[arg(long, value_name = "TAU", help = "Override the volatility constraint tau")]
    tau: Option<f64>,

    /// Initial volatility override
    #[arg(
        long,
        value_name = "SIGMA",
        help = "Override the volatility given to players without one"
    )]
    volatility: Option<f64>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Pretty-print the output
    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without rating anything")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
///
/// Logs go to stderr so stdout carries only the JSON output.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(tau) = args.tau {
        config.rating.tau = tau;
    }

    if let Some(volatility) = args.volatility {
        config.rating.default_volatility = volatility;
    }

    validate_config(&config)?;
    Ok(config)
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let engine = Glicko2Engine::new(config.rating.clone())?;

    let Some(input_path) = &args.input else {
        return Ok(());
    };

    let contents = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read period file {}", input_path.display()))?;
    let input = PeriodInput::from_json(&contents)?;
    let mut loaded = input.load(&engine)?;

    info!(
        "Loaded {} players and {} results from {}",
        loaded.roster.len(),
        loaded.period.len(),
        input_path.display()
    );

    let standings = loaded.run(&engine)?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&standings)?
    } else {
        serde_json::to_string(&standings)?
    };
    println!("{}", output);

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} v{}: tau={}, default volatility={}",
        config.service.name,
        glicko2_period::VERSION,
        config.rating.tau,
        config.rating.default_volatility
    );

    if args.dry_run {
        Glicko2Engine::new(config.rating.clone())?;
        info!("Configuration validation successful");
        return Ok(());
    }

    if let Err(e) = run(&args, &config) {
        error!("Rating period failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
