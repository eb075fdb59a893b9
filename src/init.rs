//! Startup: reads the command line (and an optional config file) into a validated [LiftConfig].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::config::LiftConfig;
use crate::error::LiftError;
use crate::print;

/// Single-car elevator simulator.
///
/// Reads commands from stdin, one per line: `m <floor>`, `cu <floor>`, `cd <floor>`.
#[derive(Parser, Debug)]
#[command(
    name = "elevatorsim",
    version,
    about = "Single-car elevator simulator",
    after_help = "Commands on stdin: m <floor> | cu <floor> | cd <floor>   (floors are 1-based)"
)]
pub struct Cli {
    /// Number of floors, 5 to 20
    #[arg(short = 'c', long, allow_negative_numbers = true)]
    pub floor_count: Option<i64>,

    /// Distance between floors
    #[arg(short = 'f', long, allow_negative_numbers = true)]
    pub floor_height: Option<f64>,

    /// Car speed
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Seconds the doors stay open
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub doors_delay: Option<f64>,

    /// JSON file with any of floor_count, floor_height, speed, doors_delay. Flags win over the file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only print events, warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Only print events and errors
    #[arg(long)]
    pub debug: bool,
}

/// Config values as read from a file; each one may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    floor_count: Option<i64>,
    floor_height: Option<f64>,
    speed: Option<f64>,
    doors_delay: Option<f64>,
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, LiftError> {
    value.ok_or_else(|| LiftError::InvalidConfiguration(format!("Missing {}.", name)))
}

impl Cli {
    /// Merges flags over the config file and validates the result.
    ///
    /// ## Returns
    /// The validated config, or what was wrong with it.
    pub fn resolve(&self) -> Result<LiftConfig> {
        let file = match &self.config {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };

        let floor_count = required(self.floor_count.or(file.floor_count), "floor count")?;
        let config = LiftConfig {
            // anything that does not fit is out of range anyway
            floor_count: usize::try_from(floor_count).unwrap_or(0),
            floor_height: required(self.floor_height.or(file.floor_height), "floor height")?,
            speed: required(self.speed.or(file.speed), "speed")?,
            doors_delay: required(self.doors_delay.or(file.doors_delay), "doors delay")?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// ### Reads arguments from the command line
///
/// Sets the print levels and resolves the lift config.
/// clap exits with status 2 by itself on unknown or unparsable options.
pub fn parse_args() -> Result<LiftConfig> {
    let cli = Cli::parse();
    print::configure(cli.quiet, cli.debug);
    cli.resolve()
}

/// Usage line printed together with configuration errors.
pub fn usage() -> String {
    "usage: elevatorsim -c <floor_count> -f <floor_height> -s <speed> -d <doors_delay>".to_string()
}
