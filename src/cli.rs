//! Command-line interface for SaberDuel
//!
//! The simulation runs headless; the flags choose the duel configuration.

use clap::Parser;
use std::path::PathBuf;

use crate::headless::HeadlessDuelConfig;

/// Lightsaber duel simulator
#[derive(Parser, Debug)]
#[command(name = "saberduel")]
#[command(about = "Lightsaber duel simulator")]
#[command(version)]
pub struct Args {
    /// Run the duel described by this JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Random seed for a reproducible duel (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum duel duration in seconds (overrides the config file)
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// RON tuning file (overrides the config file)
    #[arg(long, value_name = "TUNING_FILE")]
    pub tuning: Option<PathBuf>,
}

impl Args {
    /// Build the duel configuration: the config file if given, then flag overrides.
    pub fn duel_config(&self) -> Result<HeadlessDuelConfig, String> {
        let mut config = match &self.headless {
            Some(path) => HeadlessDuelConfig::load_from_file(path)?,
            None => HeadlessDuelConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.random_seed = Some(seed);
        }
        if let Some(max_duration) = self.max_duration {
            config.max_duration_secs = max_duration;
        }
        if let Some(tuning) = &self.tuning {
            config.tuning_path = Some(tuning.display().to_string());
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
