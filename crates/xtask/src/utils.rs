//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use squad_content::{ConfigLoader, ContentFactory, Scenario, ScenarioLoader};
use squad_core::TacticsConfig;

/// Where scenario and config files come from.
#[derive(Args)]
pub struct ContentArgs {
    /// Scenario name under `<data-dir>/scenarios/`, or a path to a `.ron` file
    #[arg(value_name = "SCENARIO")]
    pub scenario: String,

    /// Custom data directory (defaults to $SQUAD_DATA_DIR, then the bundled data)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Tactics configuration file (defaults to `<data-dir>/config.toml`)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ContentArgs {
    pub fn factory(&self) -> ContentFactory {
        factory(self.data_dir.as_deref())
    }

    pub fn load(&self) -> Result<(Scenario, TacticsConfig)> {
        let factory = self.factory();

        let scenario = if self.scenario.ends_with(".ron") {
            ScenarioLoader::load(Path::new(&self.scenario))?
        } else {
            factory
                .load_scenario(&self.scenario)
                .with_context(|| format!("Unknown scenario '{}'", self.scenario))?
        };

        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };

        Ok((scenario, config))
    }
}

/// Data directory from the flag, then `$SQUAD_DATA_DIR`, then the bundled data.
pub fn factory(data_dir: Option<&Path>) -> ContentFactory {
    match data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => match std::env::var_os("SQUAD_DATA_DIR") {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        },
    }
}
