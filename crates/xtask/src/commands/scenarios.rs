//! List available scenarios

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::utils;

/// List scenarios in the data directory
#[derive(Parser)]
pub struct Scenarios {
    /// Custom data directory (defaults to $SQUAD_DATA_DIR, then the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Scenarios {
    pub fn execute(self) -> Result<()> {
        let factory = utils::factory(self.data_dir.as_deref());
        println!(
            "{} {}",
            style("Data directory:").bold().cyan(),
            factory.data_dir().display()
        );

        for name in factory.scenario_names()? {
            match factory.load_scenario(&name) {
                Ok(scenario) => println!(
                    "  {:<16} {:>2} units  {}",
                    style(&name).green(),
                    scenario.battlefield.combatants.len(),
                    scenario.description
                ),
                Err(err) => println!("  {:<16} {}", style(&name).red(), err),
            }
        }
        Ok(())
    }
}
