//! Run the decision core on a scenario
//!
//! Builds a snapshot, picks targets and plans a sequence for one or every
//! party unit, then prints the result.

use anyhow::Result;
use clap::Parser;
use console::style;

use squad_core::{DecisionEnv, Faction, UnitId, WorldOracle};
use squad_tactics::{Decision, FieldCache, TacticalBrain};

use crate::utils::ContentArgs;

/// Run one decision cycle
#[derive(Parser)]
pub struct Decide {
    #[command(flatten)]
    content: ContentArgs,

    /// Unit to decide for (defaults to every living party member)
    #[arg(short, long, value_name = "ID")]
    unit: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One block per unit
    Summary,
    /// Full JSON output
    Json,
}

impl Decide {
    pub fn execute(self) -> Result<()> {
        let (scenario, config) = self.content.load()?;
        let battlefield = &scenario.battlefield;
        let brain = TacticalBrain::new(DecisionEnv::from_bundle(battlefield), &config);

        let units: Vec<UnitId> = match self.unit {
            Some(id) => vec![UnitId(id)],
            None => battlefield
                .living_units()?
                .into_iter()
                .filter(|u| u.faction == Faction::PARTY)
                .map(|u| u.id)
                .collect(),
        };

        // one cache for the whole round, as a controller would keep it
        let mut cache = FieldCache::new();
        let decisions: Vec<Decision> = units
            .into_iter()
            .map(|id| brain.decide(id, None, &mut cache))
            .collect();

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} {} ({})",
                    style("Scenario:").bold().cyan(),
                    scenario.name,
                    battlefield.time_mode
                );
                if !scenario.description.is_empty() {
                    println!("  {}", scenario.description);
                }
                println!();
                for decision in &decisions {
                    print_summary(battlefield, decision);
                }
                let stats = cache.stats();
                println!(
                    "{} {} rebuilds, {} hits",
                    style("Field cache:").bold().cyan(),
                    stats.rebuilds,
                    stats.hits
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&decisions)?);
            }
        }

        Ok(())
    }
}

fn print_summary(battlefield: &squad_core::StaticBattlefield, decision: &Decision) {
    let name = battlefield
        .combatant(decision.unit)
        .map(|c| c.unit.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("?");
    println!(
        "{}",
        style(format!("=== {} {} ===", decision.unit, name))
            .bold()
            .green()
    );
    println!(
        "  Phase: {}  In danger: {}",
        decision.phase,
        if decision.in_danger {
            style("yes").red().to_string()
        } else {
            "no".to_string()
        }
    );

    match &decision.target {
        Some(target) => println!(
            "  Target: {} (score {:.1}: {})",
            target.target, target.score, target.reason
        ),
        None => println!("  Target: none"),
    }
    if let Some(heal) = &decision.heal {
        println!("  Heal: {} (score {:.1})", heal.target, heal.score);
    }
    if let Some(debuff) = &decision.debuff {
        let ability = debuff
            .ability
            .map(|a| a.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  Debuff: {} with {} (score {:.1})",
            debuff.target, ability, debuff.score
        );
    }

    match &decision.sequence {
        Some(sequence) => println!("  {} {}", style("Plan:").bold().yellow(), sequence),
        None => println!("  {} no action", style("Plan:").bold().yellow()),
    }
    for diagnostic in &decision.diagnostics {
        println!(
            "  {} {} ({}): {}",
            style("degraded").red(),
            diagnostic.step,
            diagnostic.class.as_str(),
            diagnostic.message
        );
    }
    println!();
}
