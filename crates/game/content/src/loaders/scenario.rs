//! Battle scenario loader.
//!
//! A scenario is a named [`StaticBattlefield`]: the combatants with their
//! abilities, blocked sight lines, the time mode and the game clock.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use squad_core::StaticBattlefield;

use crate::loaders::{LoadResult, read_file};

/// A battlefield description loaded from RON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub battlefield: StaticBattlefield,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and validate a scenario file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    /// Parse and validate scenario text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Self::validate(&scenario)?;

        tracing::debug!(
            "Loaded scenario '{}' ({} combatants)",
            scenario.name,
            scenario.battlefield.combatants.len()
        );
        Ok(scenario)
    }

    /// Rejects battlefields the decision core cannot reason about.
    pub fn validate(scenario: &Scenario) -> LoadResult<()> {
        let battlefield = &scenario.battlefield;
        let mut seen = HashSet::new();

        for combatant in &battlefield.combatants {
            let unit = &combatant.unit;
            if !seen.insert(unit.id) {
                anyhow::bail!("duplicate unit id {}", unit.id);
            }
            if !unit.position.is_finite() {
                anyhow::bail!("unit {} has non-finite position {}", unit.id, unit.position);
            }
            if unit.max_hp <= 0 {
                anyhow::bail!("unit {} has max_hp {}", unit.id, unit.max_hp);
            }
            if !(unit.speed.is_finite() && unit.speed >= 0.0) {
                anyhow::bail!("unit {} has speed {}", unit.id, unit.speed);
            }
            for ability in &combatant.abilities {
                if !(ability.range.is_finite() && ability.range >= 0.0) {
                    anyhow::bail!(
                        "unit {}: {} has range {}",
                        unit.id,
                        ability.handle,
                        ability.range
                    );
                }
            }
        }

        for (a, b) in &battlefield.blocked_sight {
            if !seen.contains(a) || !seen.contains(b) {
                anyhow::bail!("blocked sight line {} - {} names an unknown unit", a, b);
            }
        }

        if !(battlefield.retreat_secs.is_finite() && battlefield.retreat_secs >= 0.0) {
            anyhow::bail!("retreat_secs must be a non-negative number");
        }
        Ok(())
    }
}
