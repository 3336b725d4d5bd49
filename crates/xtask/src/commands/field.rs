//! Render the influence field of a scenario
//!
//! Prints an ASCII threat map from one side's point of view, with the
//! combatants, the frontline and the safe zones overlaid.

use anyhow::Result;
use clap::Parser;
use console::style;

use squad_core::{Faction, Position, UnitView, WorldOracle};
use squad_tactics::InfluenceField;

use crate::utils::ContentArgs;

const SHADES: &[u8] = b" .:-=+*#%@";

/// Render the threat map
#[derive(Parser)]
pub struct Field {
    #[command(flatten)]
    content: ContentArgs,

    /// Faction whose enemies project threat
    #[arg(long, value_name = "FACTION", default_value_t = 0)]
    side: u8,

    /// World units per character
    #[arg(long, value_name = "UNITS", default_value_t = 1.0)]
    step: f32,

    /// Margin around the combatants, in world units
    #[arg(long, value_name = "UNITS", default_value_t = 6.0)]
    margin: f32,
}

impl Field {
    pub fn execute(self) -> Result<()> {
        let (scenario, config) = self.content.load()?;
        if !(self.step.is_finite() && self.step > 0.0) {
            anyhow::bail!("--step must be a positive number");
        }

        let side = Faction(self.side);
        let living = scenario.battlefield.living_units()?;
        let (allies, enemies): (Vec<UnitView>, Vec<UnitView>) = living
            .into_iter()
            .partition(|u| !u.faction.is_hostile_to(side));

        let field = InfluenceField::build(&enemies, &allies, &config);
        println!(
            "{} {} (side {}: {} allies, {} enemies)",
            style("Scenario:").bold().cyan(),
            scenario.name,
            self.side,
            allies.len(),
            enemies.len()
        );
        if !field.is_valid() {
            println!("Field is invalid: both sides need at least one living unit.");
            return Ok(());
        }

        let Some((min, max)) = bounds(allies.iter().chain(&enemies), self.margin) else {
            return Ok(());
        };
        let cols = ((max.x - min.x) / self.step).ceil() as usize + 1;
        let rows = ((max.y - min.y) / self.step).ceil() as usize + 1;

        let samples: Vec<f32> = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| field.threat_at(cell(min, max, r, c, self.step)))
            .collect();
        let peak = samples.iter().copied().fold(0.0_f32, f32::max);

        let mut canvas: Vec<Vec<char>> = samples
            .chunks(cols)
            .map(|row| row.iter().map(|&t| shade(t, peak)).collect())
            .collect();

        let mut mark = |pos: Position, glyph: char| {
            let c = ((pos.x - min.x) / self.step).round();
            let r = ((max.y - pos.y) / self.step).round();
            if c >= 0.0 && r >= 0.0 && (c as usize) < cols && (r as usize) < rows {
                canvas[r as usize][c as usize] = glyph;
            }
        };
        for zone in field.safe_zones() {
            mark(*zone, 'S');
        }
        mark(field.frontline(), 'F');
        for ally in &allies {
            mark(ally.position, 'A');
        }
        for enemy in &enemies {
            mark(enemy.position, 'E');
        }

        for row in canvas {
            println!("|{}|", row.into_iter().collect::<String>());
        }
        println!();
        println!(
            "A ally  E enemy  F frontline ({:.1}, {:.1})  S safe zone  peak threat {:.3}",
            field.frontline().x,
            field.frontline().y,
            peak
        );
        Ok(())
    }
}

fn bounds<'a>(
    units: impl Iterator<Item = &'a UnitView>,
    margin: f32,
) -> Option<(Position, Position)> {
    let mut bounds: Option<(Position, Position)> = None;
    for pos in units.map(|u| u.position) {
        bounds = Some(match bounds {
            None => (pos, pos),
            Some((lo, hi)) => (
                Position::new(lo.x.min(pos.x), lo.y.min(pos.y)),
                Position::new(hi.x.max(pos.x), hi.y.max(pos.y)),
            ),
        });
    }
    bounds.map(|(lo, hi)| {
        (
            Position::new(lo.x - margin, lo.y - margin),
            Position::new(hi.x + margin, hi.y + margin),
        )
    })
}

// rows run top to bottom, so y decreases with r
fn cell(min: Position, max: Position, r: usize, c: usize, step: f32) -> Position {
    Position::new(min.x + c as f32 * step, max.y - r as f32 * step)
}

fn shade(threat: f32, peak: f32) -> char {
    if peak <= 0.0 {
        return ' ';
    }
    // square root spreads the inverse-square falloff over the palette
    let level = (threat / peak).clamp(0.0, 1.0).sqrt();
    let index = (level * (SHADES.len() - 1) as f32).round() as usize;
    SHADES[index.min(SHADES.len() - 1)] as char
}
