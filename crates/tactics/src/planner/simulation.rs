//! Outcome simulation for candidate sequences.
//!
//! No dice are rolled: damage is a point estimate and safety is read off the
//! influence field at the final position.

use squad_core::{
    Ability, AbilityHandle, DecisionError, DecisionResult, Position, TacticsConfig, UnitView,
};

use super::ActionSequence;
use crate::situation::Situation;

/// Upper bound on the damage estimate of a single attack.
pub const MAX_EXPECTED_DAMAGE: f32 = 30.0;
/// Damage assumed when nothing better is known.
pub const DEFAULT_DAMAGE: f32 = 5.0;
/// Average damage per caster level for spell attacks.
pub const DAMAGE_PER_CASTER_LEVEL: f32 = 3.5;

const BASE_SAFETY: f32 = 50.0;
const THREAT_PENALTY: f32 = 10.0;
const CONTROL_BONUS: f32 = 5.0;
const DISTANT_BONUS: f32 = 30.0;
const CLOSE_PENALTY: f32 = 40.0;

/// Expected damage of `ability` when used by `unit`.
///
/// Prefers the rules collaborator's estimate, then the wielded weapon, then a
/// caster-level heuristic.
pub fn expected_damage(unit: &UnitView, hint: Option<f32>) -> f32 {
    let estimate = hint
        .filter(|d| d.is_finite())
        .or(unit.weapon_damage.filter(|d| d.is_finite()))
        .or((unit.is_caster && unit.caster_level > 0)
            .then(|| unit.caster_level as f32 * DAMAGE_PER_CASTER_LEVEL))
        .unwrap_or(DEFAULT_DAMAGE);
    estimate.clamp(0.0, MAX_EXPECTED_DAMAGE)
}

/// Safety of standing at `position`, higher is safer.
pub fn expected_safety(situation: &Situation, position: Position, config: &TacticsConfig) -> f32 {
    let field = situation.field();
    let mut safety = BASE_SAFETY - field.threat_at(position) * THREAT_PENALTY
        + field.control_at(position) * CONTROL_BONUS;

    let nearest = nearest_enemy_from(situation.enemies(), position);
    if nearest >= 1.5 * config.safe_distance {
        safety += DISTANT_BONUS;
    } else if nearest < 0.5 * config.safe_distance {
        safety -= CLOSE_PENALTY;
    }
    safety
}

/// Distance from `position` to the closest enemy; `f32::MAX` when none.
pub fn nearest_enemy_from(enemies: &[UnitView], position: Position) -> f32 {
    enemies
        .iter()
        .map(|e| e.position.distance(position))
        .fold(f32::MAX, f32::min)
}

/// Fills in the derived outcome fields of `sequence`.
///
/// Fails when the outcome cannot be represented; the caller drops the
/// candidate.
pub fn simulate(
    sequence: &mut ActionSequence,
    situation: &Situation,
    attacks: &[Ability],
    config: &TacticsConfig,
) -> DecisionResult<()> {
    if !sequence.final_position.is_finite() {
        return Err(DecisionError::malformed(
            "simulation",
            format!("{} ends at {}", sequence.kind, sequence.final_position),
        ));
    }

    sequence.expected_damage = sequence
        .attack()
        .map(|(ability, _)| expected_damage(situation.unit(), ability_hint(attacks, ability)))
        .unwrap_or(0.0);

    let mut safety = expected_safety(situation, sequence.final_position, config);
    if !safety.is_finite() {
        return Err(DecisionError::malformed(
            "simulation",
            format!("safety {} at {}", safety, sequence.final_position),
        ));
    }
    sequence.exposed = is_exposed(sequence, situation, config);
    if sequence.exposed {
        // still within reach of the enemy: no safer than standing still
        safety = safety.min(expected_safety(situation, situation.unit().position, config));
    }
    sequence.expected_safety = safety;
    Ok(())
}

/// An attack that leaves an endangered unit inside the safe distance.
pub fn is_exposed(
    sequence: &ActionSequence,
    situation: &Situation,
    config: &TacticsConfig,
) -> bool {
    situation.in_danger()
        && sequence.attack().is_some()
        && nearest_enemy_from(situation.enemies(), sequence.final_position) < config.safe_distance
}

fn ability_hint(attacks: &[Ability], handle: AbilityHandle) -> Option<f32> {
    attacks
        .iter()
        .find(|a| a.handle == handle)
        .and_then(|a| a.expected_damage)
}
