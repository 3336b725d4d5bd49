//! Candidate sequence generation.
//!
//! Order is fixed: [`Skip`](SequenceKind::Skip) first (when allowed), then one
//! attack candidate per reachable ability in the order given, then the retreat
//! candidate. Selection relies on this order for tie-breaking.
//!
//! An ability whose target is farther than `movement budget + effective range`
//! never appears in any candidate.

use squad_core::{
    Ability, DecisionEnv, DecisionError, DecisionResult, Position, Role, TacticsConfig, UnitView,
};

use super::{ActionSequence, PlannedAction, SequenceKind};
use crate::situation::Situation;

/// Distance the unit can cover this cycle; zero once the move action is spent.
pub fn movement_budget(situation: &Situation, config: &TacticsConfig) -> f32 {
    if !situation.economy().can_move() {
        return 0.0;
    }
    let budget = situation.unit().speed * config.move_timings.secs_for(situation.time_mode());
    if budget.is_finite() { budget.max(0.0) } else { 0.0 }
}

/// Distance from `target` at which `ability` connects.
///
/// Falls back to the nominal range when the targeting oracle fails.
pub fn effective_range(
    env: DecisionEnv<'_>,
    caster: &UnitView,
    ability: &Ability,
    target: &UnitView,
) -> DecisionResult<f32> {
    let range = match env.targeting().approach_distance(caster, ability, target) {
        Ok(range) => range,
        Err(err) => {
            tracing::debug!("effective range of {}: {}; using nominal range", ability.handle, err);
            ability.range
        }
    };
    if range.is_finite() && range >= 0.0 {
        Ok(range)
    } else {
        Err(DecisionError::malformed(
            "targeting",
            format!("{} has range {}", ability.handle, range),
        ))
    }
}

/// Skip is only on the table for ranged damage dealers and supports that are
/// already in trouble.
pub fn skip_allowed(situation: &Situation, role: Role) -> bool {
    situation.unit().range_preference.is_ranged()
        && situation.in_danger()
        && matches!(role, Role::Support | Role::Dps)
}

/// All feasible candidates against `target`, unevaluated.
pub fn generate(
    env: DecisionEnv<'_>,
    config: &TacticsConfig,
    situation: &Situation,
    attacks: &[Ability],
    target: &UnitView,
    role: Role,
) -> Vec<ActionSequence> {
    let unit = situation.unit();
    let mut candidates = Vec::new();

    if skip_allowed(situation, role) {
        candidates.push(ActionSequence::skip(unit.position));
    }

    if !situation.economy().can_attack() || !target.is_alive() {
        return candidates;
    }

    let budget = movement_budget(situation, config);
    for ability in attacks {
        match approach(env, unit, ability, target, budget) {
            Ok(candidate) => candidates.push(candidate),
            Err(err) => tracing::trace!("  drop {} on {}: {}", ability.handle, target.id, err),
        }
    }

    if unit.range_preference.is_ranged()
        && situation.economy().can_move()
        && situation.nearest_enemy_distance() < config.safe_distance
    {
        if let Some(candidate) = retreat_then_attack(env, config, situation, attacks, target) {
            candidates.push(candidate);
        }
    }

    candidates
}

/// Direct attack when already in range, otherwise the shortest move that
/// brings the target into range.
fn approach(
    env: DecisionEnv<'_>,
    unit: &UnitView,
    ability: &Ability,
    target: &UnitView,
    budget: f32,
) -> DecisionResult<ActionSequence> {
    let reach = effective_range(env, unit, ability, target)?;
    let distance = unit.distance_to(target);
    let attack = PlannedAction::Attack {
        ability: ability.handle,
        target: target.id,
    };

    if distance <= reach {
        return Ok(ActionSequence::new(
            SequenceKind::DirectAttack,
            vec![attack],
            unit.position,
        ));
    }

    let needed = distance - reach;
    if needed > budget {
        return Err(DecisionError::Unreachable {
            ability: ability.handle,
            target: target.id,
            distance,
            reach: reach + budget,
        });
    }

    let destination = unit.position.step_towards(target.position, needed);
    Ok(ActionSequence::new(
        SequenceKind::MoveThenAttack,
        vec![PlannedAction::Move(destination), attack],
        destination,
    ))
}

/// Falls back to the retreat oracle's point and attacks from there with the
/// first ability that still reaches.
fn retreat_then_attack(
    env: DecisionEnv<'_>,
    config: &TacticsConfig,
    situation: &Situation,
    attacks: &[Ability],
    target: &UnitView,
) -> Option<ActionSequence> {
    let unit = situation.unit();
    let retreat = match env
        .retreat()
        .retreat_position(unit, situation.enemies(), config.safe_distance)
    {
        Ok(Some(point)) if point.is_finite() => point,
        Ok(Some(point)) => {
            tracing::warn!("retreat oracle returned non-finite point {}", point);
            return None;
        }
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!("retreat oracle failed: {}", err);
            return None;
        }
    };

    let moved = UnitView {
        position: retreat,
        ..unit.clone()
    };
    let ability = attacks.iter().find(|ability| {
        effective_range(env, &moved, ability, target)
            .is_ok_and(|reach| retreat.distance(target.position) <= reach)
    })?;

    Some(retreating(retreat, ability, target))
}

fn retreating(retreat: Position, ability: &Ability, target: &UnitView) -> ActionSequence {
    ActionSequence::new(
        SequenceKind::RetreatThenAttack,
        vec![
            PlannedAction::Move(retreat),
            PlannedAction::Attack {
                ability: ability.handle,
                target: target.id,
            },
        ],
        retreat,
    )
}
