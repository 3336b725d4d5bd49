//! Debuff target scoring.
//!
//! Immunity and already-applied effects short-circuit to
//! [`SENTINEL_SCORE`](super::SENTINEL_SCORE) before anything else is
//! computed, so no combination of other factors can select such a target.

use squad_core::{Ability, UnitView};

use super::{ScoringContext, TargetScore, attack::threat_level};
use crate::situation::CombatPhase;

pub const BASE_SCORE: f32 = 40.0;
pub const WEAKEST_SAVE_BONUS: f32 = 25.0;

/// Multiplier applied to the final debuff score in each phase.
pub const fn phase_multiplier(phase: CombatPhase) -> f32 {
    match phase {
        CombatPhase::Opening => 1.5,
        CombatPhase::Midgame => 1.0,
        CombatPhase::Desperate => 1.2,
        CombatPhase::Cleanup => 0.5,
    }
}

/// Scores `target` as a candidate for `ability`.
pub fn score(ctx: &ScoringContext<'_>, ability: &Ability, target: &UnitView) -> TargetScore {
    let immune = target.immunities.intersection(ability.cc);
    if !immune.is_empty() {
        return TargetScore::never(target.id, format!("immune to {immune:?}"))
            .with_ability(ability.handle);
    }
    let active = target.active_effects.intersection(ability.cc);
    if !active.is_empty() {
        return TargetScore::never(target.id, format!("already has {active:?}"))
            .with_ability(ability.handle);
    }

    let mut reasons = Vec::new();
    let mut total = BASE_SCORE;

    total += threat_level(target, ctx) * 20.0;
    // healthy targets stay dangerous longer
    total += target.hp_fraction() * 20.0;

    let (weakest, _) = target.saves.weakest();
    let targeted = ability.save.unwrap_or(weakest);
    let save_value = target.saves.get(targeted);
    if ability.save == Some(weakest) {
        total += WEAKEST_SAVE_BONUS;
        reasons.push(format!("weak {weakest}"));
    }
    total += ((15 - save_value).max(0) as f32 * 1.5).min(20.0);

    let overshoot = ctx.actor.distance_to(target) - ability.range;
    if overshoot > 0.0 {
        total -= overshoot;
        reasons.push(format!("{overshoot:.1} out of range"));
    }

    let multiplier = phase_multiplier(ctx.phase);
    total *= multiplier;
    reasons.push(format!("{} ×{multiplier}", ctx.phase));

    TargetScore::new(target.id, total, reasons.join(", ")).with_ability(ability.handle)
}
