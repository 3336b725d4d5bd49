//! Attack target scoring.
//!
//! ```text
//! score = 50
//!       + (100 - hp%) × 0.5          × w.hp
//!       + (-2·d [+30 melee in reach]) × w.distance
//!       + threat × 30                × w.threat
//!       + 20 (hittable)              × w.hittable
//!       + kill-confirm (+25 ≤ 20% hp, +12 ≤ 35% hp)
//!       + role priority (+15 caster, +10 healer)
//!       + armor exploit (physical only) × w.armor
//!       + flanking (+10)
//! ```

use squad_core::UnitView;

use super::{RoleWeights, ScoringContext, TargetScore};

pub const BASE_SCORE: f32 = 50.0;
pub const MELEE_PROXIMITY_BONUS: f32 = 30.0;
pub const HITTABLE_BONUS: f32 = 20.0;
pub const KILL_CONFIRM_CERTAIN: f32 = 25.0;
pub const KILL_CONFIRM_LIKELY: f32 = 12.0;
pub const CASTER_PRIORITY: f32 = 15.0;
pub const HEALER_PRIORITY: f32 = 10.0;
pub const ARMOR_EXPLOIT_CAP: f32 = 15.0;
pub const FLANKING_BONUS: f32 = 10.0;

/// Threat an enemy poses to the party, independent of its current HP.
///
/// Ranged enemies are scaled by the configured ranged multiplier; casters
/// add a flat amount on top.
pub fn threat_level(target: &UnitView, ctx: &ScoringContext<'_>) -> f32 {
    let ranged = if target.range_preference.is_ranged() {
        ctx.config.ranged_threat_multiplier
    } else {
        1.0
    };
    if target.is_caster { ranged + 0.2 } else { ranged }
}

/// Scores `target` as a direct-attack candidate for `ctx.actor`.
pub fn score(ctx: &ScoringContext<'_>, target: &UnitView) -> TargetScore {
    let actor = ctx.actor;
    let w = RoleWeights::for_unit(actor);
    let hp_fraction = target.hp_fraction();
    let hp_percent = hp_fraction * 100.0;
    let distance = actor.distance_to(target);
    let melee = actor.range_preference.is_melee();
    let mut reasons = vec![format!("hp {hp_percent:.0}%"), format!("dist {distance:.1}")];

    let mut total = BASE_SCORE;

    total += (100.0 - hp_percent) * 0.5 * w.hp;

    let mut proximity = -2.0 * distance;
    if melee && distance <= ctx.config.melee_reach {
        proximity += MELEE_PROXIMITY_BONUS;
        reasons.push("in reach".into());
    }
    total += proximity * w.distance;

    let threat = threat_level(target, ctx);
    total += threat * 30.0 * w.threat;

    if ctx.is_hittable(target.id) {
        total += HITTABLE_BONUS * w.hittable;
        reasons.push("hittable".into());
    }

    if hp_fraction <= 0.20 {
        total += KILL_CONFIRM_CERTAIN;
        reasons.push("finishing blow".into());
    } else if hp_fraction <= 0.35 {
        total += KILL_CONFIRM_LIKELY;
        reasons.push("nearly down".into());
    }

    if target.is_caster {
        total += CASTER_PRIORITY;
        reasons.push("caster".into());
        if target.is_healer {
            total += HEALER_PRIORITY;
            reasons.push("healer".into());
        }
    }

    if actor.is_physical() {
        let exploit = ((20 - target.armor_class) as f32 * 1.5).clamp(0.0, ARMOR_EXPLOIT_CAP);
        total += exploit * w.armor;
    }

    if melee && is_flanked(ctx, target) {
        total += FLANKING_BONUS;
        reasons.push("flanked".into());
    }

    TargetScore::new(target.id, total, reasons.join(", "))
}

/// Another ally is already within melee reach of `target`.
fn is_flanked(ctx: &ScoringContext<'_>, target: &UnitView) -> bool {
    ctx.allies.iter().any(|ally| {
        ally.id != ctx.actor.id
            && ally.is_alive()
            && ally.distance_to(target) <= ctx.config.melee_reach
    })
}
