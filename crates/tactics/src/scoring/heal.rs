//! Heal target scoring.
//!
//! Urgency is a step function of HP percentage (<25%, <50%, <75%) plus a
//! small linear term that orders targets within a bracket.

use squad_core::{Role, UnitView};

use super::{ScoringContext, TargetScore, engaging_count};

pub const URGENCY_CRITICAL: f32 = 60.0;
pub const URGENCY_SERIOUS: f32 = 35.0;
pub const URGENCY_MINOR: f32 = 15.0;
pub const ENGAGED_ENEMY_BONUS: f32 = 8.0;

fn urgency(hp_percent: f32) -> f32 {
    if hp_percent < 25.0 {
        URGENCY_CRITICAL
    } else if hp_percent < 50.0 {
        URGENCY_SERIOUS
    } else if hp_percent < 75.0 {
        URGENCY_MINOR
    } else {
        0.0
    }
}

fn role_bonus(role: Role) -> f32 {
    match role {
        Role::Tank => 20.0,
        Role::Support => 15.0,
        Role::Dps => 5.0,
    }
}

/// Scores `target` (an ally or the healer itself) as a heal candidate.
///
/// Units at full HP or already down are never selected.
pub fn score(ctx: &ScoringContext<'_>, target: &UnitView) -> TargetScore {
    if !target.is_alive() {
        return TargetScore::never(target.id, "down");
    }
    let hp_percent = target.hp_percent();
    if hp_percent >= 100.0 {
        return TargetScore::never(target.id, "full hp");
    }

    let mut reasons = vec![format!("hp {hp_percent:.0}%")];
    let mut total = urgency(hp_percent) + (100.0 - hp_percent) * 0.2;
    total += role_bonus(target.role);

    let engaged = engaging_count(target, ctx.enemies, ctx.config.melee_reach);
    if engaged > 0 {
        total += engaged as f32 * ENGAGED_ENEMY_BONUS;
        reasons.push(format!("engaged by {engaged}"));
    }

    let distance = ctx.actor.distance_to(target);
    let overshoot = distance - ctx.config.heal_range;
    if overshoot > 0.0 {
        total -= overshoot * 2.0;
        reasons.push(format!("{overshoot:.1} out of range"));
    }

    if target.id == ctx.actor.id {
        reasons.push("self".into());
    }

    TargetScore::new(target.id, total, reasons.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::situation::CombatPhase;
    use squad_core::{Faction, Position, RangePreference, TacticsConfig, UnitId};

    fn ally(id: u32, x: f32, hp: i32) -> UnitView {
        UnitView::new(UnitId(id), Faction::PARTY, Position::new(x, 0.0)).with_hp(hp, 100)
    }

    fn ctx<'a>(
        actor: &'a UnitView,
        enemies: &'a [UnitView],
        config: &'a TacticsConfig,
    ) -> ScoringContext<'a> {
        ScoringContext {
            actor,
            allies: &[],
            enemies,
            hittable: &[],
            phase: CombatPhase::Midgame,
            config,
        }
    }

    #[test]
    fn full_hp_is_never_selectable() {
        let config = TacticsConfig::default();
        let healer = ally(1, 0.0, 100);
        let c = ctx(&healer, &[], &config);
        assert!(!score(&c, &ally(2, 3.0, 100)).is_selectable());
        assert!(!score(&c, &ally(3, 3.0, 0)).is_selectable());
        assert!(score(&c, &ally(4, 3.0, 99)).is_selectable());
    }

    #[test]
    fn urgency_brackets_dominate() {
        let config = TacticsConfig::default();
        let healer = ally(1, 0.0, 100);
        let c = ctx(&healer, &[], &config);

        let critical = score(&c, &ally(2, 3.0, 20)).score;
        let serious = score(&c, &ally(3, 3.0, 45)).score;
        let minor = score(&c, &ally(4, 3.0, 70)).score;
        let scratched = score(&c, &ally(5, 3.0, 90)).score;
        assert!(critical > serious && serious > minor && minor > scratched);
    }

    #[test]
    fn tanks_are_preferred_at_equal_hp() {
        let config = TacticsConfig::default();
        let healer = ally(1, 0.0, 100);
        let c = ctx(&healer, &[], &config);

        let tank = ally(2, 3.0, 40).with_role(Role::Tank, RangePreference::Melee);
        let dps = ally(3, 3.0, 40);
        assert!(score(&c, &tank).score > score(&c, &dps).score);
    }

    #[test]
    fn engaged_allies_and_range_matter() {
        let config = TacticsConfig::default();
        let healer = ally(1, 0.0, 100);
        let enemies = [UnitView::new(UnitId(9), Faction::HOSTILE, Position::new(4.0, 0.0))];
        let c = ctx(&healer, &enemies, &config);

        let engaged = score(&c, &ally(2, 3.0, 40));
        let quiet = score(&c, &ally(3, -3.0, 40));
        assert!(engaged.score > quiet.score);
        assert!(engaged.reason.contains("engaged by 1"));

        let far = score(&c, &ally(4, -30.0, 40));
        assert!(quiet.score > far.score);
    }
}
