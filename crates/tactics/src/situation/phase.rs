//! Combat phase classification.

use squad_core::UnitView;

/// Coarse state of the encounter, derived from HP totals and head counts.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatPhase {
    /// Both sides essentially untouched.
    Opening,
    #[default]
    Midgame,
    /// The party is losing.
    Desperate,
    /// The enemy is nearly beaten.
    Cleanup,
}

fn average_hp_fraction<'a>(units: impl IntoIterator<Item = &'a UnitView>) -> Option<f32> {
    let (sum, count) = units
        .into_iter()
        .fold((0.0f32, 0usize), |(sum, n), u| (sum + u.hp_fraction(), n + 1));
    (count > 0).then(|| sum / count as f32)
}

impl CombatPhase {
    /// Classifies the encounter from `unit`'s point of view.
    ///
    /// `allies` excludes `unit`. Rules are checked in order; the first match
    /// wins:
    ///
    /// 1. **Desperate**: own HP < 25%, party average < 35%, or outnumbered 2:1
    /// 2. **Cleanup**: at most one enemy left, enemy average < 30%, or the
    ///    party outnumbers the enemy 2:1 while the enemy average is < 50%
    /// 3. **Opening**: both averages ≥ 90%
    /// 4. **Midgame** otherwise
    pub fn assess(unit: &UnitView, enemies: &[UnitView], allies: &[UnitView]) -> Self {
        let party_size = allies.len() + 1;
        let party_hp = average_hp_fraction(std::iter::once(unit).chain(allies)).unwrap_or(1.0);
        let enemy_hp = average_hp_fraction(enemies).unwrap_or(0.0);

        if unit.hp_fraction() < 0.25 || party_hp < 0.35 || enemies.len() >= 2 * party_size {
            return Self::Desperate;
        }
        if enemies.len() <= 1
            || enemy_hp < 0.30
            || (party_size >= 2 * enemies.len() && enemy_hp < 0.50)
        {
            return Self::Cleanup;
        }
        if enemy_hp >= 0.90 && party_hp >= 0.90 {
            return Self::Opening;
        }
        Self::Midgame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_core::{Faction, Position, UnitId};

    fn unit(id: u32, faction: Faction, hp: i32) -> UnitView {
        UnitView::new(UnitId(id), faction, Position::ORIGIN).with_hp(hp, 100)
    }

    fn enemies(hps: &[i32]) -> Vec<UnitView> {
        hps.iter()
            .enumerate()
            .map(|(i, &hp)| unit(10 + i as u32, Faction::HOSTILE, hp))
            .collect()
    }

    #[test]
    fn fresh_fight_is_opening() {
        let me = unit(1, Faction::PARTY, 100);
        let allies = [unit(2, Faction::PARTY, 95)];
        assert_eq!(
            CombatPhase::assess(&me, &enemies(&[100, 100]), &allies),
            CombatPhase::Opening
        );
    }

    #[test]
    fn low_own_hp_is_desperate() {
        let me = unit(1, Faction::PARTY, 20);
        let allies = [unit(2, Faction::PARTY, 100)];
        assert_eq!(
            CombatPhase::assess(&me, &enemies(&[100, 100]), &allies),
            CombatPhase::Desperate
        );
    }

    #[test]
    fn outnumbered_is_desperate() {
        let me = unit(1, Faction::PARTY, 100);
        assert_eq!(
            CombatPhase::assess(&me, &enemies(&[100, 100]), &[]),
            CombatPhase::Desperate
        );
    }

    #[test]
    fn last_enemy_is_cleanup() {
        let me = unit(1, Faction::PARTY, 100);
        assert_eq!(
            CombatPhase::assess(&me, &enemies(&[100]), &[]),
            CombatPhase::Cleanup
        );
        assert_eq!(CombatPhase::assess(&me, &[], &[]), CombatPhase::Cleanup);
    }

    #[test]
    fn wounded_enemy_is_cleanup() {
        let me = unit(1, Faction::PARTY, 100);
        let allies = [unit(2, Faction::PARTY, 100)];
        assert_eq!(
            CombatPhase::assess(&me, &enemies(&[20, 30]), &allies),
            CombatPhase::Cleanup
        );
    }

    #[test]
    fn trading_blows_is_midgame() {
        let me = unit(1, Faction::PARTY, 70);
        let allies = [unit(2, Faction::PARTY, 60)];
        assert_eq!(
            CombatPhase::assess(&me, &enemies(&[60, 80]), &allies),
            CombatPhase::Midgame
        );
    }
}
