//! In-memory oracle bundle backed by a static battlefield description.
//!
//! Used by scenario files, the xtask binary and tests. Every oracle trait is
//! answered from plain data:
//!
//! - **World**: the combatant list, in declaration order
//! - **Abilities**: each combatant's loadout
//! - **Targeting**: straight-line range check plus explicit blocked sight lines
//! - **Retreat**: straight line away from the enemy centroid, capped by speed

use crate::ability::Ability;
use crate::error::{DecisionError, DecisionResult};
use crate::unit::{Position, UnitId, UnitView};

use super::{AbilityOracle, RetreatOracle, TargetingOracle, TimeMode, WorldOracle};

/// A unit together with the abilities it can use this cycle.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Combatant {
    pub unit: UnitView,
    pub abilities: Vec<Ability>,
}

impl Combatant {
    pub fn new(unit: UnitView) -> Self {
        Self {
            unit,
            abilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }
}

/// Static battlefield implementing every decision oracle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaticBattlefield {
    pub combatants: Vec<Combatant>,
    /// Unordered pairs of units that cannot see each other.
    pub blocked_sight: Vec<(UnitId, UnitId)>,
    pub time_mode: TimeMode,
    /// Game clock, in seconds.
    pub clock: f32,
    /// Seconds of movement a retreat suggestion may cover.
    pub retreat_secs: f32,
}

impl StaticBattlefield {
    pub const DEFAULT_RETREAT_SECS: f32 = 3.0;

    pub fn new() -> Self {
        Self {
            combatants: Vec::new(),
            blocked_sight: Vec::new(),
            time_mode: TimeMode::TurnBased,
            clock: 0.0,
            retreat_secs: Self::DEFAULT_RETREAT_SECS,
        }
    }

    #[must_use]
    pub fn with_combatant(mut self, combatant: Combatant) -> Self {
        self.combatants.push(combatant);
        self
    }

    /// Adds a unit with no abilities.
    #[must_use]
    pub fn with_unit(self, unit: UnitView) -> Self {
        self.with_combatant(Combatant::new(unit))
    }

    #[must_use]
    pub fn with_blocked_sight(mut self, a: UnitId, b: UnitId) -> Self {
        self.blocked_sight.push((a, b));
        self
    }

    #[must_use]
    pub fn with_time_mode(mut self, time_mode: TimeMode) -> Self {
        self.time_mode = time_mode;
        self
    }

    pub fn set_clock(&mut self, clock: f32) {
        self.clock = clock;
    }

    pub fn combatant(&self, id: UnitId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.unit.id == id)
    }

    pub fn combatant_mut(&mut self, id: UnitId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.unit.id == id)
    }

    pub fn sight_blocked(&self, a: UnitId, b: UnitId) -> bool {
        self.blocked_sight
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

impl Default for StaticBattlefield {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldOracle for StaticBattlefield {
    fn unit(&self, id: UnitId) -> DecisionResult<UnitView> {
        self.combatant(id)
            .map(|c| c.unit.clone())
            .ok_or(DecisionError::UnitNotFound(id))
    }

    fn living_units(&self) -> DecisionResult<Vec<UnitView>> {
        Ok(self
            .combatants
            .iter()
            .filter(|c| c.unit.is_alive())
            .map(|c| c.unit.clone())
            .collect())
    }

    fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    fn now(&self) -> f32 {
        self.clock
    }
}

impl AbilityOracle for StaticBattlefield {
    fn usable_abilities(&self, unit: &UnitView) -> DecisionResult<Vec<Ability>> {
        self.combatant(unit.id)
            .map(|c| c.abilities.clone())
            .ok_or(DecisionError::UnitNotFound(unit.id))
    }
}

impl TargetingOracle for StaticBattlefield {
    fn can_target(
        &self,
        caster: &UnitView,
        ability: &Ability,
        target: &UnitView,
    ) -> DecisionResult<bool> {
        if !(ability.range.is_finite() && ability.range >= 0.0) {
            return Err(DecisionError::malformed(
                "battlefield",
                format!("{} has range {}", ability.handle, ability.range),
            ));
        }
        Ok(target.is_alive()
            && caster.distance_to(target) <= ability.range
            && !self.sight_blocked(caster.id, target.id))
    }
}

impl RetreatOracle for StaticBattlefield {
    fn retreat_position(
        &self,
        unit: &UnitView,
        enemies: &[UnitView],
        safe_distance: f32,
    ) -> DecisionResult<Option<Position>> {
        let Some(enemy_centroid) = Position::centroid(enemies.iter().map(|e| e.position)) else {
            return Ok(None);
        };
        let nearest = enemies
            .iter()
            .map(|e| unit.distance_to(e))
            .fold(f32::MAX, f32::min);

        let away = (unit.position - enemy_centroid).normalized();
        if away == Position::ORIGIN {
            tracing::trace!("retreat: {} stands on the enemy centroid", unit.id);
            return Ok(None);
        }

        let wanted = (safe_distance - nearest).max(0.0);
        let step = wanted.min(unit.speed * self.retreat_secs);
        if step <= f32::EPSILON {
            return Ok(None);
        }
        Ok(Some(unit.position + away * step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Faction;

    fn battlefield() -> StaticBattlefield {
        StaticBattlefield::new()
            .with_combatant(
                Combatant::new(
                    UnitView::new(UnitId(1), Faction::PARTY, Position::new(0.0, 0.0))
                        .with_speed(10.0),
                )
                .with_ability(Ability::attack(1, 10.0)),
            )
            .with_unit(UnitView::new(UnitId(2), Faction::HOSTILE, Position::new(5.0, 0.0)))
            .with_unit(
                UnitView::new(UnitId(3), Faction::HOSTILE, Position::new(0.0, 5.0)).with_hp(0, 10),
            )
            .with_unit(UnitView::new(UnitId(4), Faction::PARTY, Position::new(-2.0, 0.0)))
    }

    #[test]
    fn enemies_and_allies_skip_dead_and_self() {
        let field = battlefield();
        let me = field.unit(UnitId(1)).unwrap();

        let enemies = field.enemies_of(&me).unwrap();
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, UnitId(2));

        let allies = field.allies_of(&me).unwrap();
        assert_eq!(allies.len(), 1);
        assert_eq!(allies[0].id, UnitId(4));
    }

    #[test]
    fn unknown_unit_is_reported() {
        let field = battlefield();
        assert_eq!(
            field.unit(UnitId(99)),
            Err(DecisionError::UnitNotFound(UnitId(99)))
        );
    }

    #[test]
    fn blocked_sight_prevents_targeting() {
        let field = battlefield().with_blocked_sight(UnitId(2), UnitId(1));
        let me = field.unit(UnitId(1)).unwrap();
        let enemy = field.unit(UnitId(2)).unwrap();
        let ability = Ability::attack(1, 10.0);
        assert_eq!(field.can_target(&me, &ability, &enemy), Ok(false));
    }

    #[test]
    fn retreat_moves_away_from_enemies() {
        let field = battlefield();
        let me = field.unit(UnitId(1)).unwrap();
        let enemies = field.enemies_of(&me).unwrap();

        let point = field.retreat_position(&me, &enemies, 15.0).unwrap().unwrap();
        assert!(point.x < 0.0);
        assert!((point.distance(enemies[0].position) - 15.0).abs() < 1e-4);
    }

    #[test]
    fn retreat_is_none_when_already_safe() {
        let field = battlefield();
        let me = field.unit(UnitId(1)).unwrap();
        let enemies = field.enemies_of(&me).unwrap();
        assert_eq!(field.retreat_position(&me, &enemies, 3.0), Ok(None));
    }
}
