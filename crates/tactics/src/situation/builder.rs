//! Fail-soft snapshot construction.
//!
//! Every sub-step (neighbour lookup, ability classification, hittability)
//! falls back to a neutral default and leaves a [`Diagnostic`] behind. Even a
//! unit the world cannot resolve yields a neutral snapshot rather than an
//! error.

use std::sync::Arc;

use squad_core::{
    Ability, ActionEconomy, DecisionEnv, DecisionError, DecisionResult, RangePreference,
    TacticsConfig, UnitId, UnitView,
};

use super::{AbilityPools, CombatPhase, Diagnostic, Situation};
use crate::influence::{Falloff, FieldCache, InfluenceField};
use crate::scoring::{ScoringContext, TargetSelector, engaging_count};

/// Collects sub-step failures while a snapshot is being built.
struct Recorder {
    unit: UnitId,
    diagnostics: Vec<Diagnostic>,
}

impl Recorder {
    fn new(unit: UnitId) -> Self {
        Self {
            unit,
            diagnostics: Vec::new(),
        }
    }

    fn note(&mut self, step: &'static str, err: &DecisionError) {
        let class = err.class().as_str();
        if err.class().is_unexpected() {
            tracing::warn!("Situation {}: {} failed ({}): {}", self.unit, step, class, err);
        } else {
            tracing::debug!("Situation {}: {} failed ({}): {}", self.unit, step, class, err);
        }
        self.diagnostics.push(Diagnostic {
            step,
            class: err.class(),
            message: err.to_string(),
        });
    }

    fn recover<T>(&mut self, step: &'static str, result: DecisionResult<T>, fallback: T) -> T {
        result.unwrap_or_else(|err| {
            self.note(step, &err);
            fallback
        })
    }
}

/// Builds [`Situation`]s from the decision environment.
pub struct SituationBuilder<'a> {
    env: DecisionEnv<'a>,
    config: &'a TacticsConfig,
}

impl<'a> SituationBuilder<'a> {
    pub fn new(env: DecisionEnv<'a>, config: &'a TacticsConfig) -> Self {
        Self { env, config }
    }

    /// Snapshots `unit_id` and its surroundings.
    ///
    /// `budget` overrides the action flags the world reports for the unit.
    /// The influence field is taken from `cache` when still fresh.
    pub fn build(
        &self,
        unit_id: UnitId,
        budget: Option<ActionEconomy>,
        cache: &mut FieldCache,
    ) -> Situation {
        let mut rec = Recorder::new(unit_id);
        match self.resolve_unit(unit_id) {
            Ok(unit) => self.build_resolved(unit, budget, cache, rec),
            Err(err) => {
                rec.note("resolve unit", &err);
                self.neutral(unit_id, budget, rec)
            }
        }
    }

    fn resolve_unit(&self, unit_id: UnitId) -> DecisionResult<UnitView> {
        let unit = self.env.world().unit(unit_id)?;
        if !unit.position.is_finite() {
            return Err(DecisionError::malformed(
                "world",
                format!("{} has position {}", unit.id, unit.position),
            ));
        }
        Ok(unit)
    }

    /// Snapshot for a unit that could not be read: no neighbours, no
    /// abilities, no field.
    fn neutral(&self, unit_id: UnitId, budget: Option<ActionEconomy>, rec: Recorder) -> Situation {
        let unit = UnitView {
            id: unit_id,
            economy: budget.unwrap_or(ActionEconomy::SPENT),
            ..UnitView::default()
        };
        Situation {
            economy: unit.economy,
            unit,
            resolved: false,
            time_mode: self.env.world().time_mode(),
            enemies: Vec::new(),
            allies: Vec::new(),
            nearest_enemy: None,
            nearest_enemy_distance: f32::MAX,
            hittable: Vec::new(),
            engaged_by: 0,
            in_danger: false,
            phase: CombatPhase::default(),
            pools: AbilityPools::default(),
            best_target: None,
            field: Arc::new(InfluenceField::invalid(Falloff::from_config(self.config))),
            diagnostics: rec.diagnostics,
        }
    }

    fn build_resolved(
        &self,
        unit: UnitView,
        budget: Option<ActionEconomy>,
        cache: &mut FieldCache,
        mut rec: Recorder,
    ) -> Situation {
        let world = self.env.world();
        let economy = budget.unwrap_or(unit.economy);

        let living = rec.recover("living units", world.living_units(), Vec::new());
        let (enemies, allies) = self.split_sides(&unit, living, &mut rec);

        let (nearest_enemy, nearest_enemy_distance) = enemies
            .iter()
            .map(|e| (e.id, unit.distance_to(e)))
            .fold((None, f32::MAX), |best, (id, d)| {
                if d < best.1 { (Some(id), d) } else { best }
            });

        let abilities = rec.recover(
            "usable abilities",
            self.env.abilities().usable_abilities(&unit),
            Vec::new(),
        );
        let pools = AbilityPools::from_abilities(abilities);

        let hittable: Vec<UnitId> = enemies
            .iter()
            .filter(|enemy| self.can_hit_now(&unit, enemy, &pools.attacks, &mut rec))
            .map(|enemy| enemy.id)
            .collect();

        let engaged_by = engaging_count(&unit, &enemies, self.config.melee_reach);
        let in_danger = self.assess_danger(&unit, nearest_enemy_distance, engaged_by);
        let phase = CombatPhase::assess(&unit, &enemies, &allies);

        let party: Vec<UnitView> = allies.iter().chain(std::iter::once(&unit)).cloned().collect();
        let field = cache.get_or_build(&enemies, &party, world.now(), self.config);

        let best_target = TargetSelector::attack(&ScoringContext {
            actor: &unit,
            allies: &allies,
            enemies: &enemies,
            hittable: &hittable,
            phase,
            config: self.config,
        });

        tracing::debug!(
            "Situation {}: enemies={} allies={} hittable={} phase={} danger={} nearest={:.1}",
            unit.id,
            enemies.len(),
            allies.len(),
            hittable.len(),
            phase,
            in_danger,
            nearest_enemy_distance
        );

        Situation {
            time_mode: world.time_mode(),
            unit,
            resolved: true,
            economy,
            enemies,
            allies,
            nearest_enemy,
            nearest_enemy_distance,
            hittable,
            engaged_by,
            in_danger,
            phase,
            pools,
            best_target,
            field,
            diagnostics: rec.diagnostics,
        }
    }

    /// Splits living units into (enemies, allies), dropping the unit itself and
    /// anyone with a non-finite position.
    fn split_sides(
        &self,
        unit: &UnitView,
        living: Vec<UnitView>,
        rec: &mut Recorder,
    ) -> (Vec<UnitView>, Vec<UnitView>) {
        let mut enemies = Vec::new();
        let mut allies = Vec::new();
        for other in living {
            if other.id == unit.id || !other.is_alive() {
                continue;
            }
            if !other.position.is_finite() {
                rec.note(
                    "living units",
                    &DecisionError::malformed(
                        "world",
                        format!("{} has position {}", other.id, other.position),
                    ),
                );
                continue;
            }
            if other.is_hostile_to(unit) {
                enemies.push(other);
            } else {
                allies.push(other);
            }
        }
        (enemies, allies)
    }

    /// Whether any attack ability reaches `enemy` without moving.
    ///
    /// When no ability gets an answer from the targeting oracle (no attack
    /// abilities, or every query failed), melee reach decides.
    fn can_hit_now(
        &self,
        unit: &UnitView,
        enemy: &UnitView,
        attacks: &[Ability],
        rec: &mut Recorder,
    ) -> bool {
        let mut answered = false;
        for ability in attacks {
            match self.env.targeting().can_target(unit, ability, enemy) {
                Ok(true) => return true,
                Ok(false) => answered = true,
                Err(err) => rec.note("hittable", &err),
            }
        }
        !answered && unit.distance_to(enemy) <= self.config.melee_reach
    }

    fn assess_danger(&self, unit: &UnitView, nearest: f32, engaged_by: usize) -> bool {
        match unit.range_preference {
            RangePreference::Ranged => engaged_by > 0 || nearest < self.config.safe_distance,
            RangePreference::Melee | RangePreference::Mixed => {
                engaged_by >= 3 && unit.hp_fraction() < self.config.low_hp_threshold
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_core::{
        AbilityOracle, Combatant, FailureClass, Faction, Position, RetreatOracle, Role,
        StaticBattlefield, TargetingOracle, WorldOracle,
    };

    fn archer(x: f32) -> UnitView {
        UnitView::new(UnitId(1), Faction::PARTY, Position::new(x, 0.0))
            .with_role(Role::Dps, RangePreference::Ranged)
    }

    fn goblin(id: u32, x: f32) -> UnitView {
        UnitView::new(UnitId(id), Faction::HOSTILE, Position::new(x, 0.0))
    }

    fn build(field: &StaticBattlefield, config: &TacticsConfig) -> Situation {
        let mut cache = FieldCache::new();
        SituationBuilder::new(DecisionEnv::from_bundle(field), config).build(
            UnitId(1),
            None,
            &mut cache,
        )
    }

    #[test]
    fn unknown_unit_yields_neutral_snapshot() {
        let config = TacticsConfig::default();
        let field = StaticBattlefield::new().with_unit(goblin(2, 0.0));

        let situation = build(&field, &config);
        assert!(!situation.is_resolved());
        assert_eq!(situation.unit_id(), UnitId(1));
        assert!(situation.enemies().is_empty());
        assert_eq!(situation.nearest_enemy_distance(), f32::MAX);
        assert!(!situation.in_danger());
        assert!(situation.economy().is_spent());
        assert!(!situation.field().is_valid());
        assert_eq!(situation.diagnostics()[0].class, FailureClass::MissingData);
    }

    #[test]
    fn supplied_budget_overrides_unit_flags() {
        let config = TacticsConfig::default();
        let field = StaticBattlefield::new()
            .with_unit(archer(0.0))
            .with_unit(goblin(2, 30.0));
        let mut cache = FieldCache::new();

        let situation = SituationBuilder::new(DecisionEnv::from_bundle(&field), &config).build(
            UnitId(1),
            Some(ActionEconomy::FULL.without_move()),
            &mut cache,
        );
        assert!(!situation.economy().can_move());
        assert!(situation.unit().economy.can_move());
    }

    #[test]
    fn ranged_unit_near_enemy_is_in_danger() {
        let config = TacticsConfig::default();
        let field = StaticBattlefield::new()
            .with_combatant(Combatant::new(archer(0.0)).with_ability(Ability::attack(1, 30.0)))
            .with_unit(goblin(2, 8.0))
            .with_unit(goblin(3, 20.0));

        let situation = build(&field, &config);
        assert!(situation.in_danger());
        assert_eq!(situation.nearest_enemy().map(|e| e.id), Some(UnitId(2)));
        assert_eq!(situation.nearest_enemy_distance(), 8.0);
        assert_eq!(situation.hittable(), &[UnitId(2), UnitId(3)]);
        assert!(situation.is_complete());
    }

    #[test]
    fn melee_unit_is_in_danger_only_when_swarmed_and_hurt() {
        let config = TacticsConfig::default();
        let fighter = UnitView::new(UnitId(1), Faction::PARTY, Position::ORIGIN)
            .with_role(Role::Tank, RangePreference::Melee);
        let swarm = |f: UnitView| {
            StaticBattlefield::new()
                .with_unit(f)
                .with_unit(goblin(2, 1.0))
                .with_unit(goblin(3, -1.0))
                .with_unit(goblin(4, 2.0))
        };

        let healthy = build(&swarm(fighter.clone()), &config);
        assert_eq!(healthy.engaged_by(), 3);
        assert!(!healthy.in_danger());

        let hurt = build(&swarm(fighter.with_hp(3, 10)), &config);
        assert!(hurt.in_danger());
    }

    #[test]
    fn no_enemies_uses_sentinel_distance() {
        let config = TacticsConfig::default();
        let field = StaticBattlefield::new().with_unit(archer(0.0));

        let situation = build(&field, &config);
        assert!(situation.enemies().is_empty());
        assert_eq!(situation.nearest_enemy_distance(), f32::MAX);
        assert!(situation.best_target().is_none());
        assert!(!situation.field().is_valid());
    }

    #[test]
    fn without_attacks_melee_reach_decides_hittability() {
        let config = TacticsConfig::default();
        let field = StaticBattlefield::new()
            .with_unit(archer(0.0))
            .with_unit(goblin(2, 4.0))
            .with_unit(goblin(3, 6.0));

        let situation = build(&field, &config);
        assert_eq!(situation.hittable(), &[UnitId(2)]);
    }

    /// World that lists units but whose ability oracle is broken.
    struct BrokenAbilities(StaticBattlefield);

    impl WorldOracle for BrokenAbilities {
        fn unit(&self, id: UnitId) -> DecisionResult<UnitView> {
            self.0.unit(id)
        }

        fn living_units(&self) -> DecisionResult<Vec<UnitView>> {
            self.0.living_units()
        }
    }

    impl AbilityOracle for BrokenAbilities {
        fn usable_abilities(&self, _unit: &UnitView) -> DecisionResult<Vec<Ability>> {
            Err(DecisionError::collaborator("abilities", "rules engine offline"))
        }
    }

    impl TargetingOracle for BrokenAbilities {
        fn can_target(
            &self,
            caster: &UnitView,
            ability: &Ability,
            target: &UnitView,
        ) -> DecisionResult<bool> {
            self.0.can_target(caster, ability, target)
        }
    }

    impl RetreatOracle for BrokenAbilities {
        fn retreat_position(
            &self,
            _unit: &UnitView,
            _enemies: &[UnitView],
            _safe_distance: f32,
        ) -> DecisionResult<Option<Position>> {
            Ok(None)
        }
    }

    #[test]
    fn oracle_failure_degrades_to_empty_pools() {
        let config = TacticsConfig::default();
        let world = BrokenAbilities(
            StaticBattlefield::new()
                .with_unit(archer(0.0))
                .with_unit(goblin(2, 3.0)),
        );
        let mut cache = FieldCache::new();
        let situation = SituationBuilder::new(DecisionEnv::from_bundle(&world), &config)
            .build(UnitId(1), None, &mut cache);

        assert!(situation.pools().is_empty());
        assert_eq!(situation.diagnostics().len(), 1);
        assert_eq!(situation.diagnostics()[0].step, "usable abilities");
        assert_eq!(situation.hittable(), &[UnitId(2)]);
    }

    #[test]
    fn malformed_neighbours_are_dropped() {
        let config = TacticsConfig::default();
        let field = StaticBattlefield::new()
            .with_unit(archer(0.0))
            .with_unit(goblin(2, f32::NAN))
            .with_unit(goblin(3, 12.0));

        let situation = build(&field, &config);
        assert_eq!(situation.enemies().len(), 1);
        assert_eq!(situation.diagnostics().len(), 1);
    }
}
