//! Immutable per-cycle decision snapshot.
//!
//! A [`Situation`] is the single read-only view every downstream evaluator
//! consumes: the unit, its neighbours, its abilities bucketed by category,
//! which enemies it can hit right now, the combat phase and whether it is in
//! danger. It is built once per decision cycle by [`SituationBuilder`] and
//! never mutated afterwards.

mod builder;
mod phase;

pub use builder::SituationBuilder;
pub use phase::CombatPhase;

use std::sync::Arc;

use squad_core::{
    Ability, AbilityCategory, ActionEconomy, FailureClass, TacticsConfig, TimeMode, UnitId,
    UnitView,
};

use crate::influence::InfluenceField;
use crate::scoring::{ScoringContext, TargetScore};

/// Usable abilities bucketed by category, in the order the ability oracle
/// returned them. Already-applied effects are left out.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityPools {
    pub attacks: Vec<Ability>,
    pub heals: Vec<Ability>,
    pub buffs: Vec<Ability>,
    pub debuffs: Vec<Ability>,
    pub specials: Vec<Ability>,
}

impl AbilityPools {
    pub fn from_abilities(abilities: impl IntoIterator<Item = Ability>) -> Self {
        let mut pools = Self::default();
        for ability in abilities.into_iter().filter(|a| !a.already_applied) {
            let pool = match ability.category {
                AbilityCategory::Attack => &mut pools.attacks,
                AbilityCategory::Heal => &mut pools.heals,
                AbilityCategory::Buff => &mut pools.buffs,
                AbilityCategory::Debuff => &mut pools.debuffs,
                AbilityCategory::Special => &mut pools.specials,
            };
            pool.push(ability);
        }
        pools
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
            && self.heals.is_empty()
            && self.buffs.is_empty()
            && self.debuffs.is_empty()
            && self.specials.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
            + self.heals.len()
            + self.buffs.len()
            + self.debuffs.len()
            + self.specials.len()
    }
}

/// A sub-step of snapshot construction that failed and fell back to a
/// default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub step: &'static str,
    pub class: FailureClass,
    pub message: String,
}

/// Snapshot of everything one unit needs to decide its next actions.
#[derive(Clone, Debug)]
pub struct Situation {
    pub(crate) unit: UnitView,
    pub(crate) resolved: bool,
    pub(crate) economy: ActionEconomy,
    pub(crate) time_mode: TimeMode,
    pub(crate) enemies: Vec<UnitView>,
    pub(crate) allies: Vec<UnitView>,
    pub(crate) nearest_enemy: Option<UnitId>,
    pub(crate) nearest_enemy_distance: f32,
    pub(crate) hittable: Vec<UnitId>,
    pub(crate) engaged_by: usize,
    pub(crate) in_danger: bool,
    pub(crate) phase: CombatPhase,
    pub(crate) pools: AbilityPools,
    pub(crate) best_target: Option<TargetScore>,
    pub(crate) field: Arc<InfluenceField>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Situation {
    pub fn unit(&self) -> &UnitView {
        &self.unit
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit.id
    }

    pub fn hp_percent(&self) -> f32 {
        self.unit.hp_percent()
    }

    /// Remaining action budget; a budget supplied to the builder overrides
    /// the unit's own flags.
    pub fn economy(&self) -> ActionEconomy {
        self.economy
    }

    /// `false` when the unit itself could not be read and the snapshot is
    /// the neutral fallback.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    /// Living enemies, in world-oracle order.
    pub fn enemies(&self) -> &[UnitView] {
        &self.enemies
    }

    /// Living allies, excluding the unit itself.
    pub fn allies(&self) -> &[UnitView] {
        &self.allies
    }

    pub fn enemy(&self, id: UnitId) -> Option<&UnitView> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn nearest_enemy(&self) -> Option<&UnitView> {
        self.nearest_enemy.and_then(|id| self.enemy(id))
    }

    /// Distance to the nearest living enemy; `f32::MAX` when there is none.
    pub fn nearest_enemy_distance(&self) -> f32 {
        self.nearest_enemy_distance
    }

    /// Enemies attackable right now without moving.
    pub fn hittable(&self) -> &[UnitId] {
        &self.hittable
    }

    pub fn is_hittable(&self, id: UnitId) -> bool {
        self.hittable.contains(&id)
    }

    /// Number of enemies within melee reach of the unit.
    pub fn engaged_by(&self) -> usize {
        self.engaged_by
    }

    pub fn in_danger(&self) -> bool {
        self.in_danger
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn pools(&self) -> &AbilityPools {
        &self.pools
    }

    pub fn attacks(&self) -> &[Ability] {
        &self.pools.attacks
    }

    pub fn heals(&self) -> &[Ability] {
        &self.pools.heals
    }

    pub fn debuffs(&self) -> &[Ability] {
        &self.pools.debuffs
    }

    /// Best attack target computed at snapshot time.
    pub fn best_target(&self) -> Option<&TargetScore> {
        self.best_target.as_ref()
    }

    pub fn field(&self) -> &InfluenceField {
        &self.field
    }

    /// Shared handle to the influence field used for this snapshot.
    pub fn field_handle(&self) -> Arc<InfluenceField> {
        Arc::clone(&self.field)
    }

    /// Sub-steps that failed and were replaced by defaults.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `true` when every sub-step succeeded.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn scoring_context<'a>(&'a self, config: &'a TacticsConfig) -> ScoringContext<'a> {
        ScoringContext {
            actor: &self.unit,
            allies: &self.allies,
            enemies: &self.enemies,
            hittable: &self.hittable,
            phase: self.phase,
            config,
        }
    }
}
