//! Entry points for the turn/round controller.

use squad_core::{Ability, ActionEconomy, DecisionEnv, Role, TacticsConfig, UnitId, UnitView};

use crate::influence::FieldCache;
use crate::planner::{ActionSequence, SequencePlanner};
use crate::scoring::{TargetPurpose, TargetScore, TargetSelector};
use crate::situation::{CombatPhase, Diagnostic, Situation, SituationBuilder};

/// Tactical brain for one decision cycle at a time.
///
/// The brain owns no state between cycles; the caller keeps a [`FieldCache`]
/// per encounter and hands it in so the influence field can be reused by
/// units deciding within the same cache window.
///
/// # Pipeline
///
/// 1. [`build_snapshot`](Self::build_snapshot): one [`Situation`] per unit
/// 2. [`select_best_target`](Self::select_best_target): attack, heal or
///    debuff target
/// 3. [`plan_attack_sequence`](Self::plan_attack_sequence): the best action
///    sequence against the chosen target, or nothing
///
/// None of these calls fail. Degraded inputs show up as diagnostics on the
/// situation, and "no action" is indistinguishable from a deliberate skip.
#[derive(Clone, Copy)]
pub struct TacticalBrain<'a> {
    env: DecisionEnv<'a>,
    config: &'a TacticsConfig,
}

impl<'a> TacticalBrain<'a> {
    pub fn new(env: DecisionEnv<'a>, config: &'a TacticsConfig) -> Self {
        Self { env, config }
    }

    pub fn config(&self) -> &'a TacticsConfig {
        self.config
    }

    /// Snapshot of `unit` for this cycle. `budget` overrides the unit's own
    /// action flags when given.
    pub fn build_snapshot(
        &self,
        unit: UnitId,
        budget: Option<ActionEconomy>,
        cache: &mut FieldCache,
    ) -> Situation {
        SituationBuilder::new(self.env, self.config).build(unit, budget, cache)
    }

    /// Best target for `purpose`, or `None` when every candidate is excluded.
    pub fn select_best_target(
        &self,
        situation: &Situation,
        purpose: TargetPurpose,
    ) -> Option<TargetScore> {
        let ctx = situation.scoring_context(self.config);
        TargetSelector::select(&ctx, purpose, situation.debuffs())
    }

    /// Best action sequence against `target` using `attacks`, or `None` for
    /// "no action".
    pub fn plan_attack_sequence(
        &self,
        situation: &Situation,
        attacks: &[Ability],
        target: &UnitView,
        role: Role,
    ) -> Option<ActionSequence> {
        SequencePlanner::new(self.env, self.config).plan(situation, attacks, target, role)
    }

    /// Runs the whole pipeline for `unit`.
    pub fn decide(
        &self,
        unit: UnitId,
        budget: Option<ActionEconomy>,
        cache: &mut FieldCache,
    ) -> Decision {
        let situation = self.build_snapshot(unit, budget, cache);

        let target = situation.best_target().cloned();
        let sequence = target
            .as_ref()
            .and_then(|pick| situation.enemy(pick.target))
            .and_then(|enemy| {
                self.plan_attack_sequence(
                    &situation,
                    situation.attacks(),
                    enemy,
                    situation.unit().role,
                )
            });

        let heal = (!situation.heals().is_empty())
            .then(|| self.select_best_target(&situation, TargetPurpose::Heal))
            .flatten();
        let debuff = (!situation.debuffs().is_empty())
            .then(|| self.select_best_target(&situation, TargetPurpose::Debuff))
            .flatten();

        match &sequence {
            Some(sequence) => tracing::info!("{} decided: {}", unit, sequence),
            None => tracing::info!("{} decided: no action", unit),
        }

        Decision {
            unit,
            phase: situation.phase(),
            in_danger: situation.in_danger(),
            target,
            heal,
            debuff,
            sequence,
            diagnostics: situation.diagnostics().to_vec(),
        }
    }
}

/// Outcome of [`TacticalBrain::decide`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decision {
    pub unit: UnitId,
    pub phase: CombatPhase,
    pub in_danger: bool,
    /// Attack target picked at snapshot time.
    pub target: Option<TargetScore>,
    /// Suggested heal target; only computed when a heal is available.
    pub heal: Option<TargetScore>,
    /// Suggested debuff target and ability; only computed when a debuff is
    /// available.
    pub debuff: Option<TargetScore>,
    /// `None` means "no action" this cycle.
    pub sequence: Option<ActionSequence>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decision {
    pub fn is_idle(&self) -> bool {
        self.sequence.is_none()
    }
}
