//! Multi-step action-sequence planning.
//!
//! Given a target and the attack options against it, the planner:
//!
//! 1. **Generates** every feasible sequence ([`generator`]): deliberately
//!    doing nothing, attacking from where the unit stands, moving into range
//!    then attacking, or falling back to a retreat point and attacking from
//!    there
//! 2. **Simulates** each one ([`simulation`]): final position, expected
//!    damage dealt and expected safety at the final position
//! 3. **Scores** them ([`evaluation`]): `total = offense + safety + role_fit`
//! 4. Picks the best; ties go to the earliest generated candidate
//!
//! If [`SequenceKind::Skip`] wins, or nothing could be generated, no action is
//! recommended. The caller must not substitute an attack of its own.

pub mod evaluation;
pub mod generator;
pub mod simulation;

use std::fmt;

use squad_core::{
    Ability, AbilityHandle, DecisionEnv, Position, Role, TacticsConfig, UnitId, UnitView,
};

use crate::situation::Situation;

/// One step of a sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlannedAction {
    Move(Position),
    Attack {
        ability: AbilityHandle,
        target: UnitId,
    },
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(to) => write!(f, "move to {to}"),
            Self::Attack { ability, target } => write!(f, "{ability} on {target}"),
        }
    }
}

/// Shape of a candidate sequence.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SequenceKind {
    /// Do nothing this cycle.
    Skip,
    DirectAttack,
    MoveThenAttack,
    RetreatThenAttack,
}

/// A candidate plan together with its simulated outcome.
///
/// Only the kind and the actions are inputs; everything else is derived,
/// first by simulation and then by evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSequence {
    pub kind: SequenceKind,
    pub actions: Vec<PlannedAction>,
    /// Where the unit stands once the sequence has run.
    pub final_position: Position,
    /// Attacks from inside the safe distance while the unit is in danger.
    pub exposed: bool,
    pub expected_safety: f32,
    pub expected_damage: f32,
    pub offense: f32,
    pub safety: f32,
    pub role_fit: f32,
    pub total: f32,
}

impl ActionSequence {
    pub fn skip(position: Position) -> Self {
        Self::new(SequenceKind::Skip, Vec::new(), position)
    }

    pub fn new(kind: SequenceKind, actions: Vec<PlannedAction>, final_position: Position) -> Self {
        Self {
            kind,
            actions,
            final_position,
            exposed: false,
            expected_safety: 0.0,
            expected_damage: 0.0,
            offense: 0.0,
            safety: 0.0,
            role_fit: 0.0,
            total: 0.0,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.kind == SequenceKind::Skip
    }

    /// The attack step, if the sequence has one.
    pub fn attack(&self) -> Option<(AbilityHandle, UnitId)> {
        self.actions.iter().find_map(|action| match *action {
            PlannedAction::Attack { ability, target } => Some((ability, target)),
            PlannedAction::Move(_) => None,
        })
    }

    pub fn target(&self) -> Option<UnitId> {
        self.attack().map(|(_, target)| target)
    }

    pub fn moves(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, PlannedAction::Move(_)))
    }
}

impl fmt::Display for ActionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for action in &self.actions {
            write!(f, " → {action}")?;
        }
        write!(
            f,
            " (total={:.1} = offense {:.1} + safety {:.1} + role {:.1})",
            self.total, self.offense, self.safety, self.role_fit
        )
    }
}

/// Generates, simulates and scores action sequences for one unit.
pub struct SequencePlanner<'a> {
    env: DecisionEnv<'a>,
    config: &'a TacticsConfig,
}

impl<'a> SequencePlanner<'a> {
    pub fn new(env: DecisionEnv<'a>, config: &'a TacticsConfig) -> Self {
        Self { env, config }
    }

    /// Every feasible candidate against `target`, simulated and scored, in
    /// generation order. Candidates whose simulation or scoring fails are
    /// dropped.
    pub fn candidates(
        &self,
        situation: &Situation,
        attacks: &[Ability],
        target: &UnitView,
        role: Role,
    ) -> Vec<ActionSequence> {
        generator::generate(self.env, self.config, situation, attacks, target, role)
            .into_iter()
            .filter_map(|mut candidate| {
                let outcome = simulation::simulate(&mut candidate, situation, attacks, self.config)
                    .and_then(|()| evaluation::evaluate(&mut candidate, situation, role));
                match outcome {
                    Ok(()) => Some(candidate),
                    Err(err) => {
                        tracing::warn!(
                            "SequencePlanner {}: dropping {}: {}",
                            situation.unit_id(),
                            candidate.kind,
                            err
                        );
                        None
                    }
                }
            })
            .collect()
    }

    /// Best sequence against `target`, or `None` when doing nothing wins or
    /// nothing is feasible.
    pub fn plan(
        &self,
        situation: &Situation,
        attacks: &[Ability],
        target: &UnitView,
        role: Role,
    ) -> Option<ActionSequence> {
        let candidates = self.candidates(situation, attacks, target, role);
        tracing::debug!(
            "SequencePlanner {}: {} candidates against {}",
            situation.unit_id(),
            candidates.len(),
            target.id
        );
        for candidate in &candidates {
            tracing::debug!("  {}", candidate);
        }

        let best = best_of(candidates)?;
        if best.is_skip() {
            tracing::debug!("SequencePlanner {}: skip wins", situation.unit_id());
            return None;
        }
        tracing::debug!("SequencePlanner {}: chose {}", situation.unit_id(), best);
        Some(best)
    }
}

/// Highest total; the earliest candidate wins ties. NaN totals never win.
pub fn best_of(candidates: Vec<ActionSequence>) -> Option<ActionSequence> {
    let mut best: Option<ActionSequence> = None;
    for candidate in candidates {
        if candidate.total.is_nan() {
            continue;
        }
        if best
            .as_ref()
            .is_none_or(|current| candidate.total > current.total)
        {
            best = Some(candidate);
        }
    }
    best
}
