//! Multi-factor target scoring.
//!
//! Three independent purposes, each a pure function of the battlefield:
//!
//! 1. **Attack** ([`attack`]): which enemy to hit
//! 2. **Heal** ([`heal`]): which ally (or self) to heal
//! 3. **Debuff** ([`debuff`]): which enemy to disable, with which ability
//!
//! Every function returns a single scalar wrapped in a [`TargetScore`]
//! together with a human-readable reason. Higher is better; the selector
//! breaks ties by input order.
//!
//! # Weights
//!
//! Attack scoring is a weighted sum whose weight vector depends on the
//! attacker's [`Role`](squad_core::Role); see [`weights`].

pub mod attack;
pub mod debuff;
pub mod heal;
pub mod selector;
pub mod weights;

pub use selector::TargetSelector;
pub use weights::RoleWeights;

use squad_core::{AbilityHandle, TacticsConfig, UnitId, UnitView};

use crate::situation::CombatPhase;

/// Score meaning "never select this candidate".
///
/// Produced by short-circuits (immunity, duplicate effect, nothing to heal)
/// before any weighting happens.
pub const SENTINEL_SCORE: f32 = f32::MIN;

/// What a target is being selected for.
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
pub enum TargetPurpose {
    Attack,
    Heal,
    Debuff,
}

/// A scored candidate. Transient: produced and consumed within one call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetScore {
    pub target: UnitId,
    pub score: f32,
    pub reason: String,
    /// Ability the score was computed for, when the purpose needs one.
    pub ability: Option<AbilityHandle>,
}

impl TargetScore {
    pub fn new(target: UnitId, score: f32, reason: impl Into<String>) -> Self {
        Self {
            target,
            score,
            reason: reason.into(),
            ability: None,
        }
    }

    pub fn never(target: UnitId, reason: impl Into<String>) -> Self {
        Self::new(target, SENTINEL_SCORE, reason)
    }

    #[must_use]
    pub fn with_ability(mut self, ability: AbilityHandle) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn is_selectable(&self) -> bool {
        self.score > SENTINEL_SCORE && !self.score.is_nan()
    }
}

/// Read-only inputs shared by all scoring functions.
#[derive(Clone, Copy, Debug)]
pub struct ScoringContext<'a> {
    /// The unit doing the choosing.
    pub actor: &'a UnitView,
    /// The actor's allies, excluding the actor.
    pub allies: &'a [UnitView],
    pub enemies: &'a [UnitView],
    /// Enemies attackable without moving.
    pub hittable: &'a [UnitId],
    pub phase: CombatPhase,
    pub config: &'a TacticsConfig,
}

impl ScoringContext<'_> {
    pub fn is_hittable(&self, id: UnitId) -> bool {
        self.hittable.contains(&id)
    }
}

/// Number of `opponents` within `reach` of `unit`.
pub fn engaging_count(unit: &UnitView, opponents: &[UnitView], reach: f32) -> usize {
    opponents
        .iter()
        .filter(|o| o.id != unit.id && o.distance_to(unit) <= reach)
        .count()
}
