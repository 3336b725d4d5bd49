//! Unit / world accessor.

use crate::error::DecisionResult;
use crate::unit::{UnitId, UnitView};

/// Whether the encounter is resolved in rounds or continuously.
///
/// The mode decides how many seconds of movement a move action buys.
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
pub enum TimeMode {
    #[default]
    TurnBased,
    RealTime,
}

/// Read access to the combatants of the current encounter.
///
/// Implementations return owned views; the core never holds them past the
/// decision cycle.
pub trait WorldOracle: Send + Sync {
    /// Looks up a single unit, alive or not.
    fn unit(&self, id: UnitId) -> DecisionResult<UnitView>;

    /// Every living combatant, in a stable order.
    fn living_units(&self) -> DecisionResult<Vec<UnitView>>;

    fn time_mode(&self) -> TimeMode {
        TimeMode::TurnBased
    }

    /// Current game-clock time in seconds. Used for cache expiry only.
    fn now(&self) -> f32 {
        0.0
    }

    /// Living units hostile to `unit`.
    fn enemies_of(&self, unit: &UnitView) -> DecisionResult<Vec<UnitView>> {
        Ok(self
            .living_units()?
            .into_iter()
            .filter(|other| other.is_hostile_to(unit))
            .collect())
    }

    /// Living units on `unit`'s side, excluding `unit` itself.
    fn allies_of(&self, unit: &UnitView) -> DecisionResult<Vec<UnitView>> {
        Ok(self
            .living_units()?
            .into_iter()
            .filter(|other| other.id != unit.id && !other.is_hostile_to(unit))
            .collect())
    }
}
