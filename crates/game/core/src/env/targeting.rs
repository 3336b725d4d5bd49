//! Targeting feasibility oracle.

use crate::ability::Ability;
use crate::error::DecisionResult;
use crate::unit::UnitView;

/// Range, line-of-sight and engine-specific targeting rules.
pub trait TargetingOracle: Send + Sync {
    /// Can `caster` use `ability` on `target` right now, without moving?
    fn can_target(&self, caster: &UnitView, ability: &Ability, target: &UnitView)
    -> DecisionResult<bool>;

    /// Distance from `target` at which `ability` connects.
    ///
    /// Defaults to the nominal range; engines with reach or size rules
    /// override it.
    fn approach_distance(
        &self,
        _caster: &UnitView,
        ability: &Ability,
        _target: &UnitView,
    ) -> DecisionResult<f32> {
        Ok(ability.range)
    }
}
