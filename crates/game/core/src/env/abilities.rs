//! Ability provider.

use crate::ability::Ability;
use crate::error::DecisionResult;
use crate::unit::UnitView;

/// Enumerates a unit's currently usable abilities, already classified.
///
/// This is the seam to the ability-classification collaborator: raw engine
/// abilities are turned into [`Ability`] values with a coarse category, a
/// save hint and crowd-control tags before the core ever sees them.
pub trait AbilityOracle: Send + Sync {
    fn usable_abilities(&self, unit: &UnitView) -> DecisionResult<Vec<Ability>>;
}
