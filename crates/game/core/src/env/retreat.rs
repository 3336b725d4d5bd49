//! Retreat-position oracle.

use crate::error::DecisionResult;
use crate::unit::{Position, UnitView};

/// Suggests where a unit could fall back to.
pub trait RetreatOracle: Send + Sync {
    /// Candidate retreat point putting `unit` at least `safe_distance` away
    /// from `enemies`, or `None` when no such point is known.
    fn retreat_position(
        &self,
        unit: &UnitView,
        enemies: &[UnitView],
        safe_distance: f32,
    ) -> DecisionResult<Option<Position>>;
}
