//! Per-role weight vectors for attack scoring.
//!
//! | role    | hp  | dist | threat | hittable | ac  |
//! |---------|-----|------|--------|----------|-----|
//! | tank    | 0.4 | 1.0  | 0.6    | 1.0      | 0.5 |
//! | dps     | 0.8 | 0.3  | 0.8    | 1.0      | 1.0 |
//! | support | 0.6 | 0.5  | 1.2    | 1.0      | 0.3 |
//!
//! Tanks care mostly about proximity, DPS about finishing wounded targets,
//! supports about whoever threatens the party most. Units with a `Mixed`
//! range preference are scored with the DPS vector whatever their role.

use squad_core::{RangePreference, Role, UnitView};

/// Multipliers applied to the individual attack-score factors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleWeights {
    pub hp: f32,
    pub distance: f32,
    pub threat: f32,
    pub hittable: f32,
    pub armor: f32,
}

impl RoleWeights {
    pub const TANK: Self = Self {
        hp: 0.4,
        distance: 1.0,
        threat: 0.6,
        hittable: 1.0,
        armor: 0.5,
    };

    pub const DPS: Self = Self {
        hp: 0.8,
        distance: 0.3,
        threat: 0.8,
        hittable: 1.0,
        armor: 1.0,
    };

    pub const SUPPORT: Self = Self {
        hp: 0.6,
        distance: 0.5,
        threat: 1.2,
        hittable: 1.0,
        armor: 0.3,
    };

    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Tank => Self::TANK,
            Role::Dps => Self::DPS,
            Role::Support => Self::SUPPORT,
        }
    }

    pub const fn for_unit(unit: &UnitView) -> Self {
        match unit.range_preference {
            RangePreference::Mixed => Self::DPS,
            RangePreference::Melee | RangePreference::Ranged => Self::for_role(unit.role),
        }
    }
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self::DPS
    }
}

/// Weight of the safety term when the planner compares action sequences.
pub const fn safety_weight(role: Role) -> f32 {
    match role {
        Role::Tank => 0.5,
        Role::Dps => 1.0,
        Role::Support => 1.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_role_has_a_distinct_vector() {
        let vectors: Vec<RoleWeights> = Role::iter().map(RoleWeights::for_role).collect();
        for (i, a) in vectors.iter().enumerate() {
            for b in &vectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn tank_weighs_distance_above_hp() {
        let w = RoleWeights::for_role(Role::Tank);
        assert!(w.distance > w.hp);
        let w = RoleWeights::for_role(Role::Dps);
        assert!(w.hp > w.distance);
    }

    #[test]
    fn mixed_units_use_the_dps_vector() {
        let tank = UnitView::default().with_role(Role::Tank, RangePreference::Mixed);
        assert_eq!(RoleWeights::for_unit(&tank), RoleWeights::DPS);
        let tank = tank.with_role(Role::Tank, RangePreference::Melee);
        assert_eq!(RoleWeights::for_unit(&tank), RoleWeights::TANK);
    }

    #[test]
    fn support_values_safety_most() {
        assert!(safety_weight(Role::Support) > safety_weight(Role::Dps));
        assert!(safety_weight(Role::Dps) > safety_weight(Role::Tank));
    }
}
