//! Tactical archetypes and defensive profile of a unit.
//!
//! These are immutable for the duration of a decision cycle and drive weight
//! selection in the scorer and planner.

/// Tactical archetype of a party member.
///
/// The role selects the weight vector used for target scoring and the safety
/// weight used when comparing action sequences.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    /// Holds the line, engages the nearest enemy and never kites.
    Tank,
    /// Damage dealer, favours finishing wounded targets.
    #[default]
    Dps,
    /// Healer / controller, values its own safety above damage.
    Support,
}

/// Preferred engagement distance.
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
pub enum RangePreference {
    Melee,
    Ranged,
    /// Uses whatever is at hand. Scored with the DPS weight vector.
    #[default]
    Mixed,
}

impl RangePreference {
    #[inline]
    pub const fn is_ranged(self) -> bool {
        matches!(self, Self::Ranged)
    }

    #[inline]
    pub const fn is_melee(self) -> bool {
        matches!(self, Self::Melee)
    }
}

/// How a unit deals damage. Armor-class exploitation only applies to
/// physical attackers.
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
pub enum AttackStyle {
    #[default]
    Physical,
    Magical,
}

/// One of the three saving-throw-like resistances.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SaveKind {
    Fortitude,
    Reflex,
    Will,
}

/// Saving-throw bonuses. Higher is harder to affect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Saves {
    pub fortitude: i32,
    pub reflex: i32,
    pub will: i32,
}

impl Saves {
    pub const fn new(fortitude: i32, reflex: i32, will: i32) -> Self {
        Self {
            fortitude,
            reflex,
            will,
        }
    }

    pub const fn get(&self, kind: SaveKind) -> i32 {
        match kind {
            SaveKind::Fortitude => self.fortitude,
            SaveKind::Reflex => self.reflex,
            SaveKind::Will => self.will,
        }
    }

    /// The single weakest save. Ties resolve in Fortitude, Reflex, Will order.
    pub fn weakest(&self) -> (SaveKind, i32) {
        let mut weakest = (SaveKind::Fortitude, self.fortitude);
        for kind in [SaveKind::Reflex, SaveKind::Will] {
            let value = self.get(kind);
            if value < weakest.1 {
                weakest = (kind, value);
            }
        }
        weakest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weakest_save_prefers_lowest_value() {
        let saves = Saves::new(8, 3, 5);
        assert_eq!(saves.weakest(), (SaveKind::Reflex, 3));
    }

    #[test]
    fn weakest_save_tie_keeps_declaration_order() {
        let saves = Saves::new(4, 4, 4);
        assert_eq!(saves.weakest().0, SaveKind::Fortitude);
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Support".parse::<Role>().unwrap(), Role::Support);
        assert_eq!("dps".parse::<Role>().unwrap(), Role::Dps);
        assert_eq!(Role::Tank.to_string(), "tank");
    }
}
