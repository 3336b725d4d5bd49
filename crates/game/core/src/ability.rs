//! Abilities as seen by the decision core.
//!
//! The classification itself (turning raw game abilities into categories) is
//! done by the [`crate::env::AbilityOracle`] collaborator; the core only ever
//! sees already-tagged [`Ability`] values and treats the handle as opaque.

use std::fmt;

use crate::unit::{CcKinds, SaveKind};

/// Opaque handle identifying an ability in the game layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityHandle(pub u32);

impl fmt::Display for AbilityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability:{}", self.0)
    }
}

/// Coarse category assigned by the ability-classification collaborator.
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
pub enum AbilityCategory {
    #[default]
    Attack,
    Heal,
    Buff,
    Debuff,
    Special,
}

/// A usable ability, already classified.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Ability {
    pub handle: AbilityHandle,
    pub name: String,
    pub category: AbilityCategory,
    /// Nominal range in world units.
    pub range: f32,
    /// Save the target rolls against, if any.
    pub save: Option<SaveKind>,
    /// Crowd-control categories inflicted on a failed save.
    pub cc: CcKinds,
    /// The effect is already active (buffs, auras); such abilities are skipped.
    pub already_applied: bool,
    /// Damage estimate supplied by the rules collaborator, if it has one.
    pub expected_damage: Option<f32>,
}

impl Ability {
    pub fn new(handle: AbilityHandle, category: AbilityCategory, range: f32) -> Self {
        Self {
            handle,
            category,
            range,
            ..Self::default()
        }
    }

    pub fn attack(handle: u32, range: f32) -> Self {
        Self::new(AbilityHandle(handle), AbilityCategory::Attack, range)
    }

    pub fn debuff(handle: u32, range: f32, save: SaveKind, cc: CcKinds) -> Self {
        Self {
            save: Some(save),
            cc,
            ..Self::new(AbilityHandle(handle), AbilityCategory::Debuff, range)
        }
    }

    pub fn heal(handle: u32, range: f32) -> Self {
        Self::new(AbilityHandle(handle), AbilityCategory::Heal, range)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_expected_damage(mut self, damage: f32) -> Self {
        self.expected_damage = Some(damage);
        self
    }

    #[must_use]
    pub fn applied(mut self) -> Self {
        self.already_applied = true;
        self
    }
}

impl Default for Ability {
    fn default() -> Self {
        Self {
            handle: AbilityHandle::default(),
            name: String::new(),
            category: AbilityCategory::default(),
            range: 2.0,
            save: None,
            cc: CcKinds::empty(),
            already_applied: false,
            expected_damage: None,
        }
    }
}
