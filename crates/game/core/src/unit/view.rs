use super::{AttackStyle, CcKinds, Faction, Position, RangePreference, Role, Saves, UnitId};

/// Action types a unit may still spend in the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEconomy {
    pub standard: bool,
    pub move_action: bool,
    pub swift: bool,
}

impl ActionEconomy {
    /// Fresh turn: every action type available.
    pub const FULL: Self = Self {
        standard: true,
        move_action: true,
        swift: true,
    };

    /// Nothing left to spend.
    pub const SPENT: Self = Self {
        standard: false,
        move_action: false,
        swift: false,
    };

    pub const fn new(standard: bool, move_action: bool, swift: bool) -> Self {
        Self {
            standard,
            move_action,
            swift,
        }
    }

    #[must_use]
    pub const fn without_move(mut self) -> Self {
        self.move_action = false;
        self
    }

    #[must_use]
    pub const fn without_standard(mut self) -> Self {
        self.standard = false;
        self
    }

    pub const fn can_attack(&self) -> bool {
        self.standard
    }

    pub const fn can_move(&self) -> bool {
        self.move_action
    }

    pub const fn is_spent(&self) -> bool {
        !self.standard && !self.move_action && !self.swift
    }
}

impl Default for ActionEconomy {
    fn default() -> Self {
        Self::FULL
    }
}

/// Read-only view of a combatant, owned by the game layer.
///
/// The decision core copies what it needs out of these views at the start of
/// a cycle and never writes back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitView {
    pub id: UnitId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub role: Role,
    pub range_preference: RangePreference,
    pub attack_style: AttackStyle,
    pub economy: ActionEconomy,
    /// Base movement speed in world units per second.
    pub speed: f32,
    pub armor_class: i32,
    pub saves: Saves,
    pub immunities: CcKinds,
    pub active_effects: CcKinds,
    pub is_caster: bool,
    pub is_healer: bool,
    pub caster_level: u32,
    /// Average damage of one weapon attack, if the unit wields one.
    pub weapon_damage: Option<f32>,
    /// Distance at which the wielded weapon connects.
    pub weapon_reach: f32,
}

impl UnitView {
    pub fn new(id: UnitId, faction: Faction, position: Position) -> Self {
        Self {
            id,
            faction,
            position,
            ..Self::default()
        }
    }

    /// Current HP as a fraction of max HP in `[0, 1]`.
    ///
    /// Units with a non-positive max HP are treated as full health.
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 1.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Current HP as a percentage in `[0, 100]`.
    pub fn hp_percent(&self) -> f32 {
        self.hp_fraction() * 100.0
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn distance_to(&self, other: &UnitView) -> f32 {
        self.position.distance(other.position)
    }

    pub fn is_hostile_to(&self, other: &UnitView) -> bool {
        self.faction.is_hostile_to(other.faction)
    }

    pub fn is_physical(&self) -> bool {
        matches!(self.attack_style, AttackStyle::Physical)
    }

    // Builder helpers, used by scenario fixtures and tests.

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: i32, max_hp: i32) -> Self {
        self.hp = hp;
        self.max_hp = max_hp;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role, range_preference: RangePreference) -> Self {
        self.role = role;
        self.range_preference = range_preference;
        self
    }

    #[must_use]
    pub fn with_attack_style(mut self, style: AttackStyle) -> Self {
        self.attack_style = style;
        self
    }

    #[must_use]
    pub fn with_economy(mut self, economy: ActionEconomy) -> Self {
        self.economy = economy;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = armor_class;
        self
    }

    #[must_use]
    pub fn with_saves(mut self, saves: Saves) -> Self {
        self.saves = saves;
        self
    }

    #[must_use]
    pub fn with_immunities(mut self, immunities: CcKinds) -> Self {
        self.immunities = immunities;
        self
    }

    #[must_use]
    pub fn with_active_effects(mut self, effects: CcKinds) -> Self {
        self.active_effects = effects;
        self
    }

    #[must_use]
    pub fn with_caster(mut self, caster_level: u32, is_healer: bool) -> Self {
        self.is_caster = true;
        self.is_healer = is_healer;
        self.caster_level = caster_level;
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, damage: f32, reach: f32) -> Self {
        self.weapon_damage = Some(damage);
        self.weapon_reach = reach;
        self
    }
}

impl Default for UnitView {
    fn default() -> Self {
        Self {
            id: UnitId::default(),
            name: String::new(),
            faction: Faction::PARTY,
            position: Position::ORIGIN,
            hp: 10,
            max_hp: 10,
            role: Role::default(),
            range_preference: RangePreference::default(),
            attack_style: AttackStyle::default(),
            economy: ActionEconomy::FULL,
            speed: 9.0,
            armor_class: 10,
            saves: Saves::default(),
            immunities: CcKinds::empty(),
            active_effects: CcKinds::empty(),
            is_caster: false,
            is_healer: false,
            caster_level: 0,
            weapon_damage: None,
            weapon_reach: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_fraction_clamps_and_handles_zero_max() {
        let unit = UnitView::new(UnitId(1), Faction::PARTY, Position::ORIGIN).with_hp(15, 10);
        assert_eq!(unit.hp_fraction(), 1.0);

        let broken = UnitView::new(UnitId(2), Faction::PARTY, Position::ORIGIN).with_hp(5, 0);
        assert_eq!(broken.hp_fraction(), 1.0);

        let wounded = UnitView::new(UnitId(3), Faction::PARTY, Position::ORIGIN).with_hp(3, 12);
        assert_eq!(wounded.hp_percent(), 25.0);
    }

    #[test]
    fn economy_helpers() {
        let economy = ActionEconomy::FULL.without_move();
        assert!(economy.can_attack());
        assert!(!economy.can_move());
        assert!(ActionEconomy::SPENT.is_spent());
    }
}
