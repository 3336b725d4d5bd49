use crate::env::TimeMode;

/// Seconds of movement a single move action buys, per time mode.
///
/// Values are engine-specific.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoveTimings {
    /// Seconds of movement granted by a move action in turn-based mode.
    pub turn_based_secs: f32,
    /// Seconds of movement available before the next decision tick in real time.
    pub real_time_secs: f32,
}

impl MoveTimings {
    pub const DEFAULT_TURN_BASED_SECS: f32 = 3.0;
    pub const DEFAULT_REAL_TIME_SECS: f32 = 1.5;

    /// Seconds of movement one move action buys in `mode`.
    pub const fn secs_for(&self, mode: TimeMode) -> f32 {
        match mode {
            TimeMode::TurnBased => self.turn_based_secs,
            TimeMode::RealTime => self.real_time_secs,
        }
    }
}

impl Default for MoveTimings {
    fn default() -> Self {
        Self {
            turn_based_secs: Self::DEFAULT_TURN_BASED_SECS,
            real_time_secs: Self::DEFAULT_REAL_TIME_SECS,
        }
    }
}

/// Tunable parameters of the tactical decision core.
///
/// All distances are in world units, all times in game-clock seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    /// Edge length of one influence-grid cell.
    pub cell_size: f32,
    /// Units farther than this from a cell contribute nothing to it.
    pub max_influence_radius: f32,
    /// Lower clamp on distance in the inverse-square falloff.
    pub min_influence_distance: f32,
    /// Maximum cell count along either grid axis.
    pub max_grid_dimension: usize,
    /// Strength multiplier for ranged units.
    pub ranged_threat_multiplier: f32,
    /// Ally/enemy pairs closer than this form a frontline contact point.
    pub contact_distance: f32,
    /// Number of safe zones reported by the field (capped at [`Self::MAX_SAFE_ZONES`]).
    pub safe_zone_count: usize,
    /// Safe zones must lie within this distance of the ally centroid.
    pub safe_zone_search_radius: f32,
    /// Ranged units nearer than this to an enemy are endangered.
    pub safe_distance: f32,
    /// Fallback reach used when no ability reports reachability.
    pub melee_reach: f32,
    /// Heal targets farther than this are penalised.
    pub heal_range: f32,
    /// HP fraction below which a surrounded melee unit is endangered.
    pub low_hp_threshold: f32,
    /// How long a cached influence field stays valid.
    pub cache_window_secs: f32,
    pub move_timings: MoveTimings,
}

impl TacticsConfig {
    // ===== compile-time limits =====
    pub const MAX_SAFE_ZONES: usize = 8;
    pub const MAX_GRID_DIMENSION: usize = 512;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CELL_SIZE: f32 = 2.0;
    pub const DEFAULT_MAX_INFLUENCE_RADIUS: f32 = 30.0;
    pub const DEFAULT_MIN_INFLUENCE_DISTANCE: f32 = 1.0;
    pub const DEFAULT_MAX_GRID_DIMENSION: usize = 64;
    pub const DEFAULT_RANGED_THREAT_MULTIPLIER: f32 = 1.3;
    pub const DEFAULT_CONTACT_DISTANCE: f32 = 10.0;
    pub const DEFAULT_SAFE_ZONE_COUNT: usize = 5;
    pub const DEFAULT_SAFE_ZONE_SEARCH_RADIUS: f32 = 20.0;
    pub const DEFAULT_SAFE_DISTANCE: f32 = 15.0;
    pub const DEFAULT_MELEE_REACH: f32 = 5.0;
    pub const DEFAULT_HEAL_RANGE: f32 = 10.0;
    pub const DEFAULT_LOW_HP_THRESHOLD: f32 = 0.35;
    pub const DEFAULT_CACHE_WINDOW_SECS: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            max_influence_radius: Self::DEFAULT_MAX_INFLUENCE_RADIUS,
            min_influence_distance: Self::DEFAULT_MIN_INFLUENCE_DISTANCE,
            max_grid_dimension: Self::DEFAULT_MAX_GRID_DIMENSION,
            ranged_threat_multiplier: Self::DEFAULT_RANGED_THREAT_MULTIPLIER,
            contact_distance: Self::DEFAULT_CONTACT_DISTANCE,
            safe_zone_count: Self::DEFAULT_SAFE_ZONE_COUNT,
            safe_zone_search_radius: Self::DEFAULT_SAFE_ZONE_SEARCH_RADIUS,
            safe_distance: Self::DEFAULT_SAFE_DISTANCE,
            melee_reach: Self::DEFAULT_MELEE_REACH,
            heal_range: Self::DEFAULT_HEAL_RANGE,
            low_hp_threshold: Self::DEFAULT_LOW_HP_THRESHOLD,
            cache_window_secs: Self::DEFAULT_CACHE_WINDOW_SECS,
            move_timings: MoveTimings::default(),
        }
    }

    #[must_use]
    pub fn with_safe_distance(mut self, safe_distance: f32) -> Self {
        self.safe_distance = safe_distance;
        self
    }

    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    #[must_use]
    pub fn with_cache_window(mut self, secs: f32) -> Self {
        self.cache_window_secs = secs;
        self
    }

    #[must_use]
    pub fn with_move_timings(mut self, move_timings: MoveTimings) -> Self {
        self.move_timings = move_timings;
        self
    }

    /// Safe-zone count after applying the hard cap.
    pub fn effective_safe_zone_count(&self) -> usize {
        self.safe_zone_count.min(Self::MAX_SAFE_ZONES)
    }

    /// Checks the values a field build or distance comparison divides by or
    /// iterates over.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("cell_size", self.cell_size),
            ("max_influence_radius", self.max_influence_radius),
            ("min_influence_distance", self.min_influence_distance),
            ("ranged_threat_multiplier", self.ranged_threat_multiplier),
            ("contact_distance", self.contact_distance),
            ("safe_zone_search_radius", self.safe_zone_search_radius),
            ("safe_distance", self.safe_distance),
            ("melee_reach", self.melee_reach),
            ("heal_range", self.heal_range),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive(name));
            }
        }
        if self.max_grid_dimension == 0 {
            return Err(ConfigError::NotPositive("max_grid_dimension"));
        }
        if self.max_grid_dimension > Self::MAX_GRID_DIMENSION {
            return Err(ConfigError::OutOfRange("max_grid_dimension"));
        }
        if !(0.0..=1.0).contains(&self.low_hp_threshold) {
            return Err(ConfigError::OutOfRange("low_hp_threshold"));
        }
        let non_negative = [
            ("cache_window_secs", self.cache_window_secs),
            ("move_timings.turn_based_secs", self.move_timings.turn_based_secs),
            ("move_timings.real_time_secs", self.move_timings.real_time_secs),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange(name));
            }
        }
        Ok(())
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be a positive finite number")]
    NotPositive(&'static str),
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TacticsConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let config = TacticsConfig::default().with_cell_size(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive("cell_size"))
        );
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let config = TacticsConfig {
            max_grid_dimension: TacticsConfig::MAX_GRID_DIMENSION + 1,
            ..TacticsConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange("max_grid_dimension"))
        );
    }

    #[test]
    fn every_distance_is_checked() {
        let heal = TacticsConfig {
            heal_range: -1.0,
            ..TacticsConfig::default()
        };
        assert_eq!(heal.validate(), Err(ConfigError::NotPositive("heal_range")));

        let contact = TacticsConfig {
            contact_distance: f32::NAN,
            ..TacticsConfig::default()
        };
        assert_eq!(
            contact.validate(),
            Err(ConfigError::NotPositive("contact_distance"))
        );

        let search = TacticsConfig {
            safe_zone_search_radius: 0.0,
            ..TacticsConfig::default()
        };
        assert_eq!(
            search.validate(),
            Err(ConfigError::NotPositive("safe_zone_search_radius"))
        );
    }

    #[test]
    fn negative_move_time_is_rejected() {
        let config = TacticsConfig::default().with_move_timings(MoveTimings {
            turn_based_secs: -3.0,
            ..MoveTimings::default()
        });
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange("move_timings.turn_based_secs"))
        );
    }

    #[test]
    fn safe_zone_count_is_capped() {
        let config = TacticsConfig {
            safe_zone_count: 50,
            ..TacticsConfig::default()
        };
        assert_eq!(config.effective_safe_zone_count(), TacticsConfig::MAX_SAFE_ZONES);
    }

    #[test]
    fn move_budget_depends_on_time_mode() {
        let timings = MoveTimings::default();
        assert_eq!(timings.secs_for(TimeMode::TurnBased), 3.0);
        assert_eq!(timings.secs_for(TimeMode::RealTime), 1.5);
    }
}
