//! Spatial influence field.
//!
//! Turns raw unit positions into two scalar fields over the contested area:
//!
//! - **threat**: enemy pressure, Σ `strength / max(d, D_min)²` over enemies
//! - **control**: the same sum over allies
//!
//! Both are sampled once on an [`InfluenceGrid`] so that point queries are a
//! cell lookup. Queries outside the grid fall back to summing the sources
//! directly.
//!
//! A field built without enemies or without allies is *invalid*: every query
//! returns zero and callers treat that as "no tactical information".

mod cache;
mod grid;

pub use cache::{CacheStats, FieldCache, FieldSignature};
pub use grid::{Falloff, InfluenceGrid, InfluenceSource};

use arrayvec::ArrayVec;
use squad_core::{Position, TacticsConfig, UnitView};

/// Lowest-threat cells near the party, ascending by threat.
pub type SafeZones = ArrayVec<Position, { TacticsConfig::MAX_SAFE_ZONES }>;

/// Influence strength of a single unit.
///
/// Wounded units project proportionally less; ranged units are scaled by
/// the configured ranged multiplier.
pub fn unit_strength(unit: &UnitView, config: &TacticsConfig) -> f32 {
    let ranged = if unit.range_preference.is_ranged() {
        config.ranged_threat_multiplier
    } else {
        1.0
    };
    unit.hp_fraction() * ranged
}

/// Immutable threat / control field for one decision cycle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluenceField {
    valid: bool,
    grid: Option<InfluenceGrid>,
    falloff: Falloff,
    enemies: Vec<InfluenceSource>,
    allies: Vec<InfluenceSource>,
    frontline: Position,
    frontline_direction: Position,
    safe_zones: SafeZones,
}

impl InfluenceField {
    /// Builds the field from the current combatants.
    ///
    /// Cost is O(cells × units); see [`FieldCache`] for memoisation.
    pub fn build(enemies: &[UnitView], allies: &[UnitView], config: &TacticsConfig) -> Self {
        let falloff = Falloff::from_config(config);
        let to_sources = |units: &[UnitView]| -> Vec<InfluenceSource> {
            units
                .iter()
                .map(|u| InfluenceSource {
                    position: u.position,
                    strength: unit_strength(u, config),
                })
                .collect()
        };
        let enemies = to_sources(enemies);
        let allies = to_sources(allies);

        if enemies.is_empty() || allies.is_empty() {
            tracing::debug!(
                "InfluenceField: invalid (enemies={}, allies={})",
                enemies.len(),
                allies.len()
            );
            return Self::invalid(falloff);
        }

        let grid = InfluenceGrid::build(
            &enemies,
            &allies,
            falloff,
            config.cell_size,
            config.max_grid_dimension,
        );

        let mut field = Self {
            valid: true,
            grid,
            falloff,
            enemies,
            allies,
            frontline: Position::ORIGIN,
            frontline_direction: Position::ORIGIN,
            safe_zones: SafeZones::new(),
        };
        field.frontline = field.compute_frontline(config.contact_distance);
        field.frontline_direction = field.compute_frontline_direction();
        field.safe_zones = field.compute_safe_zones(
            config.effective_safe_zone_count(),
            config.safe_zone_search_radius,
        );

        if let Some(grid) = &field.grid {
            tracing::debug!(
                "InfluenceField: built {}x{} grid (cell={}, enemies={}, allies={})",
                grid.width(),
                grid.height(),
                grid.cell_size(),
                field.enemies.len(),
                field.allies.len()
            );
        }

        field
    }

    /// A field carrying no tactical information.
    pub fn invalid(falloff: Falloff) -> Self {
        Self {
            valid: false,
            grid: None,
            falloff,
            enemies: Vec::new(),
            allies: Vec::new(),
            frontline: Position::ORIGIN,
            frontline_direction: Position::ORIGIN,
            safe_zones: SafeZones::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn grid(&self) -> Option<&InfluenceGrid> {
        self.grid.as_ref()
    }

    /// Enemy pressure at `pos`. O(1) inside the grid, O(n) outside.
    ///
    /// Inside the grid the value is the one sampled at the cell centre, so
    /// two points in the same cell read the same threat.
    pub fn threat_at(&self, pos: Position) -> f32 {
        if !self.valid {
            return 0.0;
        }
        match self.grid.as_ref().and_then(|g| g.cell_of(pos).map(|c| (g, c))) {
            Some((grid, (x, y))) => grid.threat_in(x, y),
            None => self.falloff.sum_at(pos, &self.enemies),
        }
    }

    /// Ally presence at `pos`. O(1) inside the grid, O(n) outside.
    pub fn control_at(&self, pos: Position) -> f32 {
        if !self.valid {
            return 0.0;
        }
        match self.grid.as_ref().and_then(|g| g.cell_of(pos).map(|c| (g, c))) {
            Some((grid, (x, y))) => grid.control_in(x, y),
            None => self.falloff.sum_at(pos, &self.allies),
        }
    }

    /// Exact threat at `pos`, bypassing the grid.
    pub fn threat_exact(&self, pos: Position) -> f32 {
        if !self.valid {
            return 0.0;
        }
        self.falloff.sum_at(pos, &self.enemies)
    }

    /// Estimated line of contact between the two sides.
    pub fn frontline(&self) -> Position {
        self.frontline
    }

    /// Unit vector from the ally centroid towards the enemy centroid.
    pub fn frontline_direction(&self) -> Position {
        self.frontline_direction
    }

    pub fn safe_zones(&self) -> &[Position] {
        &self.safe_zones
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn ally_count(&self) -> usize {
        self.allies.len()
    }

    fn centroids(&self) -> Option<(Position, Position)> {
        let allies = Position::centroid(self.allies.iter().map(|s| s.position))?;
        let enemies = Position::centroid(self.enemies.iter().map(|s| s.position))?;
        Some((allies, enemies))
    }

    /// Average of per-ally contact points; falls back to the midpoint between
    /// the two centroids when nobody is in contact.
    fn compute_frontline(&self, contact_distance: f32) -> Position {
        let contacts = self.allies.iter().filter_map(|ally| {
            let nearest = self.enemies.iter().min_by(|a, b| {
                a.position
                    .distance_squared(ally.position)
                    .total_cmp(&b.position.distance_squared(ally.position))
            })?;
            (nearest.position.distance(ally.position) <= contact_distance)
                .then(|| ally.position.midpoint(nearest.position))
        });

        match Position::centroid(contacts) {
            Some(front) => front,
            None => self
                .centroids()
                .map(|(allies, enemies)| allies.midpoint(enemies))
                .unwrap_or(Position::ORIGIN),
        }
    }

    fn compute_frontline_direction(&self) -> Position {
        self.centroids()
            .map(|(allies, enemies)| (enemies - allies).normalized())
            .unwrap_or(Position::ORIGIN)
    }

    fn compute_safe_zones(&self, count: usize, search_radius: f32) -> SafeZones {
        let mut zones = SafeZones::new();
        let (Some(grid), Some((ally_centroid, _))) = (self.grid.as_ref(), self.centroids()) else {
            return zones;
        };

        let mut candidates: Vec<(Position, f32)> = grid
            .cells()
            .filter(|&(center, _, control)| {
                control > 0.0 && center.distance(ally_centroid) <= search_radius
            })
            .map(|(center, threat, _)| (center, threat))
            .collect();
        // stable: equal threat keeps row-major cell order
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (center, _) in candidates.into_iter().take(count) {
            if zones.try_push(center).is_err() {
                break;
            }
        }
        zones
    }
}
