//! Fixed-resolution scalar grid backing the influence field.

use squad_core::{Position, TacticsConfig};

/// A point source of influence (one combatant).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluenceSource {
    pub position: Position,
    pub strength: f32,
}

/// Falloff parameters shared by grid evaluation and the direct fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Falloff {
    pub max_radius: f32,
    pub min_distance: f32,
}

impl Falloff {
    pub fn from_config(config: &TacticsConfig) -> Self {
        Self {
            max_radius: config.max_influence_radius,
            min_distance: config.min_influence_distance,
        }
    }

    /// Σ `strength / max(d, D_min)²` over sources within the maximum radius.
    pub fn sum_at(&self, point: Position, sources: &[InfluenceSource]) -> f32 {
        let radius_sq = self.max_radius * self.max_radius;
        sources
            .iter()
            .filter(|s| s.position.distance_squared(point) <= radius_sq)
            .map(|s| {
                let d = s.position.distance(point).max(self.min_distance);
                s.strength / (d * d)
            })
            .sum()
    }
}

/// Threat and control sampled at cell centres, row-major.
///
/// Never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluenceGrid {
    origin: Position,
    cell_size: f32,
    width: usize,
    height: usize,
    threat: Vec<f32>,
    control: Vec<f32>,
}

impl InfluenceGrid {
    /// Samples both fields over the bounding box of all sources, extended by
    /// the falloff radius. Cell counts are capped at `max_dimension`; the part
    /// of the box beyond the cap is served by the direct fallback.
    pub fn build(
        enemies: &[InfluenceSource],
        allies: &[InfluenceSource],
        falloff: Falloff,
        cell_size: f32,
        max_dimension: usize,
    ) -> Option<Self> {
        let mut points = enemies.iter().chain(allies).map(|s| s.position);
        let first = points.next()?;
        let (mut min, mut max) = (first, first);
        for p in points {
            min = Position::new(min.x.min(p.x), min.y.min(p.y));
            max = Position::new(max.x.max(p.x), max.y.max(p.y));
        }

        let pad = falloff.max_radius;
        let origin = Position::new(min.x - pad, min.y - pad);
        let span_x = (max.x - min.x) + 2.0 * pad;
        let span_y = (max.y - min.y) + 2.0 * pad;
        let width = cells_for(span_x, cell_size, max_dimension);
        let height = cells_for(span_y, cell_size, max_dimension);

        let mut grid = Self {
            origin,
            cell_size,
            width,
            height,
            threat: vec![0.0; width * height],
            control: vec![0.0; width * height],
        };

        for y in 0..height {
            for x in 0..width {
                let center = grid.cell_center(x, y);
                let idx = grid.index(x, y);
                grid.threat[idx] = falloff.sum_at(center, enemies);
                grid.control[idx] = falloff.sum_at(center, allies);
            }
        }

        Some(grid)
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell_center(&self, x: usize, y: usize) -> Position {
        Position::new(
            self.origin.x + (x as f32 + 0.5) * self.cell_size,
            self.origin.y + (y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Cell containing `pos`, or `None` outside the grid.
    pub fn cell_of(&self, pos: Position) -> Option<(usize, usize)> {
        if !pos.is_finite() {
            return None;
        }
        let fx = (pos.x - self.origin.x) / self.cell_size;
        let fy = (pos.y - self.origin.y) / self.cell_size;
        if fx < 0.0 || fy < 0.0 {
            return None;
        }
        let (x, y) = (fx as usize, fy as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    pub fn threat_in(&self, x: usize, y: usize) -> f32 {
        self.threat[self.index(x, y)]
    }

    pub fn control_in(&self, x: usize, y: usize) -> f32 {
        self.control[self.index(x, y)]
    }

    /// `(centre, threat, control)` for every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, f32, f32)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| {
                let idx = self.index(x, y);
                (self.cell_center(x, y), self.threat[idx], self.control[idx])
            })
        })
    }
}

fn cells_for(span: f32, cell_size: f32, max_dimension: usize) -> usize {
    let cells = (span / cell_size).ceil();
    if cells.is_finite() && cells >= 1.0 {
        (cells as usize).min(max_dimension)
    } else {
        1
    }
}
