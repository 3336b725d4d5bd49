use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Unique identifier for a combatant tracked by the game layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side a unit fights for. Units with different factions are hostile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Faction(pub u8);

impl Faction {
    pub const PARTY: Self = Self(0);
    pub const HOSTILE: Self = Self(1);

    #[inline]
    pub const fn is_hostile_to(self, other: Faction) -> bool {
        self.0 != other.0
    }
}

/// Continuous battlefield position, in world units.
///
/// The decision core never snaps to tiles; grid quantisation only happens
/// inside the influence field.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn midpoint(self, other: Position) -> Position {
        Position::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Length of the vector from the origin to this point.
    #[inline]
    pub fn length(self) -> f32 {
        self.distance(Position::ORIGIN)
    }

    /// Unit-length vector in the same direction, or the origin for a zero vector.
    pub fn normalized(self) -> Position {
        let len = self.length();
        if len <= f32::EPSILON {
            Position::ORIGIN
        } else {
            Position::new(self.x / len, self.y / len)
        }
    }

    /// Moves `distance` units from `self` straight towards `target`.
    ///
    /// Overshooting is allowed; callers clamp the distance when needed.
    pub fn step_towards(self, target: Position, distance: f32) -> Position {
        let dir = (target - self).normalized();
        self + dir * distance
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Arithmetic mean of a set of points, `None` when empty.
    pub fn centroid<I>(points: I) -> Option<Position>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut count = 0usize;
        let mut sum = Position::ORIGIN;
        for p in points {
            sum = sum + p;
            count += 1;
        }
        (count > 0).then(|| sum * (1.0 / count as f32))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Position {
    type Output = Position;

    fn mul(self, rhs: f32) -> Position {
        Position::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
