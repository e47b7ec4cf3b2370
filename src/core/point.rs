//! Grid coordinate and displacement types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Grid coordinates (integer cell indices).
///
/// `x` is the forward (row) axis, `y` the lateral (column) axis. The vehicle
/// advances along +x; +y is to its left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// Forward axis (row index)
    pub x: i32,
    /// Lateral axis (column index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate
    #[inline]
    pub fn euclidean_distance(&self, other: &GridCoord) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The 4 cardinal neighbors, in fixed expansion order
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x - 1, self.y),
        ]
    }

    /// Is `other` exactly one unit away along exactly one axis?
    #[inline]
    pub fn is_unit_adjacent(&self, other: &GridCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Net grid-cell movement accumulated while executing one route.
///
/// Folded into the vehicle's believed position once the route is exhausted,
/// so no separate odometry is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Displacement {
    /// Net forward-axis movement in cells
    pub dx: i32,
    /// Net lateral-axis movement in cells
    pub dy: i32,
}

impl Displacement {
    /// Zero displacement
    pub const ZERO: Displacement = Displacement { dx: 0, dy: 0 };

    /// Create a new displacement
    #[inline]
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl AddAssign for Displacement {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.dx += other.dx;
        self.dy += other.dy;
    }
}

impl Add<Displacement> for GridCoord {
    type Output = GridCoord;

    #[inline]
    fn add(self, d: Displacement) -> GridCoord {
        GridCoord::new(self.x + d.dx, self.y + d.dy)
    }
}

impl fmt::Display for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_unit_adjacent() {
        let c = GridCoord::new(5, 5);
        for n in c.neighbors_4() {
            assert!(c.is_unit_adjacent(&n));
        }
        assert!(!c.is_unit_adjacent(&GridCoord::new(6, 6)));
        assert!(!c.is_unit_adjacent(&c));
    }

    #[test]
    fn test_euclidean_distance() {
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(3, 4);
        assert!((a.euclidean_distance(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_displacement_folds_into_position() {
        let mut d = Displacement::ZERO;
        d += Displacement::new(2, 0);
        d += Displacement::new(0, -1);
        assert_eq!(GridCoord::new(19, 5) + d, GridCoord::new(21, 4));
    }
}
