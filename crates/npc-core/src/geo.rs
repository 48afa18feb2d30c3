//! World coordinates and the arrival geometry shared by navigation code.
//!
//! The world is a block grid: a target point is considered to sit at the
//! horizontal centre of its block (`floor(x) + 0.5`, `floor(z) + 0.5`) while
//! its height is used as-is.  Arrival is judged separately in the flat plane
//! and on the vertical axis.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A facing-independent position in the world.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Block column containing this point on the x axis.
    #[inline]
    pub fn block_x(self) -> i64 {
        self.x.floor() as i64
    }

    /// Block column containing this point on the z axis.
    #[inline]
    pub fn block_z(self) -> i64 {
        self.z.floor() as i64
    }

    /// Squared flat-plane distance from `self` to the horizontal centre of
    /// `target`'s block.
    pub fn horizontal_distance_squared_to_block_center(self, target: Point) -> f64 {
        let dx = target.block_x() as f64 + 0.5 - self.x;
        let dz = target.block_z() as f64 + 0.5 - self.z;
        dx * dx + dz * dz
    }

    /// Signed height difference `target.y - self.y`.
    #[inline]
    pub fn vertical_delta(self, target: Point) -> f64 {
        target.y - self.y
    }

    /// `true` when `self` is inside the arrival box around `target`: less than
    /// one unit away vertically and no further than `margin` (a squared
    /// distance) from the block centre horizontally.
    pub fn within_arrival(self, target: Point, margin: f64) -> bool {
        let dy = self.vertical_delta(target);
        dy * dy < 1.0 && self.horizontal_distance_squared_to_block_center(target) <= margin
    }

    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Straight-line distance in blocks.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Move at most `max_step` units from `self` toward `to`.  Returns `to`
    /// exactly once it is within reach so followers never overshoot.
    pub fn step_toward(self, to: Point, max_step: f64) -> Point {
        let dist = self.distance(to);
        if dist <= max_step || dist == 0.0 {
            return to;
        }
        let f = max_step / dist;
        Point {
            x: self.x + (to.x - self.x) * f,
            y: self.y + (to.y - self.y) * f,
            z: self.z + (to.z - self.z) * f,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Parses `"x,y,z"` or `"x y z"` (extra whitespace around commas allowed).
impl FromStr for Point {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(CoreError::Parse(format!(
                "invalid point {s:?}: expected three coordinates"
            )));
        };
        let coord = |v: &str| {
            v.parse::<f64>()
                .map_err(|_| CoreError::Parse(format!("invalid coordinate {v:?} in point {s:?}")))
        };
        Ok(Point::new(coord(*x)?, coord(*y)?, coord(*z)?))
    }
}
