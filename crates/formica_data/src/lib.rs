//! Plain data types shared by the simulation core and its drivers.
//!
//! Nothing in here owns behavior beyond small geometric helpers; the
//! simulation logic lives in `formica_core`.

use serde::{Deserialize, Serialize};

/// A point or displacement in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, counter-clockwise from +x).
    #[inline]
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }

    #[inline]
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Dimensions of the pheromone grid.
///
/// Cell `(x, y)` covers world coordinates `[x*resolution, (x+1)*resolution)`
/// on each axis and lives at flat index `x + y*width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: u32,
    pub height: u32,
    pub resolution: f32,
}

impl GridSpec {
    #[must_use]
    pub const fn new(width: u32, height: u32, resolution: f32) -> Self {
        Self {
            width,
            height,
            resolution,
        }
    }

    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// World size covered by the grid, `(width*resolution, height*resolution)`.
    #[inline]
    #[must_use]
    pub fn world_extent(&self) -> Vec2 {
        Vec2 {
            x: self.width as f32 * self.resolution,
            y: self.height as f32 * self.resolution,
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

/// Field dynamics applied by the pheromone simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PheromoneParams {
    /// Fraction of intensity removed per decay tick, in `[0, 1]`.
    pub decay_rate: f32,
    /// Intensity added per ant visit, in `[0, 1]`.
    pub deposit_rate: f32,
}

impl Default for PheromoneParams {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            deposit_rate: 0.2,
        }
    }
}

/// Motion and steering magnitudes shared by every ant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AntStats {
    /// World units per second.
    pub speed: f32,
    /// Multiplier on the random turn offset drawn each heading pass.
    pub turn_speed: f32,
    /// Radians of rotation per unit of sensed pheromone.
    pub pheromone_turn_gain: f32,
}

impl Default for AntStats {
    fn default() -> Self {
        Self {
            speed: 5.0,
            turn_speed: 1.0,
            pheromone_turn_gain: 0.5,
        }
    }
}

/// Axis-aligned region ants are spawned in, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub x: [f32; 2],
    pub y: [f32; 2],
}

impl SpawnRegion {
    /// Region covering the whole world of `grid`.
    #[must_use]
    pub fn whole(grid: &GridSpec) -> Self {
        let extent = grid.world_extent();
        Self {
            x: [0.0, extent.x],
            y: [0.0, extent.y],
        }
    }

    /// Both axes are ordered and their spans are finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let axis_ok = |[lo, hi]: [f32; 2]| lo <= hi && (hi - lo).is_finite();
        axis_ok(self.x) && axis_ok(self.y)
    }
}

/// Summary of a pheromone field, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldStats {
    pub total: f32,
    pub max: f32,
    pub nonzero_cells: usize,
}
