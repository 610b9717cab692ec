//! Pheromone intensity stored as a flat row-major grid.

use crate::error::{ConfigError, OutOfBounds, Result};
use formica_data::{FieldStats, GridSpec, Vec2};

/// Scalar field over a fixed `width x height` grid.
///
/// Every intensity stays in `[0, 1]`. The buffer is allocated once in
/// [`GridField::new`] and never resized.
///
/// Two rounding policies map world positions to cells:
/// - [`GridField::cell_containing`] floors, answering "which cell is this
///   point inside".
/// - [`GridField::nearest_cell`] rounds, answering "which cell is nearest",
///   and is what sensing and deposit use.
///
/// # Examples
/// ```
/// use formica_core::grid::GridField;
/// use formica_data::{GridSpec, Vec2};
///
/// let mut field = GridField::new(GridSpec::new(10, 10, 1.0)).unwrap();
/// field.set(5, 5, 0.4);
/// assert_eq!(field.sample_at(Vec2::new(4.6, 5.2)), 0.4);
/// assert_eq!(field.sample(-1, 5), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridField {
    spec: GridSpec,
    intensity: Vec<f32>,
}

impl GridField {
    /// Allocates a zeroed field, rejecting empty grids and bad resolutions.
    pub fn new(spec: GridSpec) -> Result<Self> {
        if spec.width == 0 {
            return Err(ConfigError::NonPositiveDimension { name: "width" });
        }
        if spec.height == 0 {
            return Err(ConfigError::NonPositiveDimension { name: "height" });
        }
        if !(spec.resolution.is_finite() && spec.resolution > 0.0) {
            return Err(ConfigError::NonPositiveResolution(spec.resolution));
        }
        Ok(Self {
            spec,
            intensity: vec![0.0; spec.cell_count()],
        })
    }

    #[inline]
    #[must_use]
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Flat index of cell `(x, y)`.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> std::result::Result<usize, OutOfBounds> {
        if self.spec.contains(x, y) {
            Ok(x as usize + y as usize * self.spec.width as usize)
        } else {
            Err(OutOfBounds {
                x,
                y,
                width: self.spec.width,
                height: self.spec.height,
            })
        }
    }

    /// Cell whose area contains `position` (floor of `position / resolution`).
    #[inline]
    #[must_use]
    pub fn cell_containing(&self, position: Vec2) -> (i32, i32) {
        (
            (position.x / self.spec.resolution).floor() as i32,
            (position.y / self.spec.resolution).floor() as i32,
        )
    }

    /// Cell nearest to `position` (round of `position / resolution`).
    #[inline]
    #[must_use]
    pub fn nearest_cell(&self, position: Vec2) -> (i32, i32) {
        (
            (position.x / self.spec.resolution).round() as i32,
            (position.y / self.spec.resolution).round() as i32,
        )
    }

    /// Intensity at cell `(x, y)`; anything off the grid reads as 0.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map_or(0.0, |idx| self.intensity[idx])
    }

    /// Intensity at the cell nearest to `position`.
    #[inline]
    #[must_use]
    pub fn sample_at(&self, position: Vec2) -> f32 {
        let (x, y) = self.nearest_cell(position);
        self.sample(x, y)
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).ok().map(|idx| self.intensity[idx])
    }

    /// Writes `value` clamped into `[0, 1]`. Off-grid writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, value: f32) {
        if let Ok(idx) = self.index(x, y) {
            self.intensity[idx] = value.clamp(0.0, 1.0);
        }
    }

    /// Read-only view of the intensity array, row-major.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.intensity
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.intensity
    }

    pub(crate) fn copy_from(&mut self, other: &GridField) {
        debug_assert_eq!(self.spec, other.spec);
        self.intensity.copy_from_slice(&other.intensity);
    }

    /// Fills the field with a cone peaking at 1 in the center cell and
    /// falling off linearly to 0 at the distance of the `(0, 0)` corner.
    pub fn seed_radial_gradient(&mut self) {
        let cx = (self.spec.width / 2) as f32;
        let cy = (self.spec.height / 2) as f32;
        let max_distance = cx.hypot(cy);
        let width = self.spec.width as usize;

        for (idx, cell) in self.intensity.iter_mut().enumerate() {
            let x = (idx % width) as f32;
            let y = (idx / width) as f32;
            *cell = if max_distance > 0.0 {
                let distance = (x - cx).hypot(y - cy);
                (1.0 - distance / max_distance).clamp(0.0, 1.0)
            } else {
                1.0
            };
        }
    }

    #[must_use]
    pub fn stats(&self) -> FieldStats {
        let mut stats = FieldStats::default();
        for &v in &self.intensity {
            stats.total += v;
            stats.max = stats.max.max(v);
            if v > 0.0 {
                stats.nonzero_cells += 1;
            }
        }
        stats
    }
}
