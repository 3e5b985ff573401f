//! Grid geometry shared by the projection calculators.

use crate::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};

/// Specification of a regular 3-D grid in projected coordinates.
///
/// Units follow the projection: km for most projections, degrees for a
/// lat/lon grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of points in X direction
    pub nx: usize,
    /// Number of points in Y direction
    pub ny: usize,
    /// Number of points in Z direction
    #[serde(default = "default_nz")]
    pub nz: usize,
    /// Grid spacing in X direction
    pub dx: f64,
    /// Grid spacing in Y direction
    pub dy: f64,
    /// Grid spacing in Z direction
    #[serde(default = "default_dz")]
    pub dz: f64,
    /// X coordinate of the first grid point
    pub minx: f64,
    /// Y coordinate of the first grid point
    pub miny: f64,
    /// Z coordinate of the first grid plane
    #[serde(default)]
    pub minz: f64,
}

fn default_nz() -> usize {
    1
}

fn default_dz() -> f64 {
    1.0
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            nx: 1,
            ny: 1,
            nz: 1,
            dx: 1.0,
            dy: 1.0,
            dz: 1.0,
            minx: 0.0,
            miny: 0.0,
            minz: 0.0,
        }
    }
}

impl GridSpec {
    /// Create a new grid specification.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nx: usize,
        ny: usize,
        nz: usize,
        dx: f64,
        dy: f64,
        dz: f64,
        minx: f64,
        miny: f64,
        minz: f64,
    ) -> Self {
        Self {
            nx,
            ny,
            nz,
            dx,
            dy,
            dz,
            minx,
            miny,
            minz,
        }
    }

    /// Create a single-plane grid.
    pub fn new_2d(nx: usize, ny: usize, dx: f64, dy: f64, minx: f64, miny: f64) -> Self {
        Self::new(nx, ny, 1, dx, dy, 1.0, minx, miny, 0.0)
    }

    /// Reject grids that cannot be indexed.
    pub fn validate(&self) -> RadarResult<()> {
        for (name, n) in [("nx", self.nx), ("ny", self.ny), ("nz", self.nz)] {
            if n == 0 {
                return Err(RadarError::invalid_param(name, "must be at least 1"));
            }
        }
        for (name, d) in [("dx", self.dx), ("dy", self.dy), ("dz", self.dz)] {
            if !d.is_finite() || d == 0.0 {
                return Err(RadarError::invalid_param(
                    name,
                    format!("spacing must be finite and non-zero, got {}", d),
                ));
            }
        }
        Ok(())
    }

    /// Convert projected coordinates to the nearest grid index.
    pub fn xy_to_index(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let i_f = ((x - self.minx) / self.dx).round();
        let j_f = ((y - self.miny) / self.dy).round();

        if !i_f.is_finite() || !j_f.is_finite() {
            return None;
        }
        if i_f < 0.0 || j_f < 0.0 || i_f >= self.nx as f64 || j_f >= self.ny as f64 {
            return None;
        }

        Some((i_f as usize, j_f as usize))
    }

    /// Projected coordinates of a grid index. No bounds check.
    pub fn index_to_xy(&self, ix: usize, iy: usize) -> (f64, f64) {
        (
            self.minx + ix as f64 * self.dx,
            self.miny + iy as f64 * self.dy,
        )
    }

    /// Z coordinate of a grid plane. No bounds check.
    pub fn index_to_z(&self, iz: usize) -> f64 {
        self.minz + iz as f64 * self.dz
    }

    /// Flatten a 3-D index, plane by plane, row by row.
    pub fn xy_index_to_array_index(&self, ix: usize, iy: usize, iz: usize) -> Option<usize> {
        if ix >= self.nx || iy >= self.ny || iz >= self.nz {
            return None;
        }
        Some((iz * self.ny + iy) * self.nx + ix)
    }

    /// Inverse of [`GridSpec::xy_index_to_array_index`].
    pub fn array_index_to_xy_index(&self, index: usize) -> Option<(usize, usize, usize)> {
        if index >= self.len() {
            return None;
        }
        let plane = self.nx * self.ny;
        let iz = index / plane;
        let rem = index % plane;
        Some((rem % self.nx, rem / self.nx, iz))
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0 || self.nz == 0
    }
}
